use ahon_core::NavigatorConfig;
use ahon_runtime::PageKind;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Page")]
    page: String,
    #[tabled(rename = "Route")]
    route: &'static str,
    #[tabled(rename = "Type")]
    type_name: &'static str,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let shell = ahon_runtime::build_shell(&NavigatorConfig::default());

    let rows: Vec<RouteRow> = shell
        .registry
        .routes()
        .into_iter()
        .map(|page| RouteRow {
            page: PageKind::ALL
                .into_iter()
                .find(|kind| kind.route() == page.route)
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "-".to_string()),
            route: page.route.as_str(),
            type_name: page.type_name,
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}
