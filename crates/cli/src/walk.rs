use ahon_api::{CancellationToken, NavigationEvent, NavigationParameters};
use ahon_core::ShellConfig;
use ahon_runtime::PageKind;
use serde_json::Value;
use tracing::info;

/// The pages given on the command line, or the configured start page.
fn pages_to_walk(config: &ShellConfig, pages: Vec<PageKind>) -> Result<Vec<PageKind>, String> {
    if !pages.is_empty() {
        return Ok(pages);
    }
    match &config.start_page {
        Some(name) => Ok(vec![name.parse::<PageKind>()?]),
        None => Err("no pages given and no start_page configured".to_string()),
    }
}

pub async fn run(
    config: ShellConfig,
    pages: Vec<PageKind>,
    params: Vec<(String, Value)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = pages_to_walk(&config, pages)?;
    let parameters = (!params.is_empty()).then(|| params.into_iter().collect::<NavigationParameters>());

    let shell = ahon_runtime::build_shell(&config.navigator);
    let _listener = shell.navigator.subscribe(|event: &NavigationEvent| {
        println!("-> {:<16} {}", event.route, event.page.type_name());
    })?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut outcome = Ok(());
    for kind in pages {
        info!("Opening {}", kind);
        if let Err(e) = shell.open(kind, parameters.clone(), &cancel).await {
            outcome = Err(e.into());
            break;
        }
    }

    shell.shutdown(&CancellationToken::new()).await;
    info!("Navigator shut down");
    outcome
}
