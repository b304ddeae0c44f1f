pub mod pages;
pub mod seed;
pub mod services;

use ahon_api::{
    CancellationToken, Employee, Member, NavigationParameters, NavigationResult, Product,
    PurchaseOrder, Route, Supplier, TrainingSession,
};
use ahon_core::logging::LoggingGuard;
use ahon_core::{LoggingConfig, Navigator, NavigatorConfig, ServiceCollection, ServiceRegistry};
use pages::{DashboardPage, LoginPage, MemberDetailPage, RecordListPage};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Every page the shell can open, addressed by name from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Login,
    Dashboard,
    Members,
    MemberDetail,
    Employees,
    Products,
    Suppliers,
    PurchaseOrders,
    Training,
}

impl PageKind {
    pub const ALL: [PageKind; 9] = [
        PageKind::Login,
        PageKind::Dashboard,
        PageKind::Members,
        PageKind::MemberDetail,
        PageKind::Employees,
        PageKind::Products,
        PageKind::Suppliers,
        PageKind::PurchaseOrders,
        PageKind::Training,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageKind::Login => "login",
            PageKind::Dashboard => "dashboard",
            PageKind::Members => "members",
            PageKind::MemberDetail => "member-detail",
            PageKind::Employees => "employees",
            PageKind::Products => "products",
            PageKind::Suppliers => "suppliers",
            PageKind::PurchaseOrders => "purchase-orders",
            PageKind::Training => "training",
        }
    }

    pub fn route(self) -> Route {
        match self {
            PageKind::Login => pages::LOGIN,
            PageKind::Dashboard => pages::DASHBOARD,
            PageKind::Members => pages::MEMBERS,
            PageKind::MemberDetail => pages::MEMBER_DETAIL,
            PageKind::Employees => pages::EMPLOYEES,
            PageKind::Products => pages::PRODUCTS,
            PageKind::Suppliers => pages::SUPPLIERS,
            PageKind::PurchaseOrders => pages::PURCHASE_ORDERS,
            PageKind::Training => pages::TRAINING,
        }
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = PageKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown page '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully wired application: services, pages and the main navigator.
#[derive(Clone)]
pub struct Shell {
    pub registry: Arc<ServiceRegistry>,
    pub navigator: Arc<Navigator>,
}

impl Shell {
    /// Navigate the main navigator to the page behind `kind`.
    pub async fn open(
        &self,
        kind: PageKind,
        parameters: Option<NavigationParameters>,
        cancel: &CancellationToken,
    ) -> NavigationResult<()> {
        let navigator = &self.navigator;
        match kind {
            PageKind::Login => navigator
                .navigate_to::<LoginPage>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Dashboard => navigator
                .navigate_to::<DashboardPage>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Members => navigator
                .navigate_to::<RecordListPage<Member>>(parameters, cancel)
                .await
                .map(drop),
            PageKind::MemberDetail => navigator
                .navigate_to::<MemberDetailPage>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Employees => navigator
                .navigate_to::<RecordListPage<Employee>>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Products => navigator
                .navigate_to::<RecordListPage<Product>>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Suppliers => navigator
                .navigate_to::<RecordListPage<Supplier>>(parameters, cancel)
                .await
                .map(drop),
            PageKind::PurchaseOrders => navigator
                .navigate_to::<RecordListPage<PurchaseOrder>>(parameters, cancel)
                .await
                .map(drop),
            PageKind::Training => navigator
                .navigate_to::<RecordListPage<TrainingSession>>(parameters, cancel)
                .await
                .map(drop),
        }
    }

    pub async fn shutdown(&self, cancel: &CancellationToken) {
        self.navigator.shutdown(cancel).await;
    }
}

/// Registry with every service and page of the application.
pub fn build_registry() -> ServiceRegistry {
    let mut services = ServiceCollection::new();
    services::register_services(&mut services);
    pages::register_pages(&mut services);
    services.build()
}

/// Bootstraps the application shell.
///
/// Assembles the seeded stores, the notifier and every page into one registry
/// and puts a navigator on top of it.
pub fn build_shell(config: &NavigatorConfig) -> Shell {
    let registry = Arc::new(build_registry());
    let navigator = Arc::new(Navigator::new(registry.clone(), config.clone()));
    Shell {
        registry,
        navigator,
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(config: &LoggingConfig, component: &str) -> Option<LoggingGuard> {
    Some(ahon_core::logging::init_logging(config, component))
}
