use super::lock;
use ahon_api::{
    BoxError, CancellationToken, Employee, Member, Notifier, OrderStatus, Page, PageError,
    PageResult, Product, PurchaseOrder, Record, RecordStore, ToastLevel, TrainingSession,
};
use ahon_core::ServiceRegistry;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub members: usize,
    pub active_members: usize,
    pub employees: usize,
    pub products: usize,
    pub low_stock_products: usize,
    pub pending_orders: usize,
    pub training_sessions: usize,
    pub open_seats: u32,
}

pub struct DashboardPage {
    members: Arc<dyn RecordStore<Member>>,
    employees: Arc<dyn RecordStore<Employee>>,
    products: Arc<dyn RecordStore<Product>>,
    orders: Arc<dyn RecordStore<PurchaseOrder>>,
    sessions: Arc<dyn RecordStore<TrainingSession>>,
    notifier: Arc<dyn Notifier>,
    summary: Mutex<Option<DashboardSummary>>,
}

impl DashboardPage {
    pub fn from_registry(registry: &ServiceRegistry) -> Result<Self, BoxError> {
        Ok(Self {
            members: registry.resolve()?,
            employees: registry.resolve()?,
            products: registry.resolve()?,
            orders: registry.resolve()?,
            sessions: registry.resolve()?,
            notifier: registry.resolve()?,
            summary: Mutex::new(None),
        })
    }

    /// Figures computed by the last `initialize`.
    pub fn summary(&self) -> Option<DashboardSummary> {
        lock(&self.summary).clone()
    }
}

async fn load<R: Record>(store: &dyn RecordStore<R>) -> PageResult<Vec<R>> {
    store
        .list()
        .await
        .into_result()
        .map(Option::unwrap_or_default)
        .map_err(PageError::Service)
}

#[async_trait]
impl Page for DashboardPage {
    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        let members = load(self.members.as_ref()).await?;
        let employees = load(self.employees.as_ref()).await?;
        let products = load(self.products.as_ref()).await?;
        let orders = load(self.orders.as_ref()).await?;
        let sessions = load(self.sessions.as_ref()).await?;

        let summary = DashboardSummary {
            members: members.len(),
            active_members: members.iter().filter(|m| m.active).count(),
            employees: employees.len(),
            products: products.len(),
            low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            training_sessions: sessions.len(),
            open_seats: sessions.iter().map(TrainingSession::seats_left).sum(),
        };

        if summary.low_stock_products > 0 {
            self.notifier.notify(
                ToastLevel::Warning,
                "Low stock",
                &format!("{} products are running low", summary.low_stock_products),
            );
        }

        *lock(&self.summary) = Some(summary);
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        lock(&self.summary).take();
        Ok(())
    }
}
