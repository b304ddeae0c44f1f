//! Pages of the gym management shell.

mod dashboard;
mod login;
mod member_detail;
mod records;

pub use dashboard::{DashboardPage, DashboardSummary};
pub use login::LoginPage;
pub use member_detail::MemberDetailPage;
pub use records::RecordListPage;

use ahon_api::{Employee, Member, Product, PurchaseOrder, Route, Supplier, TrainingSession};
use ahon_core::{Lifetime, ServiceCollection};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const LOGIN: Route = Route::new("/login");
pub const DASHBOARD: Route = Route::new("/dashboard");
pub const MEMBERS: Route = Route::new("/members");
pub const MEMBER_DETAIL: Route = Route::new("/members/detail");
pub const EMPLOYEES: Route = Route::new("/employees");
pub const PRODUCTS: Route = Route::new("/products");
pub const SUPPLIERS: Route = Route::new("/suppliers");
pub const PURCHASE_ORDERS: Route = Route::new("/purchase-orders");
pub const TRAINING: Route = Route::new("/training");

/// Register every page. All pages are transient.
pub fn register_pages(services: &mut ServiceCollection) {
    services
        .add_page::<LoginPage, _>(LOGIN, Lifetime::Transient, |_| Ok(LoginPage::default()))
        .add_page::<DashboardPage, _>(DASHBOARD, Lifetime::Transient, DashboardPage::from_registry)
        .add_page::<MemberDetailPage, _>(
            MEMBER_DETAIL,
            Lifetime::Transient,
            MemberDetailPage::from_registry,
        )
        .add_page::<RecordListPage<Member>, _>(
            MEMBERS,
            Lifetime::Transient,
            RecordListPage::from_registry,
        )
        .add_page::<RecordListPage<Employee>, _>(
            EMPLOYEES,
            Lifetime::Transient,
            RecordListPage::from_registry,
        )
        .add_page::<RecordListPage<Product>, _>(
            PRODUCTS,
            Lifetime::Transient,
            RecordListPage::from_registry,
        )
        .add_page::<RecordListPage<Supplier>, _>(
            SUPPLIERS,
            Lifetime::Transient,
            RecordListPage::from_registry,
        )
        .add_page::<RecordListPage<PurchaseOrder>, _>(
            PURCHASE_ORDERS,
            Lifetime::Transient,
            RecordListPage::from_registry,
        )
        .add_page::<RecordListPage<TrainingSession>, _>(
            TRAINING,
            Lifetime::Transient,
            RecordListPage::from_registry,
        );
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
