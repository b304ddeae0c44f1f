use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPlan {
    Monthly,
    Quarterly,
    Annual,
    WalkIn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub plan: MembershipPlan,
    pub active: bool,
}

impl Record for Member {
    const KIND: &'static str = "member";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.label().to_lowercase().contains(&needle) || self.email.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub position: String,
    pub email: String,
}

impl Record for Employee {
    const KIND: &'static str = "employee";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub price_cents: u64,
    pub stock: u32,
}

impl Product {
    pub const LOW_STOCK_THRESHOLD: u32 = 5;

    pub fn is_low_stock(&self) -> bool {
        self.stock <= Self::LOW_STOCK_THRESHOLD
    }
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: RecordId,
    pub name: String,
    pub contact_email: String,
    pub phone: String,
}

impl Record for Supplier {
    const KIND: &'static str = "supplier";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: RecordId,
    pub supplier_id: RecordId,
    pub product_id: RecordId,
    pub quantity: u32,
    pub status: OrderStatus,
}

impl Record for PurchaseOrder {
    const KIND: &'static str = "purchase order";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("PO-{:05} ({:?})", self.id, self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: RecordId,
    pub title: String,
    pub coach_id: RecordId,
    pub schedule: String,
    pub capacity: u32,
    pub enrolled: Vec<RecordId>,
}

impl TrainingSession {
    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled.len() as u32)
    }
}

impl Record for TrainingSession {
    const KIND: &'static str = "training session";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> String {
        format!("{} @ {}", self.title, self.schedule)
    }
}
