pub mod records;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use records::{
    Employee, Member, MembershipPlan, OrderStatus, Product, PurchaseOrder, Supplier,
    TrainingSession,
};

pub type RecordId = u64;

/// A row managed through a [`crate::store::RecordStore`].
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Human-readable kind, used in outcome messages ("member", "product").
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Short display label for lists and toasts.
    fn label(&self) -> String;

    /// Case-insensitive search over the fields a user would type.
    fn matches(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Response envelope of every persistence call: a success flag, a message
/// meant for the user and an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome<T> {
    pub success: bool,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> OperationOutcome<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Collapses the envelope: `Err(message)` unless the call succeeded.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(self.message)
        }
    }
}
