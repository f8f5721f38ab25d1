use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A pending micro-payment owed for one qualifying survey response.
///
/// Created once per qualifying row and never mutated; its lifetime ends when
/// the payment list is written out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: String,
    pub feedback_code: String,
    pub alipay_account: String,
    pub amount: f64,
    pub quality_score: u8,
    pub created_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    /// The full response row, keyed by header name in column order.
    pub feedback_data: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl PaymentRecord {
    pub fn new(
        feedback_code: String,
        alipay_account: String,
        amount: f64,
        quality_score: u8,
        feedback_data: Map<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            feedback_code,
            alipay_account,
            amount,
            quality_score,
            created_at: Utc::now(),
            payment_status: PaymentStatus::Pending,
            feedback_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_start_pending_with_fresh_ids() {
        let a = PaymentRecord::new("FB001".into(), "acct".into(), 3.00, 4, Map::new());
        let b = PaymentRecord::new("FB002".into(), "acct".into(), 3.00, 3, Map::new());

        assert_eq!(a.payment_status, PaymentStatus::Pending);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
