pub mod batch;
pub mod quality;
pub mod record;

pub use batch::{BatchProcessor, BatchSummary};
pub use quality::QualityScorer;
pub use record::{PaymentRecord, PaymentStatus};
