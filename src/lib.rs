pub mod config;
pub mod error;
pub mod payout;
pub mod survey;
pub mod utils;

pub use config::Config;
pub use error::{PayoutError, Result};
