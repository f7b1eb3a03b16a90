pub mod client;
pub mod handler;
pub mod sink;

pub use crate::domain::model::{CalculationResult, FetchOutcome};
pub use crate::domain::ports::{ApiClient, ConfigProvider, OutputSink};
pub use crate::utils::error::Result;
