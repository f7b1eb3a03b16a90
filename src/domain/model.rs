use crate::utils::error::CalcError;
use serde::{Deserialize, Serialize};

/// Result payload returned by the remote calculator service: the operands it
/// acted on, the operator symbol, and the computed answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub a: f64,
    pub b: f64,
    pub operator: String,
    pub answer: f64,
}

/// Outcome of one request/response exchange. Failures are carried as data so
/// callers branch on the variant instead of inspecting payload shape.
#[derive(Debug)]
pub enum FetchOutcome {
    Payload(CalculationResult),
    Failed(CalcError),
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}
