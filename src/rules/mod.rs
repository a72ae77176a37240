mod indicators;
mod scored;

pub use indicators::Indicators;
pub use scored::{ScoredTransaction, FRAUD_THRESHOLD};
