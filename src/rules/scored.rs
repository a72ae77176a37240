use crate::models::Transaction;
use crate::rules::Indicators;

const HIGH_AMOUNT_WEIGHT: u8 = 40;
const NEW_DEVICE_WEIGHT: u8 = 30;
const VELOCITY_WEIGHT: u8 = 20;
const INTERNATIONAL_WEIGHT: u8 = 10;

/// Scores at or above this value classify a transaction as fraud.
pub const FRAUD_THRESHOLD: u8 = 60;

/// A transaction together with its derived indicators, weighted score and
/// final classification. Created once per record and never mutated.
#[derive(Debug, Clone)]
pub struct ScoredTransaction {
    pub transaction: Transaction,
    pub indicators: Indicators,
    /// Weighted sum of the indicators, always in [0, 100].
    pub fraud_score: u8,
    /// True iff `fraud_score >= FRAUD_THRESHOLD`.
    pub is_fraud: bool
}

impl ScoredTransaction {
    /// Derives the indicators and computes the weighted score for one
    /// transaction. The weights (40, 30, 20, 10) sum to 100, so the score
    /// is always in [0, 100].
    pub fn score(transaction: Transaction) -> Self {
        let indicators = Indicators::derive(&transaction);
        let fraud_score = weigh(indicators.is_high_amount, HIGH_AMOUNT_WEIGHT)
            + weigh(indicators.is_new_device, NEW_DEVICE_WEIGHT)
            + weigh(indicators.is_velocity_risk, VELOCITY_WEIGHT)
            + weigh(indicators.is_international, INTERNATIONAL_WEIGHT);

        Self {
            transaction,
            indicators,
            fraud_score,
            is_fraud: fraud_score >= FRAUD_THRESHOLD
        }
    }
}

fn weigh(indicator: bool, weight: u8) -> u8 {
    if indicator { weight } else { 0 }
}
