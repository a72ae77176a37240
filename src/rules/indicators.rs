use crate::models::Transaction;

const HIGH_AMOUNT_LIMIT: f64 = 5000.0;
const VELOCITY_LIMIT: f64 = 3000.0;
const DOMESTIC_COUNTRY: &str = "USA";
const NEW_DEVICE_MARKER: &str = "new";

/// The four boolean risk signals derived from a single transaction.
///
/// Derivation is a pure, total function: every well-formed transaction
/// produces well-defined indicators, and no cross-record state is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicators {
    /// Amount exceeds 5000.
    pub is_high_amount: bool,
    /// Device description contains the substring "new" (case-sensitive).
    pub is_new_device: bool,
    /// Amount exceeds 3000. The name is historical: this is a second amount
    /// threshold, not a transaction-rate measure. Downstream consumers key
    /// on the current behavior, so it is kept verbatim.
    pub is_velocity_risk: bool,
    /// Country is anything other than the literal "USA".
    pub is_international: bool
}

impl Indicators {
    /// Evaluates every rule against a single transaction.
    pub fn derive(transaction: &Transaction) -> Self {
        Self {
            is_high_amount: transaction.amount > HIGH_AMOUNT_LIMIT,
            is_new_device: transaction.device.contains(NEW_DEVICE_MARKER),
            is_velocity_risk: transaction.amount > VELOCITY_LIMIT,
            is_international: transaction.country != DOMESTIC_COUNTRY
        }
    }
}
