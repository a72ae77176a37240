use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::SchemaError;

/// Represents a single payment row from the input CSV file.
///
/// This struct captures one transaction exactly as ingested; it is never
/// mutated after parsing. Columns are matched by name against the fixed
/// seven-column input schema, with no type inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID (uniqueness assumed from upstream).
    pub transaction_id: String,
    /// The paying user's ID.
    pub user_id: String,
    /// Transaction amount. Must be finite; no lower/upper bound is enforced.
    pub amount: f64,
    /// When the payment occurred.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// Merchant name.
    pub merchant: String,
    /// Country code or name, treated as opaque text.
    pub country: String,
    /// Free-text device description.
    pub device: String
}

impl Transaction {
    /// Checks the parts of the input schema serde cannot express.
    ///
    /// Business validation (negative amounts, suspicious values) is
    /// deliberately absent here; those judgements belong to the scoring rules.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.amount.is_finite() {
            return Err(SchemaError::non_finite_amount(self));
        }

        Ok(())
    }
}

/// Timestamp (de)serialization for the CSV columns.
///
/// Accepts both `2024-01-15 09:30:00` and `2024-01-15T09:30:00` on input,
/// with an optional fractional-seconds part; always writes the
/// space-separated form.
pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const READ_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;

        READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}
