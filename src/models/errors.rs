use thiserror::Error;

use crate::models::Transaction;

/// A row failed required-field presence or type coercion at ingestion.
///
/// Schema failures are fatal to the whole run; there is no row-skipping or
/// best-effort parsing of malformed input.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Malformed record at line [{line}]: {message}")]
    Malformed {
        line: u64,
        message: String
    },
    #[error("Non-finite amount [{amount}] for transaction [{transaction_id}]")]
    NonFiniteAmount {
        transaction_id: String,
        amount: f64
    }
}

impl SchemaError {
    pub fn malformed(error: &csv::Error) -> Self {
        let line = error.position().map(|position| position.line()).unwrap_or(0);

        Self::Malformed {
            line,
            message: error.to_string()
        }
    }

    pub fn non_finite_amount(transaction: &Transaction) -> Self {
        Self::NonFiniteAmount {
            transaction_id: transaction.transaction_id.clone(),
            amount: transaction.amount
        }
    }
}
