mod errors;
mod transaction;

pub use errors::SchemaError;
pub use transaction::Transaction;

pub(crate) use transaction::timestamp_format;
