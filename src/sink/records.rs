use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::timestamp_format;
use crate::rules::ScoredTransaction;

/// A row of the clean layer: business fields only.
///
/// The score and indicator fields are diagnostic and are stripped before a
/// record reaches this sink.
#[derive(Debug, Clone, Serialize)]
pub struct CleanRecord {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub merchant: String,
    pub country: String,
    pub device: String
}

impl CleanRecord {
    pub const HEADERS: [&'static str; 7] = [
        "transaction_id",
        "user_id",
        "amount",
        "timestamp",
        "merchant",
        "country",
        "device"
    ];
}

impl From<ScoredTransaction> for CleanRecord {
    fn from(scored: ScoredTransaction) -> Self {
        let transaction = scored.transaction;

        Self {
            transaction_id: transaction.transaction_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            timestamp: transaction.timestamp,
            merchant: transaction.merchant,
            country: transaction.country,
            device: transaction.device
        }
    }
}

/// A row of the alert layer: business fields plus the fraud score kept for
/// triage. Individual indicators and the classification flag are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct AlertRecord {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub merchant: String,
    pub country: String,
    pub device: String,
    pub fraud_score: u8
}

impl AlertRecord {
    pub const HEADERS: [&'static str; 8] = [
        "transaction_id",
        "user_id",
        "amount",
        "timestamp",
        "merchant",
        "country",
        "device",
        "fraud_score"
    ];
}

impl From<ScoredTransaction> for AlertRecord {
    fn from(scored: ScoredTransaction) -> Self {
        let transaction = scored.transaction;

        Self {
            transaction_id: transaction.transaction_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            timestamp: transaction.timestamp,
            merchant: transaction.merchant,
            country: transaction.country,
            device: transaction.device,
            fraud_score: scored.fraud_score
        }
    }
}

/// The narrow flat export of the alert layer consumed by external reporting
/// tools.
#[derive(Debug, Clone, Serialize)]
pub struct AlertExportRow {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    pub merchant: String,
    pub fraud_score: u8
}

impl AlertExportRow {
    pub const HEADERS: [&'static str; 5] = [
        "transaction_id",
        "user_id",
        "amount",
        "merchant",
        "fraud_score"
    ];
}

impl From<&AlertRecord> for AlertExportRow {
    fn from(alert: &AlertRecord) -> Self {
        Self {
            transaction_id: alert.transaction_id.clone(),
            user_id: alert.user_id.clone(),
            amount: alert.amount,
            merchant: alert.merchant.clone(),
            fraud_score: alert.fraud_score
        }
    }
}
