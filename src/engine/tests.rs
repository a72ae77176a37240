use super::{partition, FraudPipeline};

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

use crate::rules::ScoredTransaction;
use crate::sink::OutputLayout;

const HEADER: &str = "transaction_id,user_id,amount,timestamp,merchant,country,device";

fn create_input_csv(directory: &TempDir, rows: &[&str]) -> Result<std::path::PathBuf> {
    let path = directory.path().join("payments.csv");
    let mut content = String::from(HEADER);

    for row in rows {
        content.push('\n');
        content.push_str(row);
    }

    fs::write(&path, content)?;

    Ok(path)
}

#[tokio::test]
async fn test_pipeline_partitions_batch_across_the_three_sinks() -> Result<()> {
    let directory = TempDir::new()?;
    let input = create_input_csv(&directory, &[
        "T1,U1,6000.0,2024-01-15 09:30:00,Amazon,Canada,new-iphone",
        "T2,U2,100.0,2024-01-15 10:00:00,Walmart,USA,android",
        "T3,U3,4000.0,2024-01-15 10:30:00,Target,USA,android"
    ])?;

    let layout = OutputLayout::new(directory.path().join("out"));
    let summary = FraudPipeline::new().run(input, &layout).await?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.flagged, 1);

    let clean = fs::read_to_string(layout.clean.path())?;
    let alerts = fs::read_to_string(layout.alerts.path())?;
    let export = fs::read_to_string(layout.alert_export.path())?;

    // T2 and T3 clear; T1 scores 100 and lands in both alert sinks.
    assert_eq!(clean.lines().count(), 3);
    assert!(clean.contains("T2") && clean.contains("T3"));
    assert!(!clean.contains("fraud_score"));

    assert_eq!(alerts.lines().count(), 2);
    assert!(alerts.contains("T1,U1,6000.0,2024-01-15 09:30:00,Amazon,Canada,new-iphone,100"));

    assert_eq!(export.lines().next(), Some("transaction_id,user_id,amount,merchant,fraud_score"));
    assert!(export.contains("T1,U1,6000.0,Amazon,100"));

    Ok(())
}

#[tokio::test]
async fn test_malformed_row_aborts_before_any_sink_is_written() -> Result<()> {
    let directory = TempDir::new()?;
    let input = create_input_csv(&directory, &[
        "T1,U1,100.0,2024-01-15 09:30:00,Amazon,USA,android",
        "T2,U2,not-a-number,2024-01-15 10:00:00,Walmart,USA,android"
    ])?;

    let layout = OutputLayout::new(directory.path().join("out"));
    let result = FraudPipeline::new().run(input, &layout).await;

    assert!(result.is_err());
    assert!(!layout.clean.path().exists());
    assert!(!layout.alerts.path().exists());
    assert!(!layout.alert_export.path().exists());

    Ok(())
}

#[tokio::test]
async fn test_non_finite_amount_aborts_the_run() -> Result<()> {
    let directory = TempDir::new()?;
    let input = create_input_csv(&directory, &[
        "T1,U1,inf,2024-01-15 09:30:00,Amazon,USA,android"
    ])?;

    let layout = OutputLayout::new(directory.path().join("out"));
    let result = FraudPipeline::new().run(input, &layout).await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_aborts_the_run() -> Result<()> {
    let directory = TempDir::new()?;
    let layout = OutputLayout::new(directory.path().join("out"));

    let result = FraudPipeline::new()
        .run(directory.path().join("missing.csv"), &layout)
        .await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_rerun_on_unchanged_input_is_byte_identical() -> Result<()> {
    let directory = TempDir::new()?;
    let input = create_input_csv(&directory, &[
        "T1,U1,6000.0,2024-01-15 09:30:00,Amazon,Canada,new-iphone",
        "T2,U2,100.0,2024-01-15 10:00:00,Walmart,USA,android"
    ])?;

    let layout = OutputLayout::new(directory.path().join("out"));
    let pipeline = FraudPipeline::new();

    pipeline.run(input.clone(), &layout).await?;
    let first_clean = fs::read_to_string(layout.clean.path())?;
    let first_alerts = fs::read_to_string(layout.alerts.path())?;
    let first_export = fs::read_to_string(layout.alert_export.path())?;

    pipeline.run(input, &layout).await?;

    assert_eq!(fs::read_to_string(layout.clean.path())?, first_clean);
    assert_eq!(fs::read_to_string(layout.alerts.path())?, first_alerts);
    assert_eq!(fs::read_to_string(layout.alert_export.path())?, first_export);

    Ok(())
}

#[tokio::test]
async fn test_second_run_fully_replaces_a_larger_first_run() -> Result<()> {
    let directory = TempDir::new()?;
    let layout = OutputLayout::new(directory.path().join("out"));
    let pipeline = FraudPipeline::new();

    let rows: Vec<String> = (0..20)
        .map(|i| format!("T{i},U{i},100.0,2024-01-15 09:30:00,Amazon,USA,android"))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let large_input = create_input_csv(&directory, &row_refs)?;
    pipeline.run(large_input, &layout).await?;

    let small_input = create_input_csv(&directory, &[
        "T99,U99,100.0,2024-01-15 09:30:00,Amazon,USA,android"
    ])?;
    pipeline.run(small_input, &layout).await?;

    let clean = fs::read_to_string(layout.clean.path())?;

    assert_eq!(clean.lines().count(), 2);
    assert!(clean.contains("T99"));

    Ok(())
}

#[tokio::test]
async fn test_empty_input_produces_headers_only() -> Result<()> {
    let directory = TempDir::new()?;
    let input = create_input_csv(&directory, &[])?;

    let layout = OutputLayout::new(directory.path().join("out"));
    let summary = FraudPipeline::new().run(input, &layout).await?;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.flagged, 0);

    assert_eq!(fs::read_to_string(layout.clean.path())?.lines().count(), 1);
    assert_eq!(fs::read_to_string(layout.alerts.path())?.lines().count(), 1);
    assert_eq!(fs::read_to_string(layout.alert_export.path())?.lines().count(), 1);

    Ok(())
}

#[test]
fn test_partition_is_total_and_disjoint() {
    let batch: Vec<ScoredTransaction> = [
        (6000.0, "new-iphone", "Canada"),
        (100.0, "android", "USA"),
        (3500.0, "new", "Mexico"),
        (4000.0, "android", "USA")
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (amount, device, country))| {
        ScoredTransaction::score(crate::models::Transaction {
            transaction_id: format!("T{i}"),
            user_id: format!("U{i}"),
            amount,
            timestamp: chrono::NaiveDateTime::default(),
            merchant: "Amazon".to_string(),
            country: country.to_string(),
            device: device.to_string()
        })
    })
    .collect();

    let total = batch.len();
    let (clean, alerts) = partition(batch);

    assert_eq!(clean.len() + alerts.len(), total);
    assert_eq!(alerts.len(), 2);

    let clean_ids: Vec<_> = clean.iter().map(|record| record.transaction_id.as_str()).collect();
    let alert_ids: Vec<_> = alerts.iter().map(|record| record.transaction_id.as_str()).collect();

    assert!(clean_ids.iter().all(|id| !alert_ids.contains(id)));
}
