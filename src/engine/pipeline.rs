use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::debug;

use crate::models::{SchemaError, Transaction};
use crate::report::RunSummary;
use crate::rules::ScoredTransaction;
use crate::sink::{AlertExportRow, AlertRecord, CleanRecord, DatasetSink, OutputLayout};

/// Batch fraud scoring pipeline.
///
/// One run reads a finite input snapshot, scores every record, partitions
/// the batch and replaces the output sinks. All state is scoped to the run;
/// nothing carries over between runs.
pub struct FraudPipeline {
    backpressure: usize
}

impl FraudPipeline {
    pub fn new() -> Self {
        Self {
            backpressure: 256
        }
    }

    /// Orchestrates the end-to-end run for one input CSV file.
    ///
    /// Any schema or sink failure aborts the whole run; there is no
    /// partial-success mode.
    pub async fn run(&self, input: PathBuf, layout: &OutputLayout) -> anyhow::Result<RunSummary> {
        let (sender, receiver) = mpsc::channel::<Transaction>(self.backpressure);
        let reader = Self::spawn_csv_reader(input, sender);
        let scored = Self::score_stream(receiver).await;

        // The reader's verdict decides whether the collected batch is the
        // complete snapshot. A schema error surfaces here, before any sink
        // is touched.
        reader.await.context("CSV ingestion task panicked")??;

        let total = scored.len();
        let (clean, alerts) = partition(scored);
        let flagged = alerts.len();
        let export_path = layout.alert_export.path().to_path_buf();

        self.write_outputs(layout, clean, alerts).await?;

        Ok(RunSummary {
            total,
            flagged,
            export_path
        })
    }

    fn spawn_csv_reader(path: PathBuf, sender: mpsc::Sender<Transaction>) -> JoinHandle<anyhow::Result<()>> {
        spawn_blocking(move || {
            let file = File::open(&path)
                .with_context(|| format!("Error opening input CSV at [{}]", path.display()))?;

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<Transaction>() {
                let transaction = result.map_err(|error| SchemaError::malformed(&error))?;
                transaction.validate()?;

                if sender.blocking_send(transaction).is_err() {
                    break;
                }
            }

            Ok(())
        })
    }

    async fn score_stream(mut receiver: mpsc::Receiver<Transaction>) -> Vec<ScoredTransaction> {
        let mut batch = Vec::new();

        while let Some(transaction) = receiver.recv().await {
            let scored = ScoredTransaction::score(transaction);

            debug!(
                "Transaction [{}] scored {} (fraud: {})",
                scored.transaction.transaction_id, scored.fraud_score, scored.is_fraud
            );

            batch.push(scored);
        }

        batch
    }

    async fn write_outputs(
        &self,
        layout: &OutputLayout,
        clean: Vec<CleanRecord>,
        alerts: Vec<AlertRecord>
    ) -> anyhow::Result<()> {
        layout.prepare()?;

        let export: Vec<AlertExportRow> = alerts.iter().map(AlertExportRow::from).collect();

        let clean_sink = layout.clean.clone();
        let alert_sink = layout.alerts.clone();
        let export_sink = layout.alert_export.clone();

        // The sinks are independent, so the three replacements run in
        // parallel; each one is individually atomic.
        let (clean_result, alert_result, export_result) = tokio::try_join!(
            spawn_blocking(move || clean_sink.replace(&CleanRecord::HEADERS, &clean)),
            spawn_blocking(move || alert_sink.replace(&AlertRecord::HEADERS, &alerts)),
            spawn_blocking(move || export_sink.replace(&AlertExportRow::HEADERS, &export))
        )
        .context("Sink writer task panicked")?;

        clean_result?;
        alert_result?;
        export_result?;

        Ok(())
    }
}

/// Splits a scored batch into the clean and alert layers in a single pass.
///
/// Every record lands in exactly one side; no ordering guarantee is made
/// within either side.
pub fn partition(batch: Vec<ScoredTransaction>) -> (Vec<CleanRecord>, Vec<AlertRecord>) {
    let mut clean = Vec::new();
    let mut alerts = Vec::new();

    for scored in batch {
        if scored.is_fraud {
            alerts.push(AlertRecord::from(scored));
        } else {
            clean.push(CleanRecord::from(scored));
        }
    }

    (clean, alerts)
}
