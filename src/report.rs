use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use tracing::warn;

/// End-of-run counts and the location of the flat alert export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records read and scored from the input snapshot.
    pub total: usize,
    /// Records classified as fraud.
    pub flagged: usize,
    /// Where the narrow alert extract was written.
    pub export_path: PathBuf
}

impl RunSummary {
    /// Prints the summary to stdout. Purely observational: a failure to
    /// print does not undo a completed run, so it is logged rather than
    /// propagated.
    pub fn print(&self) {
        if let Err(error) = self.write_to(&mut BufWriter::new(stdout().lock())) {
            warn!("Could not print run summary: {error}");
        }
    }

    fn write_to(&self, output: &mut impl Write) -> std::io::Result<()> {
        writeln!(output, "Fraud Detection Complete!")?;
        writeln!(output, "Total transactions processed: {}", self.total)?;
        writeln!(
            output,
            "Fraudulent transactions flagged: {} (saved to {})",
            self.flagged,
            self.export_path.display()
        )?;
        output.flush()
    }
}
