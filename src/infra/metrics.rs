// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per evaluation during training, next to
// the checkpoint:
//
//   step,epoch,test_loss,test_acc,train_loss,train_acc
//   0,0,0.693100,0.500000,0.693400,0.468750
//   10,0,0.688200,0.562500,0.684900,0.593750
//
// The console gets the same numbers; the CSV keeps them for
// plotting learning curves after the run.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

/// Metrics recorded at one evaluation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetrics {
    pub step:       usize,
    pub epoch:      usize,
    /// Mean per-batch cross-entropy on the test split
    pub test_loss:  f64,
    /// Mean per-batch accuracy on the test split, in [0, 1]
    pub test_acc:   f64,
    /// Loss of the training batch that triggered the evaluation
    pub train_loss: f64,
    pub train_acc:  f64,
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or create) `metrics.csv` in `dir`.
    /// The header is only written when the file is new, so reruns append.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "step,epoch,test_loss,test_acc,train_loss,train_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &StepMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{:.6},{:.6},{:.6},{:.6}",
            m.step,
            m.epoch,
            m.test_loss,
            m.test_acc,
            m.train_loss,
            m.train_acc,
        )?;

        tracing::debug!(
            "Logged step {} metrics: test_loss={:.4}, test_acc={:.4}",
            m.step,
            m.test_loss,
            m.test_acc,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample(step: usize) -> StepMetrics {
        StepMetrics {
            step,
            epoch: 0,
            test_loss: 0.5,
            test_acc: 0.75,
            train_loss: 0.25,
            train_acc: 1.0,
        }
    }

    #[test]
    fn test_header_written_once() {
        let tmp = tempfile::tempdir().unwrap();

        let logger = MetricsLogger::new(tmp.path()).unwrap();
        logger.log(&sample(0)).unwrap();

        // Reopening must not add a second header
        let logger = MetricsLogger::new(tmp.path()).unwrap();
        logger.log(&sample(10)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "step,epoch,test_loss,test_acc,train_loss,train_acc");
        assert_eq!(lines[1], "0,0,0.500000,0.750000,0.250000,1.000000");
        assert!(lines[2].starts_with("10,0,"));
    }
}
