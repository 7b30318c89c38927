/*!
 * Suite runner
 *
 * Runs every record of a vector document through a [`Verifier`], in document
 * order, stopping at the first failure. A completed run produces a
 * [`SuiteReport`] that can be written out as JSON.
 */

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::codec::{VectorOutcome, Verifier};
use crate::device::Transport;
use crate::error::KatResult;
use crate::vectors::{load_document, Record};

/// Summary of a suite run where every vector passed
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Document the vectors were read from, if any
    pub document: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Whether mismatches were downgraded to warnings
    pub debug: bool,
    pub vectors: Vec<VectorOutcome>,
}

impl SuiteReport {
    /// Number of vectors that went through both passes
    pub fn passed(&self) -> usize {
        self.vectors.len()
    }

    pub fn to_json(&self) -> KatResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> KatResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Check every record in order and stop at the first error
pub fn run_suite<T: Transport>(
    verifier: &mut Verifier<T>,
    records: &[Record],
) -> KatResult<SuiteReport> {
    let started_at = Utc::now();
    let debug = verifier.transport().debug_enabled();

    let mut vectors = Vec::with_capacity(records.len());
    for record in records {
        vectors.push(verifier.run_vector(record)?);
    }

    info!("{} vectors passed", vectors.len());
    Ok(SuiteReport {
        document: None,
        started_at,
        finished_at: Utc::now(),
        debug,
        vectors,
    })
}

/// Load a vector document and run all of its records
pub fn run_document<T: Transport, P: AsRef<Path>>(
    verifier: &mut Verifier<T>,
    path: P,
) -> KatResult<SuiteReport> {
    let path = path.as_ref();
    let records = load_document(path)?;
    info!("loaded {} vectors from {}", records.len(), path.display());

    let mut report = run_suite(verifier, &records)?;
    report.document = Some(path.to_path_buf());
    Ok(report)
}
