//! Flat-file artifacts: the dataset CSV and the JSON run summary.
//!
//! RULE: Artifacts are written completely or not at all.
//! Content goes to a sibling temp file first and is renamed into place.
//! A run's artifacts commit together: if any of them fails, none of
//! them is left at its target path.

use crate::{
    error::{SimError, SimResult},
    report::Report,
    table::ObservationTable,
    types::Column,
};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DELIMITER: u8 = b',';

/// Stream the table as delimited text: header row, then one record per row.
/// Values use the shortest representation that parses back to the same `f64`.
pub fn write_table<W: Write>(table: &ObservationTable, sink: W) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(sink);
    wtr.write_record(Column::ALL.iter().map(|c| c.name()))?;
    for row in table.iter_rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// The table's CSV form as a string.
pub fn render_csv(table: &ObservationTable) -> SimResult<String> {
    let mut buf = Vec::new();
    write_table(table, &mut buf).map_err(|e| SimError::Other(e.into()))?;
    String::from_utf8(buf).map_err(|e| SimError::Other(e.into()))
}

/// Write the table to `path` as CSV.
pub fn write_csv(table: &ObservationTable, path: impl AsRef<Path>) -> SimResult<()> {
    write_run(table, path, None)
}

/// Write the report to `path` as pretty JSON.
pub fn write_summary(report: &Report, path: impl AsRef<Path>) -> SimResult<()> {
    let path = path.as_ref();
    let staged = stage_summary(report, path)?;
    staged.commit()?;
    log::info!("Summary written to {}", path.display());
    Ok(())
}

/// Write every artifact of a run: the dataset, and the summary if asked.
/// Both are staged before either is renamed into place.
pub fn write_run(
    table: &ObservationTable,
    csv_path: impl AsRef<Path>,
    summary: Option<(&Report, &Path)>,
) -> SimResult<()> {
    let csv_path = csv_path.as_ref();
    let csv = Staged::write(csv_path, |w| write_table(table, w).map_err(io::Error::from))?;

    let summary = match summary {
        Some((report, path)) => match stage_summary(report, path) {
            Ok(staged) => Some(staged),
            Err(e) => {
                csv.discard();
                return Err(e);
            }
        },
        None => None,
    };

    if let Err(e) = csv.commit() {
        if let Some(staged) = summary {
            staged.discard();
        }
        return Err(e);
    }
    if let Some(staged) = summary {
        let summary_path = staged.target.clone();
        if let Err(e) = staged.commit() {
            // The dataset is already in place; take it back out.
            let _ = fs::remove_file(csv_path);
            return Err(e);
        }
        log::info!("Summary written to {}", summary_path.display());
    }

    log::info!("Dataset written to {} ({} rows)", csv_path.display(), table.rows());
    Ok(())
}

fn stage_summary(report: &Report, path: &Path) -> SimResult<Staged> {
    let json = serde_json::to_vec_pretty(report)?;
    Staged::write(path, |w| w.write_all(&json))
}

/// A fully written temp file waiting to be renamed onto its target.
struct Staged {
    tmp:    PathBuf,
    target: PathBuf,
}

impl Staged {
    fn write(
        target: &Path,
        fill: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    ) -> SimResult<Self> {
        let staged = Staged { tmp: temp_path(target), target: target.to_path_buf() };
        let result = (|| -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(&staged.tmp)?);
            fill(&mut writer)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()
        })();
        match result {
            Ok(()) => Ok(staged),
            Err(source) => Err(staged.fail(source)),
        }
    }

    fn commit(self) -> SimResult<()> {
        match fs::rename(&self.tmp, &self.target) {
            Ok(()) => Ok(()),
            Err(source) => Err(self.fail(source)),
        }
    }

    fn discard(self) {
        let _ = fs::remove_file(&self.tmp);
    }

    fn fail(self, source: io::Error) -> SimError {
        // The temp file may never have been created.
        let _ = fs::remove_file(&self.tmp);
        log::error!("Write to {} failed: {source}", self.target.display());
        SimError::WriteFailure { path: self.target, source }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
