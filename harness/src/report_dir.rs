//! Report directory persistence: write and verify a [`SolveReportV1`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   solve_report.json    canonical JSON, graph excluded
//!   search_graph.json    canonical JSON of the full SearchGraphV1
//!   report_digest.txt    ASCII digest of solve_report.json ("sha256:...")
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra file → error
//! - Non-canonical JSON → error
//! - `graph_digest` or `report_digest.txt` mismatch → error

use std::collections::BTreeSet;
use std::path::Path;

use trikey_kernel::proof::canon::canonical_json_bytes;
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::runner::SolveReportV1;

const REPORT_FILENAME: &str = "solve_report.json";
const GRAPH_FILENAME: &str = "search_graph.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

const REPORT_FILES: &[&str] = &[REPORT_FILENAME, GRAPH_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
    CanonError { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error verifying a report directory.
#[derive(Debug)]
pub enum ReportDirVerifyError {
    /// I/O error during read.
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// A file outside the fixed layout exists.
    ExtraFile { name: String },
    /// A JSON file failed to parse.
    ParseError { filename: String, detail: String },
    /// A JSON file is not in canonical form.
    NonCanonical { filename: String },
    /// `solve_report.json` lacks a string `graph_digest`.
    MissingGraphDigest,
    /// `search_graph.json` does not hash to the report's `graph_digest`.
    GraphDigestMismatch { declared: String, recomputed: String },
    /// `report_digest.txt` does not match the recomputed report digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ParseError { filename, detail } => {
                write!(f, "{filename} parse error: {detail}")
            }
            Self::NonCanonical { filename } => write!(f, "{filename} is not canonical JSON"),
            Self::MissingGraphDigest => f.write_str("solve report has no graph_digest"),
            Self::GraphDigestMismatch {
                declared,
                recomputed,
            } => write!(
                f,
                "graph digest mismatch: declared={declared}, recomputed={recomputed}"
            ),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for ReportDirVerifyError {}

/// Write `report` to `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure or canonical JSON error.
pub fn write_report_dir(report: &SolveReportV1, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all {}: {e}", dir.display()),
    })?;

    let canon = |e: trikey_kernel::proof::canon::CanonError| ReportDirWriteError::CanonError {
        detail: e.to_string(),
    };
    let report_bytes = report.to_canonical_json_bytes().map_err(canon)?;
    let graph_bytes = report.graph.to_canonical_json_bytes().map_err(canon)?;
    let digest = canonical_hash(HashDomain::SolveReport, &report_bytes);

    write_atomic(dir.join(GRAPH_FILENAME), &graph_bytes)?;
    write_atomic(dir.join(REPORT_FILENAME), &report_bytes)?;
    write_atomic(dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;
    Ok(())
}

/// Verify a report directory written by [`write_report_dir`].
///
/// Returns the verified report digest.
///
/// # Errors
///
/// Returns [`ReportDirVerifyError`] on the first integrity failure.
pub fn verify_report_dir(dir: &Path) -> Result<ContentHash, ReportDirVerifyError> {
    let present = list_files(dir)?;
    for name in REPORT_FILES {
        if !present.contains(*name) {
            return Err(ReportDirVerifyError::MissingFile {
                filename: (*name).to_string(),
            });
        }
    }
    if let Some(extra) = present.iter().find(|n| !REPORT_FILES.contains(&n.as_str())) {
        return Err(ReportDirVerifyError::ExtraFile {
            name: extra.clone(),
        });
    }

    let report_bytes = read_file(dir, REPORT_FILENAME)?;
    let report = parse_canonical(REPORT_FILENAME, &report_bytes)?;
    let graph_bytes = read_file(dir, GRAPH_FILENAME)?;
    parse_canonical(GRAPH_FILENAME, &graph_bytes)?;

    let declared = report
        .get("graph_digest")
        .and_then(serde_json::Value::as_str)
        .ok_or(ReportDirVerifyError::MissingGraphDigest)?;
    let recomputed_graph = canonical_hash(HashDomain::SearchGraph, &graph_bytes);
    if declared != recomputed_graph.as_str() {
        return Err(ReportDirVerifyError::GraphDigestMismatch {
            declared: declared.to_string(),
            recomputed: recomputed_graph.as_str().to_string(),
        });
    }

    let stored = read_file(dir, DIGEST_FILENAME)?;
    let stored = String::from_utf8_lossy(&stored).trim().to_string();
    let recomputed = canonical_hash(HashDomain::SolveReport, &report_bytes);
    if stored != recomputed.as_str() {
        return Err(ReportDirVerifyError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(recomputed)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes to a path via temp file + rename.
fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })?;
    Ok(())
}

fn read_file(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirVerifyError> {
    std::fs::read(dir.join(filename)).map_err(|e| ReportDirVerifyError::Io {
        detail: format!("read {filename}: {e}"),
    })
}

/// Parse `bytes` as JSON and require that re-canonicalizing reproduces them.
fn parse_canonical(
    filename: &str,
    bytes: &[u8],
) -> Result<serde_json::Value, ReportDirVerifyError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ReportDirVerifyError::ParseError {
            filename: filename.to_string(),
            detail: e.to_string(),
        })?;
    let canonical = canonical_json_bytes(&value).map_err(|_| ReportDirVerifyError::NonCanonical {
        filename: filename.to_string(),
    })?;
    if canonical != bytes {
        return Err(ReportDirVerifyError::NonCanonical {
            filename: filename.to_string(),
        });
    }
    Ok(value)
}

/// Regular files in `dir`, hidden temp files skipped.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirVerifyError> {
    let io = |e: std::io::Error| ReportDirVerifyError::Io {
        detail: format!("read_dir {}: {e}", dir.display()),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if entry.file_type().map_err(io)?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(".tmp_") {
                    files.insert(name.to_string());
                }
            }
        }
    }
    Ok(files)
}
