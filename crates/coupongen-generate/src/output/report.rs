use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::GenerationError;
use crate::model::GenerationReport;

/// Write the run report as pretty JSON via a temp file and rename.
pub fn write_report(path: &Path, report: &GenerationReport) -> Result<(), GenerationError> {
    let data = serde_json::to_vec_pretty(report)?;
    write_bytes_atomic(path, &data)
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "invalid path for report",
        ))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}
