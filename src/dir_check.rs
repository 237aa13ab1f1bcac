//! Pre-flight validation of input and output directories

use crate::error::{LoadError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Check that `inp_dir` holds at least one file whose name ends with
/// `inp_file_ext`, and that `outp_dir` is either missing (it is created)
/// or an empty directory. The two must differ.
///
/// Returns the matching input files, sorted.
pub fn check_io<P: AsRef<Path>, Q: AsRef<Path>>(
    inp_dir: P,
    outp_dir: Q,
    inp_file_ext: &str,
) -> Result<Vec<PathBuf>> {
    let inp_dir = absolute(inp_dir.as_ref())?;
    let outp_dir = absolute(outp_dir.as_ref())?;

    if inp_dir == outp_dir {
        return Err(LoadError::Validation(
            "Input and output directories cannot be the same".to_string(),
        ));
    }

    if !inp_dir.is_dir() {
        return Err(LoadError::not_found(&inp_dir));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(&inp_dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(inp_file_ext) {
            inputs.push(entry.path());
        }
    }
    if inputs.is_empty() {
        return Err(LoadError::NotFound {
            path: inp_dir,
            source: Some(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no files with {} extension", inp_file_ext),
            )),
        });
    }
    inputs.sort();

    if outp_dir.is_dir() {
        if fs::read_dir(&outp_dir)?.next().is_some() {
            return Err(LoadError::Validation(format!(
                "Output directory '{}' is not empty",
                outp_dir.display()
            )));
        }
    } else {
        fs::create_dir_all(&outp_dir)?;
        info!("Created output directory {}", outp_dir.display());
    }

    Ok(inputs)
}
