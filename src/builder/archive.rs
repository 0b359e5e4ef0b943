//! Jar packaging.
//!
//! Writes every regular file under the compiled-output root into a zip
//! archive. Entries are written in sorted path order with a fixed
//! timestamp, so unchanged inputs produce a byte-identical archive.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::util::fs::{relative_path, to_slash};

/// Summary of a written archive.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    /// Archive location
    pub path: PathBuf,

    /// Entry names, in archive order
    pub entries: Vec<String>,
}

/// Replace `target` with an archive of every file under `root`.
pub fn create_archive(target: &Path, root: &Path) -> Result<ArchiveSummary> {
    if target.exists() {
        std::fs::remove_file(target)
            .with_context(|| format!("failed to remove old archive {}", target.display()))?;
    }

    let file = File::create(target)
        .with_context(|| format!("failed to create archive {}", target.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    tracing::info!("Building {}", target.display());

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = to_slash(&relative_path(root, entry.path()));
        tracing::debug!("Adding {}", name);

        zip.start_file(name.clone(), entry_options())
            .with_context(|| format!("failed to add {} to archive", name))?;
        let mut input = File::open(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        io::copy(&mut input, &mut zip)
            .with_context(|| format!("failed to write {} to archive", name))?;

        entries.push(name);
    }

    let writer = zip
        .finish()
        .with_context(|| format!("failed to finish archive {}", target.display()))?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("failed to flush archive {}", target.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to close archive {}", target.display()))?;

    Ok(ArchiveSummary {
        path: target.to_path_buf(),
        entries,
    })
}

/// Entry options: deflated, with the zip epoch as modification time.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}
