//! Zip archive creation
//!
//! Traversal and writing are separate steps: [`collect_entries`] turns a
//! directory subtree into a sorted list of `(entry name, file)` pairs, and
//! [`write_archive`] streams those files into a deflate-compressed zip.
//! [`build_archive`] chains the two.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::ArchiveError;
use crate::infra::filesystem;

/// A regular file and the name it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name, `/`-separated, relative to the archive root
    pub name: String,
    /// File on disk
    pub source: PathBuf,
}

/// Collect every regular file under `source_dir`, named relative to `archive_root`
///
/// Entries come out in lexical path order. `archive_root` is usually
/// `source_dir` itself or one of its ancestors. Symlinked directories are
/// not descended into; symlinks to files are stored with the target's
/// content, dangling links are skipped.
pub fn collect_entries(
    source_dir: &Path,
    archive_root: &Path,
) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut entries = Vec::new();

    for entry in walkdir::WalkDir::new(source_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ArchiveError::Walk {
            path: source_dir.to_path_buf(),
            error: e.to_string(),
        })?;
        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(archive_root)
            .map_err(|_| ArchiveError::OutsideRoot {
                path: path.to_path_buf(),
                root: archive_root.to_path_buf(),
            })?;

        entries.push(ArchiveEntry {
            name: entry_name(relative)?,
            source: path.to_path_buf(),
        });
    }

    Ok(entries)
}

fn entry_name(relative: &Path) -> Result<String, ArchiveError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ArchiveError::InvalidEntryName {
                path: relative.to_path_buf(),
            })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

/// Write `entries` into a new archive at `archive_file`
///
/// Parent directories are created and an existing archive is replaced.
/// Entries carry a fixed timestamp so identical inputs give identical bytes.
pub fn write_archive(entries: &[ArchiveEntry], archive_file: &Path) -> Result<(), ArchiveError> {
    if let Some(parent) = archive_file.parent() {
        filesystem::create_dir_all(parent)?;
    }

    let write_err = |error: String| ArchiveError::Write {
        archive: archive_file.to_path_buf(),
        error,
    };

    let file = File::create(archive_file).map_err(|e| write_err(e.to_string()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in entries {
        let mut source = File::open(&entry.source).map_err(|e| ArchiveError::Write {
            archive: archive_file.to_path_buf(),
            error: format!("cannot read '{}': {e}", entry.source.display()),
        })?;
        zip.start_file(entry.name.clone(), options)
            .map_err(|e| write_err(e.to_string()))?;
        io::copy(&mut source, &mut zip).map_err(|e| write_err(e.to_string()))?;
    }

    let mut writer = zip.finish().map_err(|e| write_err(e.to_string()))?;
    io::Write::flush(&mut writer).map_err(|e| write_err(e.to_string()))?;
    Ok(())
}

/// Zip the subtree at `source_dir` into `archive_file`, naming entries relative to `archive_root`
pub fn build_archive(
    source_dir: &Path,
    archive_file: &Path,
    archive_root: &Path,
) -> Result<usize, ArchiveError> {
    let entries = collect_entries(source_dir, archive_root)?;
    write_archive(&entries, archive_file)?;
    tracing::debug!(
        "Wrote {} ({} entries)",
        archive_file.display(),
        entries.len()
    );
    Ok(entries.len())
}
