// crates/agroreport-core/src/archive.rs

use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::{debug, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ReportError, Result};

pub const DEFAULT_ARCHIVE_NAME: &str = "Reportes_AgroReport.zip";

/// A finished document and the entry name it takes inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArchive {
    pub bytes: Vec<u8>,
    /// Entry names in archive order, after disambiguation.
    pub entries: Vec<String>,
}

impl PackagedArchive {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

/// Renames repeated entry names by inserting `_<index>` before the extension, where `index`
/// is the entry's position in `names`. First occurrences keep their name.
pub fn disambiguate_names(names: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(names.len());
    let mut resolved = Vec::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        if used.insert(name.clone()) {
            resolved.push(name.clone());
            continue;
        }

        let (stem, extension) = split_extension(name);
        let mut candidate = format!("{stem}_{index}{extension}");
        let mut attempt = 2;
        while used.contains(&candidate) {
            candidate = format!("{stem}_{index}_{attempt}{extension}");
            attempt += 1;
        }
        warn!(original = %name, renamed = %candidate, "duplicate document name");
        used.insert(candidate.clone());
        resolved.push(candidate);
    }

    resolved
}

/// Writes the documents, in order, into one ZIP archive held in memory.
///
/// Entries carry a fixed 1980-01-01 timestamp, so identical documents give an identical archive.
pub fn package_documents(documents: Vec<RenderedDocument>) -> Result<PackagedArchive> {
    let names: Vec<String> = documents.iter().map(|doc| doc.name.clone()).collect();
    let entries = disambiguate_names(&names);

    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for (entry, document) in entries.iter().zip(documents.iter()) {
        zip.start_file(entry.as_str(), options)?;
        zip.write_all(&document.bytes)?;
        debug!(entry = %entry, bytes = document.bytes.len(), "archived document");
    }

    let cursor = zip.finish()?;
    Ok(PackagedArchive {
        bytes: cursor.into_inner(),
        entries,
    })
}

/// Refuses delivery of an archive larger than `limit_bytes`. An archive exactly at the limit passes.
pub fn ensure_within_limit(actual_bytes: u64, limit_bytes: u64) -> Result<()> {
    if actual_bytes > limit_bytes {
        return Err(ReportError::OversizeArchive {
            actual_bytes,
            limit_bytes,
        });
    }
    Ok(())
}
