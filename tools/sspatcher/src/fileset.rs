//! Loading a directory of per-wavetable files into a [`WavetableSet`].

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, SsPatcherError};
use crate::layout::WT_DATA_LENGTH;
use crate::name::sanitize_name;
use crate::table::{TableData, WavetableSet};

/// Files dropped into directories by desktop environments.
const IGNORED_FILES: [&str; 3] = [".DS_Store", "Thumbs.db", "desktop.ini"];

/// How the files in a directory are ordered into image slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Lexicographic on the whitespace-trimmed filename stem.
    #[default]
    Lexicographic,
    /// Ascending `<index>` of `<index>_<name>` stems; the index is dropped from the name.
    IndexPrefix,
}

#[derive(Debug)]
struct Candidate {
    stem: String,
    data: Vec<u8>,
}

fn split_prefixed(stem: &str) -> Result<(i64, &str)> {
    let malformed = || {
        SsPatcherError::Format(format!(
            "--sortprefix flag given, but {stem} seems to not be formatted"
        ))
    };

    let (index, name) = stem.split_once('_').ok_or_else(malformed)?;
    let index = index.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok((index, name.trim()))
}

fn read_candidates(directory: &Path) -> Result<Vec<Candidate>> {
    if !directory.is_dir() {
        return Err(SsPatcherError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name();
        if IGNORED_FILES.iter().any(|ignored| file_name == *ignored) {
            continue;
        }
        if entry.file_type()?.is_dir() {
            debug!("skipping subdirectory {}", entry.path().display());
            continue;
        }
        paths.push(entry.path());
    }
    // read_dir order is platform dependent
    paths.sort();

    let mut candidates: Vec<Candidate> = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = std::fs::read(&path)?;

        if candidates.iter().any(|c| c.stem == stem) {
            return Err(SsPatcherError::DuplicateName { name: stem });
        }
        if data.len() != WT_DATA_LENGTH {
            return Err(SsPatcherError::WrongSize {
                name: stem,
                expected: WT_DATA_LENGTH,
                actual: data.len(),
            });
        }
        candidates.push(Candidate { stem, data });
    }
    Ok(candidates)
}

/// Load every wavetable file in `directory`, ordered by `sort`.
///
/// Names come from filename stems and go through [`sanitize_name`].
/// Duplicates are rejected both before and after sanitization, and the
/// directory must yield exactly 128 tables.
pub fn load_wavetables(directory: &Path, sort: SortMode) -> Result<WavetableSet> {
    let mut candidates = read_candidates(directory)?;

    let names: Vec<String> = match sort {
        SortMode::Lexicographic => {
            candidates.sort_by(|a, b| a.stem.trim().cmp(b.stem.trim()));
            candidates.iter().map(|c| c.stem.clone()).collect()
        }
        SortMode::IndexPrefix => {
            let mut keyed = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let (index, name) = split_prefixed(&candidate.stem)?;
                keyed.push((index, name.to_string(), candidate));
            }
            keyed.sort_by_key(|(index, _, _)| *index);

            let names = keyed.iter().map(|(_, name, _)| name.clone()).collect();
            candidates = keyed.into_iter().map(|(_, _, c)| c).collect();
            names
        }
    };

    let mut entries = Vec::with_capacity(candidates.len());
    for (name, candidate) in names.iter().zip(candidates) {
        let sanitized = sanitize_name(name)?;
        entries.push((sanitized, TableData::new(&candidate.stem, candidate.data)?));
    }

    let set = WavetableSet::new(entries)?;
    info!("loaded {} wavetables from {}", set.len(), directory.display());
    Ok(set)
}
