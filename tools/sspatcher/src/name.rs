//! Conversion between on-image name records and six character names.

use std::fmt;

use tracing::warn;

use crate::error::{Result, SsPatcherError};
use crate::layout::{WT_NAME_LENGTH, WT_NAME_PREFIX, WT_USER_NAME_LENGTH};

/// A user-visible wavetable name, exactly six bytes as stored after the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WavetableName([u8; WT_USER_NAME_LENGTH]);

impl WavetableName {
    pub const fn from_bytes(bytes: [u8; WT_USER_NAME_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; WT_USER_NAME_LENGTH] {
        &self.0
    }

    /// Full on-image record, prefix included.
    pub fn encode(&self) -> [u8; WT_NAME_LENGTH] {
        let mut record = [0u8; WT_NAME_LENGTH];
        let (prefix, name) = record.split_at_mut(WT_NAME_PREFIX.len());
        prefix.copy_from_slice(WT_NAME_PREFIX);
        name.copy_from_slice(&self.0);
        record
    }

    /// The name as a filename stem, padding kept.
    ///
    /// Fails for bytes that are not UTF-8 or that could leave the
    /// directory the file is written into.
    pub fn file_stem(&self) -> Result<&str> {
        let unsafe_name = || {
            SsPatcherError::Format(format!(
                "wavetable name {:?} can't be used as a filename",
                String::from_utf8_lossy(&self.0)
            ))
        };

        let stem = std::str::from_utf8(&self.0).map_err(|_| unsafe_name())?;
        if stem.contains(['/', '\\', '\0']) || matches!(stem.trim(), "." | "..") {
            return Err(unsafe_name());
        }
        Ok(stem)
    }
}

impl fmt::Display for WavetableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' '
}

/// Strip the prefix from an on-image record.
///
/// Only the prefix is checked. A record without it means the read
/// happened at the wrong offset or the image is corrupt.
pub fn decode_name(record: &[u8; WT_NAME_LENGTH]) -> Result<WavetableName> {
    let (prefix, name) = record.split_at(WT_NAME_PREFIX.len());
    if prefix != WT_NAME_PREFIX {
        return Err(SsPatcherError::Format(format!(
            "found wavetable name ({:?}) without valid prefix",
            String::from_utf8_lossy(record)
        )));
    }

    let mut bytes = [0u8; WT_USER_NAME_LENGTH];
    bytes.copy_from_slice(name);
    Ok(WavetableName(bytes))
}

/// Turn a filename stem into a name the synth can display.
///
/// Long names are whitespace-trimmed and cut down to their last six
/// characters, since suffixes collide less often than prefixes. Short
/// names are right-justified with spaces.
pub fn sanitize_name(input: &str) -> Result<WavetableName> {
    let mut chars: Vec<char> = input.chars().collect();

    if chars.len() > WT_USER_NAME_LENGTH {
        let trimmed: Vec<char> = input.trim().chars().collect();
        chars = trimmed[trimmed.len().saturating_sub(WT_USER_NAME_LENGTH)..].to_vec();
        warn!(
            "filename \"{}\" was too long, renamed to \"{}\"",
            input,
            chars.iter().collect::<String>()
        );
    }

    // Trimming can leave the name short again.
    let padding = WT_USER_NAME_LENGTH.saturating_sub(chars.len());
    let chars: Vec<char> = std::iter::repeat_n(' ', padding).chain(chars).collect();

    if let Some(&character) = chars.iter().find(|&&ch| !is_allowed_char(ch)) {
        return Err(SsPatcherError::InvalidCharacter {
            name: chars.iter().collect(),
            character,
        });
    }

    let mut bytes = [0u8; WT_USER_NAME_LENGTH];
    for (byte, ch) in bytes.iter_mut().zip(&chars) {
        *byte = *ch as u8;
    }
    Ok(WavetableName(bytes))
}
