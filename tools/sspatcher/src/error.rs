//! Error taxonomy shared by every stage of the image codec.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = SsPatcherError> = std::result::Result<T, E>;

/// Everything that can go wrong while reading, loading or writing wavetables.
#[derive(Debug, Error)]
pub enum SsPatcherError {
    /// Image file is neither of the accepted EEPROM sizes.
    #[error("shapeshifter rom image ({}) had unexpected size (got {actual}, expected {} or {})", .path.display(), .expected[0], .expected[1])]
    BadImageSize {
        path: PathBuf,
        actual: u64,
        expected: [u64; 2],
    },

    /// Fewer bytes than a full region were available at the region offset.
    #[error("got less than {expected} bytes when reading wavetable {region} (got {actual})")]
    TruncatedRead {
        region: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Bad name prefix on the image, or a malformed `<index>_<name>` filename.
    #[error("{0}")]
    Format(String),

    /// The data region contains a run that looks like erased EEPROM.
    #[error("found a run of {run_length} bytes ({byte_value:#04X}); wavetable data looks invalid")]
    SuspiciousData { run_length: usize, byte_value: u8 },

    #[error("'{}' doesn't exist or isn't a directory; aborting", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("wavetable {name} was the wrong size (expected {expected}, got {actual})")]
    WrongSize {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate name \"{name}\" in wavetable names")]
    DuplicateName { name: String },

    #[error("found wrong number of wavetables (expected {expected}, got {actual})")]
    WrongCount { expected: usize, actual: usize },

    #[error("{} already exists; aborting so existing data isn't overwritten", .0.display())]
    DestinationExists(PathBuf),

    #[error("wavetable name ({name}) contains invalid character ({character:?})")]
    InvalidCharacter { name: String, character: char },

    /// Name and data sequences read from an image disagree in length.
    #[error("wavetable name/data had unexpected length (names: {names}, tables: {tables}, expected: {expected})")]
    LengthMismatch {
        names: usize,
        tables: usize,
        expected: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),
}
