//! Read and patch the wavetable bank of a Shapeshifter EEPROM image.
//!
//! The image holds 128 named wavetables: 8-byte name records at
//! `0x0F0000` and 8 KiB audio blocks at `0x100000`. Tables can be
//! extracted to a directory of `.raw` files, patched back in from such a
//! directory, or exported as a pair of Intel HEX files.

pub mod error;
pub mod extract;
pub mod fileset;
pub mod ihex;
pub mod image;
pub mod layout;
pub mod name;
pub mod patch;
pub mod runlength;
pub mod table;

pub use error::{Result, SsPatcherError};
pub use extract::{Extracted, extract, read_image, write_wav_previews};
pub use fileset::{SortMode, load_wavetables};
pub use ihex::{export_hex, write_ihex};
pub use image::{check_image_size, read_data, read_names};
pub use layout::{ImageLayout, ImageSize};
pub use name::{WavetableName, decode_name, sanitize_name};
pub use patch::{patch, patch_image};
pub use runlength::validate_audio_block;
pub use table::{TableData, WavetableSet};
