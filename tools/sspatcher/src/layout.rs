//! Fixed geometry of the Shapeshifter EEPROM image.
//!
//! Names and audio data each occupy one contiguous region at an absolute
//! offset. Both image revisions share the same offsets; the long variant
//! only adds space after the data region.

/// Number of wavetables stored in an image.
pub const NUM_WT: usize = 128;

/// On-image name record: prefix followed by the user-visible name.
pub const WT_NAME_LENGTH: usize = 8;
pub const WT_NAME_PREFIX: &[u8; 2] = b"  ";
pub const WT_USER_NAME_LENGTH: usize = WT_NAME_LENGTH - WT_NAME_PREFIX.len();

/// 512 unsigned 16-bit samples per wave, 8 waves per table.
pub const WT_DATA_LENGTH: usize = 512 * 2 * 8;

pub const WT_NAME_OFFSET: u64 = 0x0F_0000;
pub const WT_DATA_OFFSET: u64 = 0x10_0000;

pub const NAME_REGION_LENGTH: usize = WT_NAME_LENGTH * NUM_WT;
pub const DATA_REGION_LENGTH: usize = WT_DATA_LENGTH * NUM_WT;

/// Longest run of one byte value tolerated in audio data. A couple of
/// static waves in a row are plausible; erased EEPROM is not.
pub const RUN_LIMIT: usize = WT_DATA_LENGTH / 4;

/// Accepted EEPROM image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Short,
    Long,
}

impl ImageSize {
    pub const ALL: [ImageSize; 2] = [ImageSize::Short, ImageSize::Long];

    pub const fn bytes(self) -> u64 {
        match self {
            ImageSize::Short => 0x20_0000,
            ImageSize::Long => 0x80_0000,
        }
    }

    pub fn from_len(len: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.bytes() == len)
    }
}

/// Absolute offsets of the name and data regions.
///
/// Readers and writers take the layout explicitly so tests can probe
/// arbitrary positions in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    pub name_offset: u64,
    pub data_offset: u64,
}

impl ImageLayout {
    pub const SHAPESHIFTER: ImageLayout = ImageLayout {
        name_offset: WT_NAME_OFFSET,
        data_offset: WT_DATA_OFFSET,
    };

    pub fn with_name_offset(self, name_offset: u64) -> Self {
        Self { name_offset, ..self }
    }

    pub fn with_data_offset(self, data_offset: u64) -> Self {
        Self { data_offset, ..self }
    }
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self::SHAPESHIFTER
    }
}
