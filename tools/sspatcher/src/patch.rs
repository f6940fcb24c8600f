//! Writing a [`WavetableSet`] into an existing EEPROM image.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::image::check_image_size;
use crate::layout::{DATA_REGION_LENGTH, ImageLayout, NAME_REGION_LENGTH};
use crate::table::WavetableSet;

/// Name region bytes: every name with its prefix, in set order.
pub fn serialize_names(set: &WavetableSet) -> Vec<u8> {
    let mut blob = Vec::with_capacity(NAME_REGION_LENGTH);
    for name in set.names() {
        blob.extend_from_slice(&name.encode());
    }
    blob
}

/// Data region bytes: every table back to back, in set order.
pub fn serialize_data(set: &WavetableSet) -> Vec<u8> {
    let mut blob = Vec::with_capacity(DATA_REGION_LENGTH);
    for table in set.tables() {
        blob.extend_from_slice(table);
    }
    blob
}

/// Overwrite the name and data regions of `image` in place.
///
/// A failure partway through leaves the image half written.
pub fn patch_image<W: Write + Seek>(set: &WavetableSet, image: &mut W, layout: &ImageLayout) -> Result<()> {
    let names = serialize_names(set);
    image.seek(SeekFrom::Start(layout.name_offset))?;
    image.write_all(&names)?;

    let data = serialize_data(set);
    image.seek(SeekFrom::Start(layout.data_offset))?;
    image.write_all(&data)?;
    image.flush()?;

    info!(
        "wrote names @{:#08X} (crc32 {:08X}) and waves @{:#08X} (crc32 {:08X})",
        layout.name_offset,
        crc32fast::hash(&names),
        layout.data_offset,
        crc32fast::hash(&data),
    );
    Ok(())
}

/// Patch the image file at `destination` with `set`.
pub fn patch(set: &WavetableSet, destination: &Path) -> Result<()> {
    check_image_size(destination)?;

    let mut image = OpenOptions::new().read(true).write(true).open(destination)?;
    patch_image(set, &mut image, &ImageLayout::default())?;
    image.sync_all()?;
    Ok(())
}
