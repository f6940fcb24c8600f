//! Reading names and audio data out of an EEPROM image.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SsPatcherError};
use crate::layout::{
    DATA_REGION_LENGTH, ImageLayout, ImageSize, NAME_REGION_LENGTH, WT_DATA_LENGTH, WT_NAME_LENGTH,
};
use crate::name::{WavetableName, decode_name};
use crate::runlength::validate_audio_block;
use crate::table::TableData;

/// Fail unless the file at `path` is one of the accepted image sizes.
pub fn check_image_size(path: &Path) -> Result<ImageSize> {
    let actual = std::fs::metadata(path)?.len();
    ImageSize::from_len(actual).ok_or_else(|| SsPatcherError::BadImageSize {
        path: path.to_path_buf(),
        actual,
        expected: ImageSize::ALL.map(ImageSize::bytes),
    })
}

fn read_region<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    length: usize,
    region: &'static str,
) -> Result<Vec<u8>> {
    debug!("reading {} bytes of wavetable {} at {:#08X}", length, region, offset);
    source.seek(SeekFrom::Start(offset))?;

    let mut block = Vec::with_capacity(length);
    source.take(length as u64).read_to_end(&mut block)?;
    if block.len() != length {
        return Err(SsPatcherError::TruncatedRead {
            region,
            expected: length,
            actual: block.len(),
        });
    }
    Ok(block)
}

/// All 128 names, prefix stripped, in image order.
pub fn read_names<R: Read + Seek>(source: &mut R, layout: &ImageLayout) -> Result<Vec<WavetableName>> {
    let block = read_region(source, layout.name_offset, NAME_REGION_LENGTH, "names")?;

    block
        .chunks_exact(WT_NAME_LENGTH)
        .map(|chunk| {
            let mut record = [0u8; WT_NAME_LENGTH];
            record.copy_from_slice(chunk);
            decode_name(&record)
        })
        .collect()
}

/// All 128 audio blocks in image order.
///
/// The whole region is checked for erased-looking runs before it is split.
pub fn read_data<R: Read + Seek>(source: &mut R, layout: &ImageLayout) -> Result<Vec<TableData>> {
    let block = read_region(source, layout.data_offset, DATA_REGION_LENGTH, "audio data")?;
    validate_audio_block(&block)?;

    block
        .chunks_exact(WT_DATA_LENGTH)
        .enumerate()
        .map(|(i, chunk)| TableData::from_slice(&format!("#{i}"), chunk))
        .collect()
}
