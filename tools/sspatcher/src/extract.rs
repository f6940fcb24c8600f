//! Pulling every wavetable out of an image into its own file.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SsPatcherError};
use crate::image::{check_image_size, read_data, read_names};
use crate::layout::{ImageLayout, NUM_WT};
use crate::name::WavetableName;
use crate::table::TableData;

const PREVIEW_SAMPLE_RATE: u32 = 44_100;

/// Names and tables read from an image, in image order.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub names: Vec<WavetableName>,
    pub tables: Vec<TableData>,
}

impl Extracted {
    pub fn iter(&self) -> impl Iterator<Item = (&WavetableName, &TableData)> {
        self.names.iter().zip(&self.tables)
    }
}

/// Read and validate both regions of the image at `source`.
pub fn read_image(source: &Path) -> Result<Extracted> {
    let size = check_image_size(source)?;
    debug!("{} is a {:?} image", source.display(), size);

    let layout = ImageLayout::default();
    let mut image = File::open(source)?;
    let names = read_names(&mut image, &layout)?;
    let tables = read_data(&mut image, &layout)?;

    if names.len() != NUM_WT || tables.len() != NUM_WT {
        return Err(SsPatcherError::LengthMismatch {
            names: names.len(),
            tables: tables.len(),
            expected: NUM_WT,
        });
    }

    // Names become filenames, so collisions are checked on those.
    let mut seen = HashSet::with_capacity(NUM_WT);
    for name in &names {
        let stem = name.file_stem()?;
        if !seen.insert(stem.to_owned()) {
            return Err(SsPatcherError::DuplicateName { name: stem.to_owned() });
        }
    }

    Ok(Extracted { names, tables })
}

/// Extract every table from `source` into `destination/<name>.raw`.
///
/// `destination` must not exist yet; it is created only once the image
/// has been read and validated.
pub fn extract(source: &Path, destination: &Path) -> Result<Extracted> {
    check_image_size(source)?;
    if destination.exists() {
        return Err(SsPatcherError::DestinationExists(destination.to_path_buf()));
    }
    let extracted = read_image(source)?;

    std::fs::create_dir(destination)?;
    for (name, table) in extracted.iter() {
        let path = destination.join(format!("{}.raw", name.file_stem()?));
        std::fs::write(&path, table.as_bytes())?;
        debug!("wrote {}", path.display());
    }

    info!("extracted {} wavetables into {}", NUM_WT, destination.display());
    Ok(extracted)
}

/// Write each table as a mono 16-bit WAV for auditioning.
///
/// Sample bytes are passed through unchanged as little-endian frames.
pub fn write_wav_previews(extracted: &Extracted, directory: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: PREVIEW_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut written = Vec::with_capacity(NUM_WT);
    for (name, table) in extracted.iter() {
        let path = directory.join(format!("{}.wav", name.file_stem()?));
        let mut writer = hound::WavWriter::create(&path, spec)?;
        for frame in table.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([frame[0], frame[1]]))?;
        }
        writer.finalize()?;
        written.push(path);
    }

    info!("wrote {} previews into {}", written.len(), directory.display());
    Ok(written)
}
