//! Intel HEX export of the name and data regions.
//!
//! Programmers that flash the EEPROM directly take address-tagged records
//! instead of a full image, so each region becomes its own file starting at
//! the region's absolute offset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::layout::ImageLayout;
use crate::patch::{serialize_data, serialize_names};
use crate::table::WavetableSet;

/// Data bytes per record.
pub const RECORD_DATA_LENGTH: usize = 16;

const DATA: u8 = 0x00;
const END_OF_FILE: u8 = 0x01;
const EXTENDED_LINEAR_ADDRESS: u8 = 0x04;

fn write_record<W: Write>(out: &mut W, address: u16, kind: u8, data: &[u8]) -> Result<()> {
    let [hi, lo] = address.to_be_bytes();
    let mut sum = (data.len() as u8).wrapping_add(hi).wrapping_add(lo).wrapping_add(kind);

    write!(out, ":{:02X}{:04X}{:02X}", data.len(), address, kind)?;
    for byte in data {
        sum = sum.wrapping_add(*byte);
        write!(out, "{:02X}", byte)?;
    }
    writeln!(out, "{:02X}", sum.wrapping_neg())?;
    Ok(())
}

/// Encode `bytes` as Intel HEX records starting at absolute `base_address`.
///
/// Records never straddle a 64 KiB boundary; an extended linear address
/// record precedes the first data record and every change of the upper
/// 16 address bits.
pub fn write_ihex<W: Write>(out: &mut W, base_address: u32, bytes: &[u8]) -> Result<()> {
    let mut upper: Option<u16> = None;
    let mut offset = 0usize;

    while offset < bytes.len() {
        let address = base_address + offset as u32;
        let segment = (address >> 16) as u16;
        if upper != Some(segment) {
            write_record(out, 0, EXTENDED_LINEAR_ADDRESS, &segment.to_be_bytes())?;
            upper = Some(segment);
        }

        let low = (address & 0xFFFF) as usize;
        let length = RECORD_DATA_LENGTH
            .min(bytes.len() - offset)
            .min(0x1_0000 - low);
        write_record(out, low as u16, DATA, &bytes[offset..offset + length])?;
        offset += length;
    }

    write_record(out, 0, END_OF_FILE, &[])
}

/// `<prefix>_names.hex` and `<prefix>_waves.hex`.
pub fn export_paths(prefix: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut path = prefix.components().as_path().as_os_str().to_owned();
        path.push(suffix);
        PathBuf::from(path)
    };
    (with_suffix("_names.hex"), with_suffix("_waves.hex"))
}

fn write_hex_file(path: &Path, base_address: u64, bytes: &[u8]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ihex(&mut out, base_address as u32, bytes)?;
    out.flush()?;

    info!(
        "wrote {} ({} bytes @{:#08X}, crc32 {:08X})",
        path.display(),
        bytes.len(),
        base_address,
        crc32fast::hash(bytes)
    );
    Ok(())
}

/// Write the same bytes `patch` would put in an image as two HEX files.
pub fn export_hex(set: &WavetableSet, prefix: &Path) -> Result<(PathBuf, PathBuf)> {
    let layout = ImageLayout::default();
    let (names_path, waves_path) = export_paths(prefix);
    write_hex_file(&names_path, layout.name_offset, &serialize_names(set))?;
    write_hex_file(&waves_path, layout.data_offset, &serialize_data(set))?;
    Ok((names_path, waves_path))
}
