#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use sspatcher::ImageSize;
use sspatcher::layout::{NUM_WT, WT_DATA_LENGTH, WT_DATA_OFFSET, WT_NAME_OFFSET};

pub fn random_table(rng: &mut StdRng) -> Vec<u8> {
    let mut table = vec![0u8; WT_DATA_LENGTH];
    rng.fill_bytes(&mut table);
    table
}

/// Write one `<name>.raw` per entry of `names` with random contents.
pub fn write_tables(dir: &Path, names: &[String], seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    names
        .iter()
        .map(|name| {
            let table = random_table(&mut rng);
            fs::write(dir.join(format!("{name}.raw")), &table).unwrap();
            table
        })
        .collect()
}

pub fn numbered_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

/// A short image shaped like a factory dump: erased EEPROM everywhere
/// except valid name records and random audio data.
pub fn factory_like_image(dir: &Path, seed: u64) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut image = vec![0xFFu8; ImageSize::Short.bytes() as usize];

    let name_start = WT_NAME_OFFSET as usize;
    for i in 0..NUM_WT {
        let record = format!("  {:>6}", format!("Fac{i}"));
        image[name_start + i * 8..name_start + (i + 1) * 8].copy_from_slice(record.as_bytes());
    }

    let data_start = WT_DATA_OFFSET as usize;
    rng.fill_bytes(&mut image[data_start..data_start + NUM_WT * WT_DATA_LENGTH]);

    let path = dir.join("shapeshifter.bin");
    fs::write(&path, image).unwrap();
    path
}

/// Minimal Intel HEX reader, enough to check exported files.
pub fn parse_ihex(text: &str) -> (u32, Vec<u8>) {
    let mut upper = 0u32;
    let mut start = None;
    let mut bytes = Vec::new();

    for line in text.lines() {
        let raw: Vec<u8> = (1..line.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&line[i..i + 2], 16).unwrap())
            .collect();
        assert_eq!(raw.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)), 0, "bad checksum: {line}");

        let len = raw[0] as usize;
        let address = u16::from_be_bytes([raw[1], raw[2]]) as u32;
        let data = &raw[4..4 + len];
        match raw[3] {
            0x00 => {
                let absolute = upper | address;
                let base = *start.get_or_insert(absolute);
                assert_eq!(absolute, base + bytes.len() as u32, "gap in records");
                bytes.extend_from_slice(data);
            }
            0x01 => break,
            0x04 => upper = (u16::from_be_bytes([data[0], data[1]]) as u32) << 16,
            other => panic!("unexpected record type {other}"),
        }
    }
    (start.unwrap_or(0), bytes)
}
