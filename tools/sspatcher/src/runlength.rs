//! Heuristic check that a byte block looks like audio rather than erased EEPROM.
//!
//! Wavetable samples are effectively noise at the byte level, while unused
//! EEPROM space is long stretches of one value. Blocks read from just before
//! the real data region can trip this; that is accepted.

use crate::error::{Result, SsPatcherError};
use crate::layout::RUN_LIMIT;

/// A maximal run of identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub length: usize,
    pub value: u8,
}

/// First maximal run longer than `limit`, if any.
pub fn find_long_run(block: &[u8], limit: usize) -> Option<Run> {
    let mut start = 0;
    for run in block.chunk_by(|a, b| a == b) {
        if run.len() > limit {
            return Some(Run {
                start,
                length: run.len(),
                value: run[0],
            });
        }
        start += run.len();
    }
    None
}

pub fn validate_audio_block(block: &[u8]) -> Result<()> {
    match find_long_run(block, RUN_LIMIT) {
        Some(run) => Err(SsPatcherError::SuspiciousData {
            run_length: run.length,
            byte_value: run.value,
        }),
        None => Ok(()),
    }
}
