//! Reads and rewrites the firmware image carried by a UF2 file.
//!
//! A UF2 buffer is a run of fixed size blocks, each holding a target flash
//! address and a chunk of payload, stored in any physical order. This crate
//! reassembles the chunks into one linear payload in address order, and
//! writes a modified payload back into the same blocks in place.
//!
//! ```
//! # fn main() -> uf2_payload::Result<()> {
//! # let mut uf2: Vec<u8> = Vec::new();
//! let mut payload = uf2_payload::read_linear_payload(&uf2)?;
//! payload.iter_mut().for_each(|b| *b ^= 0xff);
//! uf2_payload::write_linear_payload_back(&mut uf2, &payload)?;
//! # Ok(())
//! # }
//! ```
//!
//! By default only the address and payload size of each block are trusted,
//! see [`Validation`] for a strict mode that also checks magic numbers and
//! block numbering.

use thiserror::Error;

pub mod address_range;
pub mod config;
pub mod read;
pub mod uf2;
pub mod view;
pub mod write;

#[cfg(test)]
mod testutil;

pub use config::{Uf2Options, Validation};
pub use read::{detect_overlapping_blocks, read_linear_payload, read_linear_payload_with};
pub use view::{BlockView, all_views, all_views_with, total_payload_size, view_at, view_at_with};
pub use write::{write_linear_payload_back, write_linear_payload_back_with};

pub type Result<T> = std::result::Result<T, Uf2Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Uf2Error {
    #[error("Overlapping blocks detected: Address {address} + {length} > {next_address}")]
    Overlap {
        address: u32,
        length: usize,
        next_address: u32,
    },
    #[error("Payload size mismatch. Cannot write back to UF2.")]
    SizeMismatch { required: usize, provided: usize },
    #[error("Block header at offset {offset:#x} is truncated, only {available} bytes remain")]
    TruncatedHeader { offset: usize, available: usize },
    #[error("Block size {0} is too small to hold a UF2 header and footer")]
    InvalidBlockSize(usize),
    #[error("Block at offset {offset:#x} is truncated: {available} of {block_size} bytes")]
    TruncatedBlock {
        offset: usize,
        available: usize,
        block_size: usize,
    },
    #[error("Bad magic at offset {offset:#x}: expected {expected:#010x}, found {found:#010x}")]
    BadMagic {
        offset: usize,
        expected: u32,
        found: u32,
    },
    #[error(
        "Block at offset {offset:#x} declares {declared} payload bytes, it can hold at most {capacity}"
    )]
    PayloadTooLarge {
        offset: usize,
        declared: usize,
        capacity: usize,
    },
    #[error("Block at offset {offset:#x} is numbered {block_no} of {num_blocks}")]
    BlockNumberOutOfRange {
        offset: usize,
        block_no: u32,
        num_blocks: u32,
    },
    #[error("Block at offset {offset:#x} claims {found} blocks, the buffer holds {expected}")]
    InconsistentBlockCount {
        offset: usize,
        expected: usize,
        found: usize,
    },
}
