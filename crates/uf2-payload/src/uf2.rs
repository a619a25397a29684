use static_assertions::const_assert;
use std::mem;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned, byteorder::little_endian::U32,
};

pub const UF2_MAGIC_START0: u32 = 0x0A324655;
pub const UF2_MAGIC_START1: u32 = 0x9E5D5157;
pub const UF2_MAGIC_END: u32 = 0x0AB16F30;

pub const UF2_BLOCK_SIZE: usize = 512;
pub const UF2_HEADER_SIZE: usize = 32;
pub const UF2_FOOTER_SIZE: usize = 4;

pub const UF2_FLASH_ADDR_FIELD_OFFSET: usize = 12;
pub const UF2_BLOCK_PAYLOAD_FIELD_OFFSET: usize = 16;

/// The 32 byte header at the start of every UF2 block.
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
pub struct Uf2BlockHeader {
    pub magic_start0: U32,
    pub magic_start1: U32,
    pub flags: U32,
    pub target_addr: U32,
    pub payload_size: U32,
    pub block_no: U32,
    pub num_blocks: U32,
    pub file_size: U32, // or familyID
}

const_assert!(mem::size_of::<Uf2BlockHeader>() == UF2_HEADER_SIZE);
const_assert!(mem::offset_of!(Uf2BlockHeader, target_addr) == UF2_FLASH_ADDR_FIELD_OFFSET);
const_assert!(mem::offset_of!(Uf2BlockHeader, payload_size) == UF2_BLOCK_PAYLOAD_FIELD_OFFSET);
const_assert!(UF2_BLOCK_SIZE >= UF2_HEADER_SIZE + UF2_FOOTER_SIZE);

impl Uf2BlockHeader {
    /// Decodes the header at the start of `bytes`, or `None` if fewer than 32 bytes remain.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        Self::read_from_prefix(bytes).ok().map(|(header, _)| header)
    }

    pub fn target_addr(&self) -> u32 {
        self.target_addr.get()
    }

    pub fn payload_size(&self) -> u32 {
        self.payload_size.get()
    }
}
