use crate::uf2::{
    UF2_BLOCK_SIZE, UF2_FOOTER_SIZE, UF2_HEADER_SIZE, UF2_MAGIC_END, UF2_MAGIC_START0,
    UF2_MAGIC_START1, Uf2BlockHeader,
};
use env_logger::Env;
use zerocopy::{IntoBytes, byteorder::little_endian::U32};

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default())
        .is_test(true)
        .try_init();
}

/// A well formed 512 byte block holding `payload` for `address`.
pub fn block(address: u32, payload: &[u8]) -> Vec<u8> {
    block_sized(address, payload, UF2_BLOCK_SIZE)
}

pub fn block_sized(address: u32, payload: &[u8], block_size: usize) -> Vec<u8> {
    let header = Uf2BlockHeader {
        magic_start0: U32::new(UF2_MAGIC_START0),
        magic_start1: U32::new(UF2_MAGIC_START1),
        flags: U32::new(0),
        target_addr: U32::new(address),
        payload_size: U32::new(payload.len() as u32),
        block_no: U32::new(0),
        num_blocks: U32::new(1),
        file_size: U32::new(0),
    };

    let mut block = vec![0; block_size];
    block[..UF2_HEADER_SIZE].copy_from_slice(header.as_bytes());
    block[UF2_HEADER_SIZE..UF2_HEADER_SIZE + payload.len()].copy_from_slice(payload);
    block[block_size - UF2_FOOTER_SIZE..].copy_from_slice(&UF2_MAGIC_END.to_le_bytes());
    block
}

/// Concatenates `blocks` in the given physical order and numbers them.
pub fn image(blocks: &[Vec<u8>]) -> Vec<u8> {
    let num_blocks = blocks.len() as u32;
    let mut buffer = Vec::new();

    for (block_no, block) in blocks.iter().enumerate() {
        let offset = buffer.len();
        buffer.extend_from_slice(block);
        set_header(&mut buffer, offset, |h| {
            h.block_no.set(block_no as u32);
            h.num_blocks.set(num_blocks);
        });
    }

    buffer
}

/// Rewrites the header of the block at `offset`.
pub fn set_header(buffer: &mut [u8], offset: usize, edit: impl FnOnce(&mut Uf2BlockHeader)) {
    let mut header = Uf2BlockHeader::parse(&buffer[offset..]).unwrap();
    edit(&mut header);
    buffer[offset..offset + UF2_HEADER_SIZE].copy_from_slice(header.as_bytes());
}
