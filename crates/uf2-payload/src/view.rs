use crate::{
    Result, Uf2Error,
    address_range::AddressRange,
    config::Uf2Options,
    uf2::{
        UF2_FOOTER_SIZE, UF2_HEADER_SIZE, UF2_MAGIC_END, UF2_MAGIC_START0, UF2_MAGIC_START1,
        Uf2BlockHeader,
    },
};
use assert_into::AssertInto;
use log::*;
use std::ops::Range;

/// One block of a UF2 buffer, located by its byte offset.
///
/// A view does not borrow the buffer it was extracted from. The payload is
/// resolved on demand with [`BlockView::data`], which lets the writer mutate
/// the same storage the views were taken from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BlockView {
    /// Target flash address of the first payload byte.
    pub address: u32,
    /// Offset of the block header within the buffer.
    pub offset: usize,
    /// Payload length, clamped to the end of the buffer.
    pub len: usize,
}

impl BlockView {
    pub fn payload_range(&self) -> Range<usize> {
        let start = self.offset + UF2_HEADER_SIZE;
        start..start + self.len
    }

    /// The payload bytes of this block.
    ///
    /// # Panics
    ///
    /// If `buffer` is shorter than the buffer the view was extracted from.
    pub fn data<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.payload_range()]
    }

    pub fn address_range(&self) -> AddressRange {
        let from = u64::from(self.address);
        let len: u64 = self.len.assert_into();
        AddressRange::new(from, from + len)
    }
}

/// Extracts the block whose header starts at `offset`.
pub fn view_at(buffer: &[u8], offset: usize) -> Result<BlockView> {
    view_at_with(buffer, offset, &Uf2Options::default())
}

pub fn view_at_with(buffer: &[u8], offset: usize, options: &Uf2Options) -> Result<BlockView> {
    check_block_size(options.block_size)?;
    decode_block(buffer, offset, options).map(|(_, view)| view)
}

/// Extracts every block in `buffer`, sorted ascending by target address.
///
/// Blocks sharing an address keep their physical order.
pub fn all_views(buffer: &[u8]) -> Result<Vec<BlockView>> {
    all_views_with(buffer, &Uf2Options::default())
}

pub fn all_views_with(buffer: &[u8], options: &Uf2Options) -> Result<Vec<BlockView>> {
    check_block_size(options.block_size)?;

    let num_blocks = buffer.len().div_ceil(options.block_size);
    let mut views = Vec::with_capacity(num_blocks);

    for block_no in 0..num_blocks {
        let offset = block_no * options.block_size;
        let (header, view) = decode_block(buffer, offset, options)?;

        if options.is_strict() {
            let found: usize = header.num_blocks.get().assert_into();
            if found != num_blocks {
                return Err(Uf2Error::InconsistentBlockCount {
                    offset,
                    expected: num_blocks,
                    found,
                });
            }
        }

        debug!(
            "Block {} / {} {:#08x} ({} bytes)",
            block_no, num_blocks, view.address, view.len
        );

        views.push(view);
    }

    views.sort_by_key(|view| view.address);

    Ok(views)
}

/// Sum of the payload lengths of `views`.
pub fn total_payload_size(views: &[BlockView]) -> usize {
    views.iter().map(|view| view.len).sum()
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size < UF2_HEADER_SIZE + UF2_FOOTER_SIZE {
        return Err(Uf2Error::InvalidBlockSize(block_size));
    }
    Ok(())
}

fn decode_block(
    buffer: &[u8],
    offset: usize,
    options: &Uf2Options,
) -> Result<(Uf2BlockHeader, BlockView)> {
    let rest = buffer.get(offset..).unwrap_or_default();
    let header = Uf2BlockHeader::parse(rest).ok_or(Uf2Error::TruncatedHeader {
        offset,
        available: rest.len(),
    })?;

    let declared: usize = header.payload_size().assert_into();
    let start = offset + UF2_HEADER_SIZE;
    let end = start.saturating_add(declared);

    if options.is_strict() {
        validate_block(buffer, offset, &header, options)?;
    }

    let end = if end > buffer.len() {
        warn!(
            "Block at offset {:#x} declares {} payload bytes, only {} remain in the buffer",
            offset,
            declared,
            buffer.len() - start
        );
        buffer.len()
    } else {
        end
    };

    let view = BlockView {
        address: header.target_addr(),
        offset,
        len: end - start,
    };

    Ok((header, view))
}

fn validate_block(
    buffer: &[u8],
    offset: usize,
    header: &Uf2BlockHeader,
    options: &Uf2Options,
) -> Result<()> {
    let block_size = options.block_size;

    let available = buffer.len() - offset;
    if available < block_size {
        return Err(Uf2Error::TruncatedBlock {
            offset,
            available,
            block_size,
        });
    }

    check_magic(offset, UF2_MAGIC_START0, header.magic_start0.get())?;
    check_magic(offset + 4, UF2_MAGIC_START1, header.magic_start1.get())?;

    let footer_offset = offset + block_size - UF2_FOOTER_SIZE;
    let mut magic_end = [0; UF2_FOOTER_SIZE];
    magic_end.copy_from_slice(&buffer[footer_offset..footer_offset + UF2_FOOTER_SIZE]);
    check_magic(footer_offset, UF2_MAGIC_END, u32::from_le_bytes(magic_end))?;

    let capacity = block_size - UF2_HEADER_SIZE - UF2_FOOTER_SIZE;
    let declared: usize = header.payload_size().assert_into();
    if declared > capacity {
        return Err(Uf2Error::PayloadTooLarge {
            offset,
            declared,
            capacity,
        });
    }

    let block_no = header.block_no.get();
    let num_blocks = header.num_blocks.get();
    if block_no >= num_blocks {
        return Err(Uf2Error::BlockNumberOutOfRange {
            offset,
            block_no,
            num_blocks,
        });
    }

    Ok(())
}

fn check_magic(offset: usize, expected: u32, found: u32) -> Result<()> {
    if expected != found {
        return Err(Uf2Error::BadMagic {
            offset,
            expected,
            found,
        });
    }
    Ok(())
}
