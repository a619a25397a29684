use crate::{
    Result, Uf2Error,
    config::Uf2Options,
    view::{BlockView, all_views_with, total_payload_size},
};
use log::*;

/// Fails on the first pair of address-sorted views whose address ranges overlap.
pub fn detect_overlapping_blocks(views: &[BlockView]) -> Result<()> {
    for pair in views.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if previous.address_range().runs_into(&current.address_range()) {
            return Err(Uf2Error::Overlap {
                address: previous.address,
                length: previous.len,
                next_address: current.address,
            });
        }
    }

    Ok(())
}

/// Concatenates the payload of every block in `buffer` in ascending address order.
///
/// The physical order of the blocks within `buffer` does not affect the result.
pub fn read_linear_payload(buffer: &[u8]) -> Result<Vec<u8>> {
    read_linear_payload_with(buffer, &Uf2Options::default())
}

pub fn read_linear_payload_with(buffer: &[u8], options: &Uf2Options) -> Result<Vec<u8>> {
    let views = all_views_with(buffer, options)?;

    detect_overlapping_blocks(&views)?;

    let mut payload = Vec::with_capacity(total_payload_size(&views));
    for view in &views {
        payload.extend_from_slice(view.data(buffer));
    }

    debug!(
        "Read {} payload bytes from {} blocks",
        payload.len(),
        views.len()
    );

    Ok(payload)
}
