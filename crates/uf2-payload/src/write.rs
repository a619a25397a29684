use crate::{
    Result, Uf2Error,
    config::Uf2Options,
    read::detect_overlapping_blocks,
    view::{all_views_with, total_payload_size},
};
use log::*;

/// Spreads `payload` back over the blocks of `buffer` in ascending address order.
///
/// Each block keeps its header, address and payload length; only its payload
/// bytes are replaced. Bytes of `payload` beyond what the blocks hold are
/// ignored. If `payload` is too short the call fails and `buffer` is left
/// untouched.
///
/// Overlapping blocks are not checked for unless
/// [`Uf2Options::check_overlap_on_write`] is set.
pub fn write_linear_payload_back<'a>(
    buffer: &'a mut [u8],
    payload: &[u8],
) -> Result<&'a mut [u8]> {
    write_linear_payload_back_with(buffer, payload, &Uf2Options::default())
}

pub fn write_linear_payload_back_with<'a>(
    buffer: &'a mut [u8],
    payload: &[u8],
    options: &Uf2Options,
) -> Result<&'a mut [u8]> {
    let views = all_views_with(buffer, options)?;

    if options.check_overlap_on_write {
        detect_overlapping_blocks(&views)?;
    }

    let required = total_payload_size(&views);
    if required > payload.len() {
        return Err(Uf2Error::SizeMismatch {
            required,
            provided: payload.len(),
        });
    }

    if payload.len() > required {
        debug!(
            "Ignoring {} trailing payload bytes",
            payload.len() - required
        );
    }

    let mut payload_offset = 0;
    for view in &views {
        let next = payload_offset + view.len;
        buffer[view.payload_range()].copy_from_slice(&payload[payload_offset..next]);
        payload_offset = next;
    }

    debug!(
        "Wrote {} payload bytes to {} blocks",
        required,
        views.len()
    );

    Ok(buffer)
}
