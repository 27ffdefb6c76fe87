//! TIFF writing utilities
//!
//! Helper functions shared by the in-memory sub-image writers. TIFF
//! requires out-of-line values to begin on a word boundary.

/// Round an offset up to the next even byte
pub fn align_to_even(offset: u64) -> u64 {
    if offset % 2 != 0 {
        offset + 1
    } else {
        offset
    }
}

/// Zero-pad a slot buffer to the given width
///
/// Inline IFD values occupy the full value slot; the bytes past the packed
/// payload stay zero.
pub fn pad_slot(payload: &[u8], slot_size: usize) -> Vec<u8> {
    let mut slot = payload.to_vec();
    slot.resize(slot_size, 0);
    slot
}
