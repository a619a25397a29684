/// The flash addresses covered by a block payload, `from` inclusive and `to` exclusive.
///
/// Kept in `u64` so that a payload ending at the top of the 32 bit address space
/// does not wrap.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct AddressRange {
    pub from: u64,
    pub to: u64,
}

impl AddressRange {
    pub const fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }

    pub fn len(&self) -> u64 {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// True if `self` runs past the start of `next`.
    ///
    /// Only the start of `next` is compared, the caller walks ranges in
    /// ascending `from` order.
    pub fn runs_into(&self, next: &AddressRange) -> bool {
        self.to > next.from
    }
}
