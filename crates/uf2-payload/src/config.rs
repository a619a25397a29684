use crate::uf2::UF2_BLOCK_SIZE;

/// How much of the block header is trusted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Validation {
    /// Only the target address and payload size are read. Magic numbers,
    /// block numbers and payload capacity are never checked, and a payload
    /// that runs off the end of the buffer is clamped.
    #[default]
    Permissive,
    /// Every block must carry valid magic numbers, a payload that fits the
    /// block, and a block number consistent with the image.
    Strict,
}

/// Options shared by the reader and the writer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Uf2Options {
    pub block_size: usize,
    pub validation: Validation,
    /// Run the overlap check before writing too. The reader always runs it.
    pub check_overlap_on_write: bool,
}

impl Default for Uf2Options {
    fn default() -> Self {
        Self {
            block_size: UF2_BLOCK_SIZE,
            validation: Validation::Permissive,
            check_overlap_on_write: false,
        }
    }
}

impl Uf2Options {
    pub fn strict() -> Self {
        Self {
            validation: Validation::Strict,
            ..Self::default()
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_overlap_check_on_write(mut self, check: bool) -> Self {
        self.check_overlap_on_write = check;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.validation == Validation::Strict
    }
}
