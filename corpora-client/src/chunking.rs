/// Default characters per chunk.
pub const DEFAULT_CHUNK_SIZE: u32 = 1024;

/// Default characters shared between adjacent chunks.
pub const DEFAULT_CHUNK_OVERLAP: u32 = 200;

/// Hard cap on overlap regardless of chunk size.
pub const MAX_OVERLAP: u32 = 512;

/// Paired chunk-size / chunk-overlap values for document segmentation.
///
/// Invariant: `0 <= chunk_overlap < chunk_size`, re-established by every
/// setter. There is no error channel — out-of-range inputs are clamped into
/// the valid domain, since this backs a live-adjusting control rather than
/// a submitted form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingParams {
    chunk_size: u32,
    chunk_overlap: u32,
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Metrics derived from the current parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkingPreview {
    /// Advance distance between successive chunk start offsets. Always >= 1.
    pub effective_stride: u32,
    /// Overlap as a percentage of the chunk size, rounded to one decimal.
    pub overlap_ratio_percent: f64,
}

impl ChunkingParams {
    /// Build a pair from raw values, clamping both into the valid domain.
    pub fn new(chunk_size: u32, chunk_overlap: u32) -> Self {
        let mut params = Self::default();
        params.set_chunk_size(chunk_size);
        params.set_chunk_overlap(chunk_overlap);
        params
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> u32 {
        self.chunk_overlap
    }

    /// Set the chunk size (floor 1), cutting the overlap back to
    /// `new_size - 1` when it would no longer fit under the new size.
    pub fn set_chunk_size(&mut self, new_size: u32) {
        self.chunk_size = new_size.max(1);
        if self.chunk_overlap >= self.chunk_size {
            self.chunk_overlap = self.chunk_size - 1;
        }
    }

    /// Set the overlap, clamped into `[0, min(chunk_size - 1, 512)]`.
    pub fn set_chunk_overlap(&mut self, new_overlap: u32) {
        self.chunk_overlap = new_overlap.min(self.chunk_size - 1).min(MAX_OVERLAP);
    }

    /// Derived preview metrics. The stride is >= 1 by the invariant and is
    /// not re-checked here.
    pub fn derive(&self) -> ChunkingPreview {
        let ratio = self.chunk_overlap as f64 / self.chunk_size as f64 * 100.0;
        ChunkingPreview {
            effective_stride: self.chunk_size - self.chunk_overlap,
            overlap_ratio_percent: (ratio * 10.0).round() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ChunkingParams::default();
        assert_eq!(params.chunk_size(), 1024);
        assert_eq!(params.chunk_overlap(), 200);
    }

    #[test]
    fn default_preview_values() {
        let preview = ChunkingParams::default().derive();
        assert_eq!(preview.effective_stride, 824);
        assert_eq!(preview.overlap_ratio_percent, 19.5);
    }

    #[test]
    fn shrinking_size_cuts_overlap_to_size_minus_one() {
        let mut params = ChunkingParams::default();
        params.set_chunk_overlap(300);
        assert_eq!(params.chunk_overlap(), 300);
        params.set_chunk_size(256);
        assert_eq!(params.chunk_overlap(), 255);
    }

    #[test]
    fn overlap_below_new_size_is_untouched() {
        let mut params = ChunkingParams::default();
        params.set_chunk_size(256);
        assert_eq!(params.chunk_overlap(), 200);
    }

    #[test]
    fn zero_size_clamps_to_one_and_zeroes_overlap() {
        let mut params = ChunkingParams::default();
        params.set_chunk_size(0);
        assert_eq!(params.chunk_size(), 1);
        assert_eq!(params.chunk_overlap(), 0);
        assert_eq!(params.derive().effective_stride, 1);
    }

    #[test]
    fn overlap_is_capped_at_512() {
        let mut params = ChunkingParams::default();
        params.set_chunk_size(2048);
        params.set_chunk_overlap(900);
        assert_eq!(params.chunk_overlap(), 512);
    }

    #[test]
    fn invariant_holds_under_any_setter_order() {
        let mut params = ChunkingParams::new(100, 99);
        for (size, overlap) in [(50u32, 200u32), (1, 1), (2048, 512), (256, 0), (3, 700)] {
            params.set_chunk_overlap(overlap);
            assert!(params.chunk_overlap() < params.chunk_size());
            params.set_chunk_size(size);
            assert!(params.chunk_overlap() < params.chunk_size());
            assert!(params.derive().effective_stride >= 1);
        }
    }

    #[test]
    fn derive_is_idempotent() {
        let params = ChunkingParams::new(768, 128);
        assert_eq!(params.derive(), params.derive());
    }
}
