use std::mem;

/// Offset value marking the end of the block directory.
pub const NIL: usize = usize::MAX;

/// Bytes reserved for a header at the start of each block. Kept at a
/// multiple of the allocation quantum so payloads stay 8-byte aligned.
pub const HEADER_SIZE: usize = crate::align!(mem::size_of::<Block>());

/// In-band block header. One of these sits at the start of every block in
/// the region; together they tile the region with no gaps or overlaps.
///
/// `size` is the payload capacity in bytes, header excluded. `next` is the
/// region offset of the following header in address order, or [`NIL`] for
/// the last block. There is no back-link; predecessors are found by
/// scanning from the head.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Block {
  pub size: usize,
  pub is_free: bool,
  pub next: usize,
}

impl Block {
  pub fn new(
    size: usize,
    is_free: bool,
    next: usize,
  ) -> Self {
    Self { size, is_free, next }
  }

  /// Total bytes the block occupies in the region, header included.
  pub fn tile_size(&self) -> usize {
    HEADER_SIZE + self.size
  }
}
