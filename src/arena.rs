use std::ptr;

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void};
use log::{debug, trace};

use crate::{
  align,
  block::{Block, HEADER_SIZE, NIL},
  error::ArenaError,
};

/// Placement strategy used when picking a free block for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
  /// First qualifying block scanning from the head.
  FirstFit,
  /// Qualifying block with the smallest tile size; first-encountered ties.
  BestFit,
  /// Qualifying block with the largest tile size; first-encountered ties.
  WorstFit,
  /// First qualifying block scanning from where the previous allocation
  /// left off, wrapping at the end of the directory.
  NextFit,
}

/// Snapshot of one block, as reported by [`Arena::blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
  /// Offset of the block header from the start of the region.
  pub offset: usize,
  /// Payload capacity in bytes, header excluded.
  pub size: usize,
  pub is_free: bool,
}

/// A fixed-size memory region obtained from the operating system, carved
/// into blocks on demand.
///
/// The region is reserved once by [`Arena::init`] and released when the
/// arena is dropped. Block headers live in-band at the start of each block
/// and are addressed by their offset into the region, so every header
/// access is checked against the region bound.
pub struct Arena {
  region: *mut u8,
  region_size: usize,
  strategy: Strategy,
  /// Next-fit resume offset; NIL before the first next-fit allocation.
  cursor: usize,
}

impl Arena {
  /// Reserves a region of at least `region_size` bytes and installs a
  /// single free block covering it.
  ///
  /// The size is rounded up to the OS page size, so the usable capacity is
  /// the rounded size minus one header. The region is a private anonymous
  /// mapping, zero-initialized by the kernel.
  pub fn init(
    region_size: usize,
    strategy: Strategy,
  ) -> Result<Self, ArenaError> {
    if region_size == 0 {
      return Err(ArenaError::InvalidSize);
    }

    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
    let region_size = match region_size.checked_add(page_size - 1) {
      Some(rounded) => rounded / page_size * page_size,
      // Page rounding would wrap; no mapping of this size can exist.
      None => return Err(ArenaError::MapFailed { size: region_size }),
    };

    let region = unsafe {
      libc::mmap(
        ptr::null_mut(),
        region_size,
        PROT_READ | PROT_WRITE,
        MAP_ANONYMOUS | MAP_PRIVATE,
        -1,
        0,
      )
    };

    if region == MAP_FAILED {
      return Err(ArenaError::MapFailed { size: region_size });
    }

    let mut arena = Self {
      region: region as *mut u8,
      region_size,
      strategy,
      cursor: NIL,
    };

    arena.write_block(0, Block::new(region_size - HEADER_SIZE, true, NIL));

    debug!(
      "mapped {} byte region at {:?} using {:?}",
      region_size, arena.region, strategy
    );

    Ok(arena)
  }

  /// Length of the region in bytes, after page rounding.
  pub fn region_size(&self) -> usize {
    self.region_size
  }

  fn read_block(
    &self,
    offset: usize,
  ) -> Block {
    assert!(offset + HEADER_SIZE <= self.region_size);
    unsafe { (self.region.add(offset) as *const Block).read() }
  }

  fn write_block(
    &mut self,
    offset: usize,
    block: Block,
  ) {
    assert!(offset + block.tile_size() <= self.region_size);
    unsafe { (self.region.add(offset) as *mut Block).write(block) }
  }

  /// Walks the block directory in address order.
  pub fn blocks(&self) -> impl Iterator<Item = BlockInfo> + '_ {
    let mut offset = Some(0);

    std::iter::from_fn(move || {
      let current = offset?;
      let block = self.read_block(current);

      offset = (block.next != NIL).then_some(block.next);

      Some(BlockInfo {
        offset: current,
        size: block.size,
        is_free: block.is_free,
      })
    })
  }

  fn find_first(
    &self,
    needed: usize,
  ) -> Option<usize> {
    let mut offset = 0;

    loop {
      let block = self.read_block(offset);

      if block.is_free && block.tile_size() >= needed {
        return Some(offset);
      }
      if block.next == NIL {
        return None;
      }
      offset = block.next;
    }
  }

  fn find_best(
    &self,
    needed: usize,
  ) -> Option<usize> {
    let mut best = None;
    let mut best_size = usize::MAX;
    let mut offset = 0;

    loop {
      let block = self.read_block(offset);

      if block.is_free && block.tile_size() >= needed && block.tile_size() < best_size {
        best = Some(offset);
        best_size = block.tile_size();
      }
      if block.next == NIL {
        return best;
      }
      offset = block.next;
    }
  }

  fn find_worst(
    &self,
    needed: usize,
  ) -> Option<usize> {
    let mut worst = None;
    let mut worst_size = 0;
    let mut offset = 0;

    loop {
      let block = self.read_block(offset);

      if block.is_free && block.tile_size() >= needed && block.tile_size() > worst_size {
        worst = Some(offset);
        worst_size = block.tile_size();
      }
      if block.next == NIL {
        return worst;
      }
      offset = block.next;
    }
  }

  fn find_next(
    &self,
    needed: usize,
  ) -> Option<usize> {
    let start = if self.cursor == NIL { 0 } else { self.cursor };
    let mut offset = start;

    loop {
      let block = self.read_block(offset);

      if block.is_free && block.tile_size() >= needed {
        return Some(offset);
      }

      offset = if block.next == NIL { 0 } else { block.next };
      // One full cycle without a fit.
      if offset == start {
        return None;
      }
    }
  }

  fn select_block(
    &self,
    needed: usize,
  ) -> Option<usize> {
    match self.strategy {
      Strategy::FirstFit => self.find_first(needed),
      Strategy::BestFit => self.find_best(needed),
      Strategy::WorstFit => self.find_worst(needed),
      Strategy::NextFit => self.find_next(needed),
    }
  }

  /// Hands out `size` bytes from the region, or null when no free block is
  /// large enough. A zero-size request always returns null.
  ///
  /// The request is rounded up to the allocation quantum; the returned
  /// pointer is valid for at least the rounded size until it is passed to
  /// [`Arena::free`] or the arena is dropped.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> *mut u8 {
    if size == 0 {
      return ptr::null_mut();
    }

    // Quantum rounding plus the header must not wrap; a request that
    // large can never fit in any region.
    let needed = match size
      .checked_add(align::QUANTUM - 1)
      .map(|rounded| rounded & !(align::QUANTUM - 1))
      .and_then(|rounded| rounded.checked_add(HEADER_SIZE))
    {
      Some(needed) => needed,
      None => return ptr::null_mut(),
    };

    let Some(chosen) = self.select_block(needed) else {
      debug!("out of memory: no free block can hold {} bytes", size);
      return ptr::null_mut();
    };

    let mut block = self.read_block(chosen);

    // Carve the remainder into its own free block when it can hold a
    // header; otherwise the whole block is handed out and the caller gets
    // more capacity than requested.
    if block.tile_size() >= needed + HEADER_SIZE {
      let remainder = chosen + needed;

      self.write_block(
        remainder,
        Block::new(block.tile_size() - needed - HEADER_SIZE, true, block.next),
      );

      block.size = needed - HEADER_SIZE;
      block.next = remainder;
    }

    block.is_free = false;
    self.write_block(chosen, block);

    if self.strategy == Strategy::NextFit {
      self.cursor = block.next;
    }

    trace!("allocate({}) -> block at offset {:#x}", size, chosen);

    unsafe { self.region.add(chosen + HEADER_SIZE) }
  }

  /// Returns a block to the arena, merging it with free neighbors.
  ///
  /// Passing null is a no-op. Any other pointer must be a payload address
  /// previously returned by [`Arena::allocate`] on this arena and still
  /// live; anything else is rejected with the matching [`ArenaError`]
  /// instead of corrupting the directory.
  pub fn free(
    &mut self,
    payload: *mut u8,
  ) -> Result<(), ArenaError> {
    if payload.is_null() {
      return Ok(());
    }

    let addr = payload as usize;
    let base = self.region as usize;

    if addr < base || addr >= base + self.region_size {
      return Err(ArenaError::ForeignPointer { addr });
    }
    if addr - base < HEADER_SIZE {
      return Err(ArenaError::NotBlockStart { addr });
    }

    let offset = addr - base - HEADER_SIZE;

    // Walk the directory to confirm the pointer sits on a block boundary.
    // The walk also yields the predecessor, which has no back-link.
    let mut prev = NIL;
    let mut current = 0;

    while current != offset {
      let block = self.read_block(current);

      if block.next == NIL || block.next > offset {
        return Err(ArenaError::NotBlockStart { addr });
      }
      prev = current;
      current = block.next;
    }

    let mut block = self.read_block(offset);

    if block.is_free {
      return Err(ArenaError::DoubleFree { addr });
    }
    block.is_free = true;

    // Absorb a free successor; the blocks are contiguous, so the merged
    // block keeps tiling the region exactly.
    if block.next != NIL {
      let next = self.read_block(block.next);

      if next.is_free {
        if self.cursor == block.next {
          self.cursor = offset;
        }
        block.size += next.tile_size();
        block.next = next.next;
      }
    }

    self.write_block(offset, block);

    // Absorb into a free predecessor.
    if prev != NIL {
      let mut pred = self.read_block(prev);

      if pred.is_free {
        if self.cursor == offset {
          self.cursor = prev;
        }
        pred.size += block.tile_size();
        pred.next = block.next;
        self.write_block(prev, pred);
      }
    }

    trace!("free({:#x})", addr);

    Ok(())
  }

  /// Prints every block's payload address, capacity, and state to stdout.
  pub fn dump(&self) {
    println!("Memory Dump:");

    for block in self.blocks() {
      println!(
        "{:?}: {} bytes ({})",
        unsafe { self.region.add(block.offset + HEADER_SIZE) },
        block.size,
        if block.is_free { "free" } else { "allocated" },
      );
    }

    println!();
  }
}

impl Drop for Arena {
  fn drop(&mut self) {
    unsafe {
      libc::munmap(self.region as *mut c_void, self.region_size);
    }
  }
}
