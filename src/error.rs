use thiserror::Error;

/// Failures reported by [`Arena::init`](crate::Arena::init) and
/// [`Arena::free`](crate::Arena::free).
///
/// Allocation failure is not represented here: `allocate` follows the
/// classic contract and returns a null pointer when no block fits.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
  #[error("region size must be non-zero")]
  InvalidSize,

  #[error("failed to map a {size} byte region from the operating system")]
  MapFailed { size: usize },

  #[error("pointer {addr:#x} does not belong to this arena")]
  ForeignPointer { addr: usize },

  #[error("pointer {addr:#x} is not the start of a block payload")]
  NotBlockStart { addr: usize },

  #[error("block at {addr:#x} is already free")]
  DoubleFree { addr: usize },
}
