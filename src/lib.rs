//! # rarena - A Region-Based Memory Allocator Library
//!
//! This crate provides a **region allocator**: it reserves one fixed-size
//! block of memory from the operating system up front, then serves
//! allocation and release requests out of that region using a classical
//! placement strategy.
//!
//! ## Overview
//!
//! ```text
//!   Region Allocator Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     PRE-RESERVED REGION (mmap)                       │
//!   │                                                                      │
//!   │   ┌────┬──────┬────┬──────┬────┬─────────────────────────────────┐   │
//!   │   │ H  │ used │ H  │ free │ H  │             free                │   │
//!   │   └────┴──────┴────┴──────┴────┴─────────────────────────────────┘   │
//!   │     │            │            │                                      │
//!   │     └────────────┴────────────┴── block headers, singly linked       │
//!   │                                   in address order                   │
//!   │                                                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   Allocation splits a free block; release merges adjacent free blocks.
//!   Every operation is a bounded O(n) scan over the block directory.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rarena
//!   ├── align      - Allocation-quantum rounding (align!)
//!   ├── block      - Block header record (internal)
//!   ├── arena      - Arena, Strategy, BlockInfo
//!   └── error      - ArenaError
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rarena::{Arena, Strategy};
//!
//! fn main() {
//!     let mut arena = Arena::init(1024 * 1024, Strategy::BestFit).unwrap();
//!
//!     // Allocate 100 bytes out of the region.
//!     let ptr = arena.allocate(100);
//!     assert!(!ptr.is_null());
//!
//!     // Inspect the block directory.
//!     arena.dump();
//!
//!     // Return the block; adjacent free blocks are merged.
//!     arena.free(ptr).unwrap();
//! }
//! ```
//!
//! ## How It Works
//!
//! The region is obtained once with `mmap(2)` as a private, anonymous,
//! zero-initialized mapping, rounded up to the OS page size. A header is
//! embedded at the start of each block:
//!
//! ```text
//!   Single Block:
//!   ┌───────────────────────┬────────────────────────────────┐
//!   │    Block Header       │         User Data              │
//!   │  ┌─────────────────┐  │                                │
//!   │  │ size: N         │  │  ┌──────────────────────────┐  │
//!   │  │ is_free: false  │  │  │                          │  │
//!   │  │ next: offset    │  │  │     N bytes usable       │  │
//!   │  └─────────────────┘  │  │                          │  │
//!   │      24 bytes         │  └──────────────────────────┘  │
//!   └───────────────────────┴────────────────────────────────┘
//!                           ▲
//!                           └── Pointer returned to user
//! ```
//!
//! Headers are addressed by their offset into the region rather than by
//! raw pointers, so every header access is checked against the region
//! bound. The headers tile the region exactly: the sum of header size and
//! capacity over all blocks always equals the region length.
//!
//! ## Placement Strategies
//!
//! - **FirstFit**: first free block large enough, scanning from the head.
//! - **BestFit**: smallest free block large enough (least leftover space).
//! - **WorstFit**: largest free block large enough (biggest leftover space).
//! - **NextFit**: like FirstFit, but resumes where the previous allocation
//!   left off and wraps around the directory.
//!
//! ## Features
//!
//! - **Four classical strategies**: selectable per arena at creation
//! - **Split and coalesce**: blocks are carved to fit and merged on release
//! - **Hardened release**: double frees, foreign pointers, and mid-block
//!   pointers are reported as errors instead of corrupting the directory
//! - **Introspection**: `dump` prints the directory; `blocks` iterates it
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no synchronization primitives; an `Arena`
//!   is neither `Send` nor `Sync`
//! - **Fixed region**: the region never grows; exhausted means exhausted
//! - **O(n) scans**: allocation and release both walk the directory
//! - **Unix-only**: requires `libc` and `mmap` (POSIX systems)
//!
//! ## Safety
//!
//! Creating, allocating, and freeing are safe operations; misuse of `free`
//! is detected and reported. Reading or writing through the returned raw
//! pointers is the caller's responsibility, as with any allocator.

pub mod align;
mod arena;
mod block;
mod error;

pub use arena::{Arena, BlockInfo, Strategy};
pub use block::HEADER_SIZE;
pub use error::ArenaError;
