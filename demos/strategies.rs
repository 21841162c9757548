use rarena::{Arena, Strategy};

fn main() {
  // --------------------------------------------------------------------
  // 1) Reserve a 1 MiB region managed with the best-fit strategy.
  // --------------------------------------------------------------------
  println!("Initializing a 1 MiB arena using BestFit");
  let mut arena = Arena::init(1024 * 1024, Strategy::BestFit).unwrap();

  // --------------------------------------------------------------------
  // 2) Allocate ten blocks of doubling sizes, starting at 1 byte.
  //    Odd sizes get rounded up to the 8-byte allocation quantum.
  // --------------------------------------------------------------------
  println!("Allocating 10 blocks of doubling sizes");
  let mut blocks = Vec::new();
  for i in 0..10 {
    let size = if i == 0 { 1 } else { 8 << i };
    let ptr = arena.allocate(size);
    println!("Allocated block {} of size {} bytes at {:?}", i, size, ptr);
    blocks.push(ptr);
  }

  println!("\nMemory state after allocations:");
  arena.dump();

  // --------------------------------------------------------------------
  // 3) Free every other block to fragment the region, then watch the
  //    directory: freed neighbors of the tail merge back into it.
  // --------------------------------------------------------------------
  println!("Freeing blocks 0, 3, 5, 7, 9");
  for i in [0, 3, 5, 7, 9] {
    arena.free(blocks[i]).unwrap();
    blocks[i] = std::ptr::null_mut();
  }

  println!("Memory state after frees:");
  arena.dump();

  // --------------------------------------------------------------------
  // 4) A 500 byte request now has several holes to choose from.
  //    Best-fit picks the one wasting the least space.
  // --------------------------------------------------------------------
  println!("Allocating a 500 byte block");
  let ptr = arena.allocate(500);
  println!("Best-fit placed it at {:?}", ptr);

  println!("Memory state after the 500 byte allocation:");
  arena.dump();

  arena.free(ptr).unwrap();

  // --------------------------------------------------------------------
  // 5) Freeing twice is caught instead of corrupting the directory.
  // --------------------------------------------------------------------
  match arena.free(ptr) {
    Ok(()) => println!("double free went unnoticed!"),
    Err(err) => println!("Double free rejected: {}", err),
  }

  // --------------------------------------------------------------------
  // 6) Arenas are independent: a second one can use a different strategy.
  // --------------------------------------------------------------------
  println!("\nTesting WorstFit allocation on a fresh arena");
  let mut arena = Arena::init(1024 * 1024, Strategy::WorstFit).unwrap();
  let a = arena.allocate(1);
  let b = arena.allocate(16);
  let c = arena.allocate(32);
  arena.dump();

  arena.free(a).unwrap();
  arena.free(b).unwrap();
  arena.free(c).unwrap();
}
