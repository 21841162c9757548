/// The allocation quantum: every requested payload size is rounded up to a
/// multiple of this many bytes before a block is carved for it.
pub const QUANTUM: usize = 8;

/// Rounds the given size up to the next multiple of the allocation quantum.
///
/// # Examples
///
/// ```rust
/// use rarena::align;
///
/// assert_eq!(align!(13), 16);
/// assert_eq!(align!(16), 16);
/// assert_eq!(align!(17), 24);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + $crate::align::QUANTUM - 1) & !($crate::align::QUANTUM - 1)
  };
}

#[cfg(test)]
mod tests {
  use super::QUANTUM;

  #[test]
  fn test_align() {
    let mut alignments = Vec::new();

    for i in 0..10 {
      let sizes = (QUANTUM * i + 1)..=(QUANTUM * (i + 1));

      let expected_alignment = QUANTUM * (i + 1);

      alignments.push((sizes, expected_alignment));
    }

    for (sizes, expected) in alignments {
      for size in sizes {
        assert_eq!(expected, align!(size));
      }
    }
  }

  #[test]
  fn test_align_zero() {
    assert_eq!(0, align!(0));
  }
}
