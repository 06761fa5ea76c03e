//! This is the chunk data format used in 1.16+. Values are never split across
//! two longs; instead, the unused high bits of each long are left as padding.

use std::{error::Error, fmt};

/// A fixed size, read only array of small integers, packed into longs. Every
/// element takes up `bpe` bits, and each long stores `64 / bpe` elements,
/// starting at the lowest bits.
///
/// This is used to separate out the nasty bitwise operations, and make the
/// [`CachedSection`](super::CachedSection) code a lot cleaner.
#[derive(Clone, PartialEq, Eq)]
pub struct BitArray {
  /// Bits per entry. This is only 0 for a constant array, which has no data.
  bpe:  u8,
  /// Number of entries
  len:  usize,
  /// The actual data
  data: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitArrayError {
  /// Bits per entry must be within `1..=32`.
  InvalidWidth(u8),
  /// There were not enough longs to hold every element.
  NotEnoughData { expected: usize, got: usize },
  /// An index was passed that is not within `0..len`.
  OutOfRange { index: usize, len: usize },
}

impl fmt::Display for BitArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::InvalidWidth(bpe) => write!(f, "invalid bits per entry {bpe} (must be within 1..=32)"),
      Self::NotEnoughData { expected, got } => {
        write!(f, "expected at least {expected} longs of data, got {got}")
      }
      Self::OutOfRange { index, len } => {
        write!(f, "index {index} is out of range (must be less than {len})")
      }
    }
  }
}

impl Error for BitArrayError {}

impl fmt::Debug for BitArray {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.bpe == 0 {
      return write!(f, "BitArray {{ constant, len: {} }}", self.len);
    }
    writeln!(f, "BitArray {{")?;
    for v in &self.data {
      self.dbg_binary(f, *v)?;
    }
    writeln!(f, "}}")?;
    Ok(())
  }
}

/// Returns the number of bits needed to store every index into a palette with
/// `len` entries. This is `ceil(log2(len))`, so a palette with a single entry
/// needs 0 bits.
pub const fn bits_for(len: usize) -> u8 {
  if len <= 1 {
    0
  } else {
    (usize::BITS - (len - 1).leading_zeros()) as u8
  }
}

impl BitArray {
  /// Wraps the given longs. `len` is the number of elements stored, and `bpe`
  /// is the number of bits for each element.
  ///
  /// This fails if `bpe` is outside of `1..=32`, or if `data` has less than
  /// [`longs_for(bpe, len)`](Self::longs_for) longs. Any extra longs are kept,
  /// but never read.
  pub fn from_data(bpe: u8, len: usize, data: Vec<u64>) -> Result<Self, BitArrayError> {
    if bpe == 0 || bpe > 32 {
      return Err(BitArrayError::InvalidWidth(bpe));
    }
    let expected = Self::longs_for(bpe, len);
    if data.len() < expected {
      return Err(BitArrayError::NotEnoughData { expected, got: data.len() });
    }
    Ok(BitArray { bpe, len, data })
  }

  /// Creates an array where every element is 0, without storing any data.
  /// Sections filled with a single block are stored like this.
  pub fn constant(len: usize) -> Self { BitArray { bpe: 0, len, data: vec![] } }

  /// Returns the number of longs needed to store `len` elements, each `bpe`
  /// bits wide.
  ///
  /// # Panics
  /// - If `bpe` is 0 or larger than 64.
  pub const fn longs_for(bpe: u8, len: usize) -> usize {
    let epl = 64 / bpe as usize;
    (len + epl - 1) / epl
  }

  /// This is useful for debugging internal data; it will print out the number
  /// in binary format, with spaces inserted between every element.
  fn dbg_binary(&self, f: &mut fmt::Formatter, val: u64) -> fmt::Result {
    writeln!(
      f,
      "  {}",
      format!("{:064b}", val)
        .chars()
        .collect::<Vec<char>>()
        .rchunks(self.bpe.into())
        .map(|arr| arr.iter().collect::<String>())
        .rev()
        .collect::<Vec<String>>()
        .join(" ")
    )
  }

  /// Reads an element from the array. The returned value will always be within
  /// `0..1 << self.bpe`.
  ///
  /// # Panics
  /// - If `index` is outside of `0..self.len()`. This is always checked, as an
  ///   invalid index here is a bug in the caller, not bad data.
  #[inline(always)]
  #[track_caller]
  pub fn get(&self, index: usize) -> u32 {
    match self.try_get(index) {
      Ok(v) => v,
      Err(e) => panic!("{e}"),
    }
  }

  /// Reads an element from the array, or returns an error if `index` is outside
  /// of `0..self.len()`.
  #[inline(always)]
  pub fn try_get(&self, index: usize) -> Result<u32, BitArrayError> {
    if index >= self.len {
      return Err(BitArrayError::OutOfRange { index, len: self.len });
    }
    Ok(self.read(index))
  }

  /// Reads an element. `index` must already be checked against `len`, and the
  /// constructor made sure the longs are long enough.
  #[inline(always)]
  fn read(&self, index: usize) -> u32 {
    if self.bpe == 0 {
      return 0;
    }
    let epl = 64 / self.bpe as usize;
    let bpe: usize = self.bpe.into();
    let idx = index / epl;
    let shift = (index % epl) * bpe;
    let mask = (1_u64 << bpe) - 1;
    ((self.data[idx] >> shift) & mask) as u32
  }

  /// Iterates over every element, in order.
  pub fn iter(&self) -> impl Iterator<Item = u32> + '_ { (0..self.len).map(|i| self.read(i)) }

  /// Returns the number of bits that every element in this array uses. This is
  /// 0 for constant arrays.
  pub fn bpe(&self) -> u8 { self.bpe }
  /// Returns the number of elements in this array.
  pub fn len(&self) -> usize { self.len }
  pub fn is_empty(&self) -> bool { self.len == 0 }
  /// Returns true if this array was created with [`constant`](Self::constant).
  pub fn is_constant(&self) -> bool { self.bpe == 0 }
  /// Returns the inner long array.
  pub fn long_array(&self) -> &[u64] { &self.data }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  /// Packs the given values the same way vanilla does. Only used to build test
  /// data.
  fn pack(bpe: u8, values: &[u32]) -> Vec<u64> {
    let epl = 64 / bpe as usize;
    let mut data = vec![0; BitArray::longs_for(bpe, values.len())];
    for (i, &v) in values.iter().enumerate() {
      data[i / epl] |= u64::from(v) << ((i % epl) * bpe as usize);
    }
    data
  }

  #[test]
  fn test_get() {
    let data: Vec<u64> = vec![u64::MAX; (4096 + (64 / 5) - 1) / (64 / 5)];
    let arr = BitArray::from_data(5, 4096, data).unwrap();
    for i in 0..4096 {
      assert_eq!(arr.get(i), 31, "failed at {}", i);
    }

    let data: Vec<u64> = vec![0x7777777777777777; (4096 + (64 / 4) - 1) / (64 / 4)];
    let arr = BitArray::from_data(4, 4096, data).unwrap();
    for i in 0..4096 {
      assert_eq!(arr.get(i), 7, "failed at {}", i);
    }
  }

  #[test]
  fn test_get_palette() {
    let mut data = vec![0; (4096 + (64 / 4) - 1) / (64 / 4)];
    data[0] = 0xfaf;
    let a = BitArray::from_data(4, 4096, data).unwrap();
    // Sanity check
    assert_eq!(a.get(0), 0xf);
    assert_eq!(a.get(1), 0xa);
    assert_eq!(a.get(2), 0xf);
    assert_eq!(a.get(3), 0x0);

    let mut data = vec![0; (4096 + (64 / 5) - 1) / (64 / 5)];
    // This format doesn't have split longs, so this ends up being very simple.
    data[0] = 0x1f << 10 | 0x1f;
    data[1] = 0x1f;
    let a = BitArray::from_data(5, 4096, data).unwrap();
    assert_eq!(a.get(0), 0x1f);
    assert_eq!(a.get(1), 0x0);
    assert_eq!(a.get(2), 0x1f);
    // The 4 high bits of the first long are padding, so element 12 is the
    // first element in the second long.
    assert_eq!(a.get(11), 0x0);
    assert_eq!(a.get(12), 0x1f);
  }

  #[test]
  fn padding_is_ignored() {
    // 9 bits per entry leaves one unused bit at the top of each long.
    let mut data = pack(9, &[0x1ff; 256]);
    for v in &mut data {
      *v |= 1 << 63;
    }
    let arr = BitArray::from_data(9, 256, data).unwrap();
    assert!(arr.iter().all(|v| v == 0x1ff));
  }

  #[test]
  fn every_width() {
    for bpe in 1..=32_u8 {
      let max = if bpe == 32 { u32::MAX } else { (1 << bpe) - 1 };
      let values: Vec<u32> =
        (0..300_u32).map(|i| i.wrapping_mul(2654435761) & max).collect();
      let arr = BitArray::from_data(bpe, values.len(), pack(bpe, &values)).unwrap();
      assert_eq!(arr.len(), values.len());
      assert_eq!(arr.iter().collect::<Vec<_>>(), values, "bpe {bpe}");
    }
  }

  #[test]
  fn heightmap_layout() {
    // Heightmaps are 256 entries at 9 bits, which is 7 per long.
    assert_eq!(BitArray::longs_for(9, 256), 37);
    assert_eq!(BitArray::longs_for(4, 4096), 256);
    assert_eq!(BitArray::longs_for(5, 4096), 342);
    assert_eq!(BitArray::longs_for(1, 64), 1);
    assert_eq!(BitArray::longs_for(3, 64), 4);
  }

  #[test]
  fn constant() {
    let arr = BitArray::constant(4096);
    assert!(arr.is_constant());
    assert_eq!(arr.bpe(), 0);
    assert_eq!(arr.get(0), 0);
    assert_eq!(arr.get(4095), 0);
    assert_eq!(arr.try_get(4096), Err(BitArrayError::OutOfRange { index: 4096, len: 4096 }));
  }

  #[test]
  fn invalid() {
    assert_eq!(BitArray::from_data(0, 64, vec![0]), Err(BitArrayError::InvalidWidth(0)));
    assert_eq!(BitArray::from_data(33, 64, vec![0; 64]), Err(BitArrayError::InvalidWidth(33)));
    assert_eq!(
      BitArray::from_data(4, 4096, vec![0; 255]),
      Err(BitArrayError::NotEnoughData { expected: 256, got: 255 })
    );
    // Extra data is fine
    assert!(BitArray::from_data(4, 4096, vec![0; 300]).is_ok());
  }

  #[test]
  #[should_panic(expected = "out of range")]
  fn out_of_range() {
    let arr = BitArray::from_data(4, 16, vec![0]).unwrap();
    arr.get(16);
  }

  #[test]
  fn test_bits_for() {
    assert_eq!(bits_for(1), 0);
    assert_eq!(bits_for(2), 1);
    assert_eq!(bits_for(3), 2);
    assert_eq!(bits_for(4), 2);
    assert_eq!(bits_for(5), 3);
    assert_eq!(bits_for(16), 4);
    assert_eq!(bits_for(17), 5);
    assert_eq!(bits_for(256), 8);
  }
}
