use super::{ChunkPos, Pos};
use std::fmt;

/// A rectangle on the X/Z plane. `x` and `z` are the minimum corner, and `dx`
/// and `dz` are the size. Depending on context, the units are either blocks or
/// chunks.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Rect {
  pub x:  i32,
  pub z:  i32,
  pub dx: i32,
  pub dz: i32,
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Rect({} {} size {} {})", self.x, self.z, self.dx, self.dz)
  }
}

impl Rect {
  pub const fn new(x: i32, z: i32, dx: i32, dz: i32) -> Self { Rect { x, z, dx, dz } }

  /// Returns true if both sides of this rect are at least 1 long, and the max
  /// corner still fits in an `i32`.
  pub const fn is_valid(&self) -> bool {
    self.dx > 0
      && self.dz > 0
      && self.x.checked_add(self.dx).is_some()
      && self.z.checked_add(self.dz).is_some()
  }

  /// The number of columns (or chunks) within this rect.
  pub const fn area(&self) -> usize { self.dx as usize * self.dz as usize }

  /// Returns true if the given X/Z is within this rect. The max corner is
  /// exclusive.
  pub const fn contains(&self, x: i32, z: i32) -> bool {
    x >= self.x
      && z >= self.z
      && (x as i64) < self.x as i64 + self.dx as i64
      && (z as i64) < self.z as i64 + self.dz as i64
  }

  /// Returns true if the X/Z of the given position is within this rect.
  pub const fn contains_pos(&self, pos: Pos) -> bool { self.contains(pos.x, pos.z) }

  /// Returns the minimum corner as a chunk position. Only meaningful if this is
  /// a chunk rect.
  pub const fn chunk_origin(&self) -> ChunkPos { ChunkPos::new(self.x, self.z) }

  /// Treating this as a rect of blocks, this returns the smallest rect of
  /// chunks that covers every block in `self`. If `self` is not aligned to
  /// chunk boundaries, the chunk rect will cover more blocks than `self`.
  pub const fn chunk_rect(&self) -> Rect {
    let x = self.x >> 4;
    let z = self.z >> 4;
    Rect {
      x,
      z,
      dx: ((self.x + self.dx - 1) >> 4) - x + 1,
      dz: ((self.z + self.dz - 1) >> 4) - z + 1,
    }
  }
}
