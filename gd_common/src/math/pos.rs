use std::{
  fmt,
  ops::{Add, Sub},
};

/// A block position in the world. Y may be negative, as worlds since 1.18
/// start below zero.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Pos {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl Default for Pos {
  fn default() -> Self { Pos::new(0, 0, 0) }
}

impl fmt::Display for Pos {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Pos({} {} {})", self.x, self.y, self.z)
  }
}

impl Pos {
  /// Creates a new block position.
  pub const fn new(x: i32, y: i32, z: i32) -> Self { Pos { x, y, z } }
  /// Returns the X value of the position.
  #[inline(always)]
  pub const fn x(&self) -> i32 { self.x }
  /// Returns the Y value of the position.
  #[inline(always)]
  pub const fn y(&self) -> i32 { self.y }
  /// Returns the Z value of the position.
  #[inline(always)]
  pub const fn z(&self) -> i32 { self.z }
  /// Returns the chunk that this block position is in.
  #[inline(always)]
  pub const fn chunk(&self) -> ChunkPos { ChunkPos::new(self.chunk_x(), self.chunk_z()) }
  /// Returns the absolute section this position is in. This is the chunk
  /// position, plus the section index on the Y axis.
  #[inline(always)]
  pub const fn section(&self) -> SectionPos {
    SectionPos::new(self.chunk_x(), self.chunk_y(), self.chunk_z())
  }
  /// Returns this position within the 0, 0, 0 chunk section. That is, the X, Y
  /// and Z are all set to their chunk relative position.
  #[inline(always)]
  pub const fn section_rel(&self) -> SectionRelPos {
    SectionRelPos::new(self.chunk_rel_x() as u8, self.chunk_rel_y() as u8, self.chunk_rel_z() as u8)
  }
  /// Returns the block X coordinate within 0..16. This is not the same as X %
  /// 16, because that will give negative numbers for negative X values.
  #[inline(always)]
  pub const fn chunk_rel_x(&self) -> i32 { self.x & 15 }
  /// Returns the block Y coordinate within 0..16.
  #[inline(always)]
  pub const fn chunk_rel_y(&self) -> i32 { self.y & 15 }
  /// Returns the block Z coordinate within 0..16.
  #[inline(always)]
  pub const fn chunk_rel_z(&self) -> i32 { self.z & 15 }
  /// Returns the chunk X of this position. This is X / 16, rounded to negative
  /// infinity. An arithmetic shift does exactly that for negative values.
  #[inline(always)]
  pub const fn chunk_x(&self) -> i32 { self.x >> 4 }
  /// Returns the section Y of this position, rounded to negative infinity.
  #[inline(always)]
  pub const fn chunk_y(&self) -> i32 { self.y >> 4 }
  /// Returns the chunk Z of this position, rounded to negative infinity.
  #[inline(always)]
  pub const fn chunk_z(&self) -> i32 { self.z >> 4 }
}

impl Add for Pos {
  type Output = Self;
  fn add(self, other: Self) -> Self {
    Pos::new(self.x + other.x, self.y + other.y, self.z + other.z)
  }
}
impl Sub for Pos {
  type Output = Self;
  fn sub(self, other: Self) -> Self {
    Pos::new(self.x - other.x, self.y - other.y, self.z - other.z)
  }
}

/// A chunk column position. Each unit is 16 blocks.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ChunkPos {
  x: i32,
  z: i32,
}

impl fmt::Display for ChunkPos {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "ChunkPos({} {})", self.x, self.z)
  }
}

impl ChunkPos {
  pub const fn new(x: i32, z: i32) -> Self { ChunkPos { x, z } }
  /// Returns the X value of the position.
  #[inline(always)]
  pub const fn x(&self) -> i32 { self.x }
  /// Returns the Z value of the position.
  #[inline(always)]
  pub const fn z(&self) -> i32 { self.z }
  /// Returns the minimum block X value of the position. This is just x * 16.
  #[inline(always)]
  pub const fn block_x(&self) -> i32 { self.x * 16 }
  /// Returns the minimum block Z value of the position. This is just z * 16.
  #[inline(always)]
  pub const fn block_z(&self) -> i32 { self.z * 16 }
}

/// The position of a 16x16x16 section. Depending on where it came from, X and
/// Z are either absolute chunk coordinates, or relative to the corner of a
/// slice. Y is always the signed section index, as stored in the chunk.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionPos {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl fmt::Display for SectionPos {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "SectionPos({} {} {})", self.x, self.y, self.z)
  }
}

impl SectionPos {
  pub const fn new(x: i32, y: i32, z: i32) -> Self { SectionPos { x, y, z } }
}

/// A block position within a single section. All of the values are within
/// `0..16`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SectionRelPos {
  x: u8,
  y: u8,
  z: u8,
}

impl SectionRelPos {
  /// Creates a new section relative position.
  ///
  /// # Panics
  /// - If any of the values are outside of `0..16`. This is only checked with
  ///   debug assertions.
  #[inline(always)]
  pub const fn new(x: u8, y: u8, z: u8) -> Self {
    debug_assert!(x < 16 && y < 16 && z < 16);
    SectionRelPos { x, y, z }
  }
  #[inline(always)]
  pub const fn x(&self) -> u8 { self.x }
  #[inline(always)]
  pub const fn y(&self) -> u8 { self.y }
  #[inline(always)]
  pub const fn z(&self) -> u8 { self.z }
  /// Returns the index of this block within a 4096 element section array.
  /// Entries are ordered Y, then Z, then X.
  #[inline(always)]
  pub const fn block_index(&self) -> usize {
    (self.y as usize) << 8 | (self.z as usize) << 4 | (self.x as usize)
  }
  /// Returns the index of the biome cell containing this block. Biomes are
  /// stored in 4x4x4 cells, so this indexes into a 64 element array.
  #[inline(always)]
  pub const fn biome_index(&self) -> usize {
    ((self.y >> 2) as usize) << 4 | ((self.z >> 2) as usize) << 2 | ((self.x >> 2) as usize)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chunk_coords_floor() {
    assert_eq!(Pos::new(0, 0, 0).chunk(), ChunkPos::new(0, 0));
    assert_eq!(Pos::new(15, 0, 16).chunk(), ChunkPos::new(0, 1));
    assert_eq!(Pos::new(-1, 0, -16).chunk(), ChunkPos::new(-1, -1));
    assert_eq!(Pos::new(-17, 0, -15).chunk(), ChunkPos::new(-2, -1));
    assert_eq!(Pos::new(3, -64, 3).section(), SectionPos::new(0, -4, 0));
    assert_eq!(Pos::new(3, -1, 3).section(), SectionPos::new(0, -1, 0));
  }

  #[test]
  fn section_rel_is_positive() {
    let rel = Pos::new(-1, -1, -17).section_rel();
    assert_eq!((rel.x(), rel.y(), rel.z()), (15, 15, 15));
    let rel = Pos::new(16, 33, 5).section_rel();
    assert_eq!((rel.x(), rel.y(), rel.z()), (0, 1, 5));
  }

  #[test]
  fn indices() {
    assert_eq!(SectionRelPos::new(0, 0, 0).block_index(), 0);
    assert_eq!(SectionRelPos::new(1, 0, 0).block_index(), 1);
    assert_eq!(SectionRelPos::new(0, 0, 1).block_index(), 16);
    assert_eq!(SectionRelPos::new(0, 1, 0).block_index(), 256);
    assert_eq!(SectionRelPos::new(15, 15, 15).block_index(), 4095);

    assert_eq!(SectionRelPos::new(3, 3, 3).biome_index(), 0);
    assert_eq!(SectionRelPos::new(4, 0, 0).biome_index(), 1);
    assert_eq!(SectionRelPos::new(0, 0, 4).biome_index(), 4);
    assert_eq!(SectionRelPos::new(0, 4, 0).biome_index(), 16);
    assert_eq!(SectionRelPos::new(15, 15, 15).biome_index(), 63);
  }
}
