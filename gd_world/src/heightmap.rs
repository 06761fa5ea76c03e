use gd_common::chunk::HeightmapKind;

/// A grid of heights, covering exactly the rect that a
/// [`WorldSlice`](crate::WorldSlice) was created with. Indices are relative to
/// the minimum corner of that rect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
  kind:    HeightmapKind,
  width:   usize,
  depth:   usize,
  heights: Vec<i32>,
}

impl Heightmap {
  pub(crate) fn new(kind: HeightmapKind, width: usize, depth: usize) -> Self {
    Heightmap { kind, width, depth, heights: vec![0; width * depth] }
  }

  /// Sets the height at the given column, if it is within the grid. Returns
  /// false if the column is outside of this heightmap.
  pub(crate) fn set(&mut self, x: i32, z: i32, height: i32) -> bool {
    match self.index(x, z) {
      Some(idx) => {
        self.heights[idx] = height;
        true
      }
      None => false,
    }
  }

  fn index(&self, x: i32, z: i32) -> Option<usize> {
    let x = usize::try_from(x).ok()?;
    let z = usize::try_from(z).ok()?;
    if x < self.width && z < self.depth {
      Some(z * self.width + x)
    } else {
      None
    }
  }

  /// Returns the height at the given column, relative to the corner of this
  /// heightmap.
  pub fn get(&self, x: i32, z: i32) -> Option<i32> { self.index(x, z).map(|i| self.heights[i]) }

  pub fn kind(&self) -> HeightmapKind { self.kind }
  /// The size of this heightmap on the X axis.
  pub fn width(&self) -> usize { self.width }
  /// The size of this heightmap on the Z axis.
  pub fn depth(&self) -> usize { self.depth }
  /// Returns every height, with X changing fastest.
  pub fn heights(&self) -> &[i32] { &self.heights }
  pub fn min(&self) -> Option<i32> { self.heights.iter().copied().min() }
  pub fn max(&self) -> Option<i32> { self.heights.iter().copied().max() }
}
