use serde::Deserialize;
use std::{fmt, str::FromStr};

/// One of the heightmaps stored in every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeightmapKind {
  /// The highest block that blocks motion or contains a fluid.
  MotionBlocking,
  /// Same as `MotionBlocking`, but ignores leaves.
  MotionBlockingNoLeaves,
  /// The highest block that blocks motion.
  OceanFloor,
  /// The highest non-air block.
  WorldSurface,
}

impl HeightmapKind {
  pub const ALL: [HeightmapKind; 4] = [
    HeightmapKind::MotionBlocking,
    HeightmapKind::MotionBlockingNoLeaves,
    HeightmapKind::OceanFloor,
    HeightmapKind::WorldSurface,
  ];

  /// Returns the name of this heightmap, as it is stored in a chunk's
  /// `Heightmaps` compound.
  pub fn name(&self) -> &'static str {
    match self {
      Self::MotionBlocking => "MOTION_BLOCKING",
      Self::MotionBlockingNoLeaves => "MOTION_BLOCKING_NO_LEAVES",
      Self::OceanFloor => "OCEAN_FLOOR",
      Self::WorldSurface => "WORLD_SURFACE",
    }
  }
}

impl Default for HeightmapKind {
  fn default() -> Self { HeightmapKind::MotionBlockingNoLeaves }
}

impl fmt::Display for HeightmapKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.name()) }
}

impl FromStr for HeightmapKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    HeightmapKind::ALL
      .into_iter()
      .find(|k| {
        k.name().eq_ignore_ascii_case(s) || k.name().replace('_', "-").eq_ignore_ascii_case(s)
      })
      .ok_or_else(|| format!("unknown heightmap `{s}`"))
  }
}
