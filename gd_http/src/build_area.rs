use gd_common::math::{Pos, Rect};
use serde::Deserialize;

/// The build area, as set in-game with `/setbuildarea`. Both corners are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildArea {
  pub x_from: i32,
  pub y_from: i32,
  pub z_from: i32,
  pub x_to:   i32,
  pub y_to:   i32,
  pub z_to:   i32,
}

impl BuildArea {
  pub fn from(&self) -> Pos { Pos::new(self.x_from, self.y_from, self.z_from) }
  pub fn to(&self) -> Pos { Pos::new(self.x_to, self.y_to, self.z_to) }

  /// Returns the X/Z rect covered by this area. The corners may be given in
  /// any order.
  pub fn rect(&self) -> Rect {
    let x = self.x_from.min(self.x_to);
    let z = self.z_from.min(self.z_to);
    Rect::new(x, z, (self.x_from - self.x_to).abs() + 1, (self.z_from - self.z_to).abs() + 1)
  }
}

/// The interface responds with `-1` when no build area is set.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum BuildAreaResponse {
  Set(BuildArea),
  NotSet(i64),
}
