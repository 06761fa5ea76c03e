//! The collaborator that actually fetches chunk data.

use gd_common::math::Rect;
use std::error::Error;

/// Something that can produce the raw nbt for a rect of chunks. The returned
/// bytes must be a compound with a `Chunks` list, with one entry per chunk, in
/// order of X first, then Z.
///
/// Any retrying is up to the source. A [`WorldSlice`](crate::WorldSlice) only
/// ever calls [`fetch_chunks`](Self::fetch_chunks) once.
pub trait ChunkSource {
  type Error: Error + Send + Sync + 'static;

  /// Fetches the given rect. `chunks` is in chunk coordinates, not block
  /// coordinates.
  fn fetch_chunks(&self, chunks: Rect) -> Result<Vec<u8>, Self::Error>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &S {
  type Error = S::Error;

  fn fetch_chunks(&self, chunks: Rect) -> Result<Vec<u8>, Self::Error> {
    (**self).fetch_chunks(chunks)
  }
}
