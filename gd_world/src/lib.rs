//! Decodes a slice of the world, fetched from a [`ChunkSource`], into a
//! [`WorldSlice`], which can then answer block, biome and height queries.

#[macro_use]
extern crate log;

mod error;
mod heightmap;
mod slice;
pub mod source;
pub mod view;


pub use error::{DocumentError, SliceError};
pub use heightmap::Heightmap;
pub use slice::{SliceOptions, WorldSlice};
pub use source::ChunkSource;
