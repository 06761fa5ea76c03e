use gd_common::{
  chunk::{BitArrayError, HeightmapKind, SectionError},
  math::SectionPos,
  nbt::{ParseError, WrongTag},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
  /// The caller passed something invalid, like an empty rect.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
  /// The [`ChunkSource`](crate::ChunkSource) failed.
  #[error("could not fetch chunks: {0}")]
  Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),
  /// The fetched bytes were not valid nbt.
  #[error("could not parse chunk data: {0}")]
  Parse(#[from] ParseError),
  /// The nbt was valid, but did not have the layout of a chunk list.
  #[error("invalid chunk data: {0}")]
  Document(#[from] DocumentError),
  /// A section had a palette and data that do not match up.
  #[error("invalid section at {pos}: {err}")]
  Section {
    pos: SectionPos,
    #[source]
    err: SectionError,
  },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
  #[error("missing field `{field}`")]
  Missing { field: &'static str },
  #[error("field `{field}` has the wrong type: {err}")]
  WrongTag {
    field: &'static str,
    #[source]
    err:   WrongTag,
  },
  #[error("expected {expected} chunks, got {got}")]
  ChunkCount { expected: usize, got: usize },
  #[error("chunk {chunk} has no {kind} heightmap")]
  MissingHeightmap { chunk: usize, kind: HeightmapKind },
  #[error("chunk {chunk} has an invalid {kind} heightmap: {err}")]
  Heightmap {
    chunk: usize,
    kind:  HeightmapKind,
    #[source]
    err:   BitArrayError,
  },
}
