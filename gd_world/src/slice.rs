use crate::{
  view::{ChunkView, ChunksView},
  ChunkSource, DocumentError, Heightmap, SliceError,
};
use gd_common::{
  chunk::{
    BitArray, BlockState, CachedSection, HeightmapKind, BIOME_CELLS, BUILD_Y_MIN, CHUNK_COLUMNS,
    HEIGHTMAP_BITS, VOID_AIR,
  },
  math::{Pos, Rect, SectionPos},
  nbt::NBT,
  Config,
};
use rayon::prelude::*;
use std::collections::HashMap;

/// Controls what a [`WorldSlice`] decodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOptions {
  /// The heightmaps to decode. Every chunk must have all of these.
  pub heightmaps:        Vec<HeightmapKind>,
  /// The lowest y level of the world. Heightmaps store heights relative to
  /// this, so it is added to every value.
  pub build_y_min:       i32,
  /// The heightmap used by [`WorldSlice::height`].
  pub default_heightmap: HeightmapKind,
}

impl Default for SliceOptions {
  fn default() -> Self {
    SliceOptions {
      heightmaps:        HeightmapKind::ALL.to_vec(),
      build_y_min:       BUILD_Y_MIN,
      default_heightmap: HeightmapKind::default(),
    }
  }
}

impl From<&Config> for SliceOptions {
  fn from(config: &Config) -> Self {
    SliceOptions {
      heightmaps:        config.heightmaps.clone(),
      build_y_min:       config.build_y_min,
      default_heightmap: config.default_heightmap,
    }
  }
}

/// A decoded rect of the world. Everything is decoded up front, so all of the
/// queries are simple lookups.
///
/// Sections are stored relative to the chunk rect, so the section at the
/// minimum corner of the slice is at X and Z 0. Y is the section index taken
/// directly from the chunk data.
#[derive(Debug, Clone)]
pub struct WorldSlice {
  rect:              Rect,
  chunk_rect:        Rect,
  default_heightmap: HeightmapKind,
  heightmaps:        HashMap<HeightmapKind, Heightmap>,
  sections:          HashMap<SectionPos, CachedSection>,
}

/// Everything decoded from a single chunk.
struct DecodedChunk {
  heightmaps: Vec<(HeightmapKind, BitArray)>,
  sections:   Vec<CachedSection>,
}

impl WorldSlice {
  /// Fetches and decodes the given rect of blocks, with the default options.
  pub fn new<S: ChunkSource + ?Sized>(source: &S, rect: Rect) -> Result<Self, SliceError> {
    Self::with_options(source, rect, &SliceOptions::default())
  }

  /// Fetches and decodes the given rect of blocks. The source is called
  /// exactly once, with the smallest rect of chunks that covers `rect`.
  pub fn with_options<S: ChunkSource + ?Sized>(
    source: &S,
    rect: Rect,
    opts: &SliceOptions,
  ) -> Result<Self, SliceError> {
    validate(rect)?;
    let chunk_rect = rect.chunk_rect();
    debug!("fetching {chunk_rect} for slice {rect}");
    let bytes = source.fetch_chunks(chunk_rect).map_err(|e| SliceError::Fetch(Box::new(e)))?;
    Self::from_bytes(bytes, rect, opts)
  }

  /// Decodes a slice from chunk data that has already been fetched. `bytes`
  /// must contain the chunk rect of `rect`.
  pub fn from_bytes(bytes: Vec<u8>, rect: Rect, opts: &SliceOptions) -> Result<Self, SliceError> {
    validate(rect)?;
    let chunk_rect = rect.chunk_rect();
    let nbt = NBT::deserialize_file(bytes)?;
    let view = ChunksView::from_nbt(&nbt)?;
    let expected = chunk_rect.area();
    if view.chunks.len() < expected {
      return Err(DocumentError::ChunkCount { expected, got: view.chunks.len() }.into());
    }

    let mut kinds = opts.heightmaps.clone();
    kinds.sort();
    kinds.dedup();

    let mut chunks = view.chunks;
    chunks.truncate(expected);
    let decoded = chunks
      .into_par_iter()
      .enumerate()
      .map(|(id, chunk)| decode_chunk(id, chunk, chunk_rect, &kinds))
      .collect::<Result<Vec<_>, _>>()?;

    let mut slice = WorldSlice {
      rect,
      chunk_rect,
      default_heightmap: opts.default_heightmap,
      heightmaps: kinds
        .iter()
        .map(|&k| (k, Heightmap::new(k, rect.dx as usize, rect.dz as usize)))
        .collect(),
      sections: HashMap::new(),
    };
    // The offset of `rect` within the first chunk. This is always positive.
    let off_x = rect.x & 15;
    let off_z = rect.z & 15;
    for (id, chunk) in decoded.into_iter().enumerate() {
      let cx = (id % chunk_rect.dx as usize) as i32;
      let cz = (id / chunk_rect.dx as usize) as i32;
      for (kind, arr) in &chunk.heightmaps {
        let Some(heightmap) = slice.heightmaps.get_mut(kind) else { continue };
        for z in 0..16 {
          for x in 0..16 {
            let height = arr.get((z * 16 + x) as usize) as i32 + opts.build_y_min;
            // Chunks on the edges of the rect will have columns outside the
            // heightmap, which are skipped.
            heightmap.set(cx * 16 + x - off_x, cz * 16 + z - off_z, height);
          }
        }
      }
      for section in chunk.sections {
        let pos = section.pos();
        slice.sections.insert(SectionPos::new(cx, pos.y, cz), section);
      }
    }
    debug!("decoded {} chunks with {} sections for {rect}", expected, slice.sections.len());
    Ok(slice)
  }

  /// The rect of blocks this slice was created with.
  pub fn rect(&self) -> Rect { self.rect }
  /// The rect of chunks that were fetched for this slice.
  pub fn chunk_rect(&self) -> Rect { self.chunk_rect }
  /// The number of sections that have block data.
  pub fn section_count(&self) -> usize { self.sections.len() }
  /// Iterates over every stored section, in no particular order. The key is
  /// relative to the chunk rect.
  pub fn sections(&self) -> impl Iterator<Item = (SectionPos, &CachedSection)> {
    self.sections.iter().map(|(k, v)| (*k, v))
  }

  /// Returns the key of the section containing `pos`. X and Z are relative to
  /// the chunk rect, and Y is the section index.
  pub fn section_pos(&self, pos: Pos) -> SectionPos {
    SectionPos::new(
      pos.chunk_x() - self.chunk_rect.x,
      pos.chunk_y(),
      pos.chunk_z() - self.chunk_rect.z,
    )
  }

  /// Returns the section containing `pos`, if it has any block data.
  pub fn section(&self, pos: Pos) -> Option<&CachedSection> {
    self.sections.get(&self.section_pos(pos))
  }

  /// Returns the block state at the given position, or `None` if that section
  /// was not stored.
  pub fn block_at(&self, pos: Pos) -> Option<&BlockState> {
    self.section(pos).map(|s| s.block_at(pos.section_rel()))
  }

  /// Returns the block id at the given position. If the position is outside of
  /// any stored section, this returns `minecraft:void_air`.
  pub fn block_id_at(&self, pos: Pos) -> &str {
    match self.block_at(pos) {
      Some(state) => state.name(),
      None => VOID_AIR,
    }
  }

  /// Returns the biome at the given position, or `None` if that section was
  /// not stored.
  pub fn biome_at(&self, pos: Pos) -> Option<&str> {
    self.section(pos).map(|s| s.biome_at(pos.section_rel()))
  }

  /// Counts every biome within the section containing `pos`. Biomes are listed
  /// in the order they are first found, scanning cells in index order.
  pub fn biomes_near(&self, pos: Pos) -> Option<Vec<(&str, u32)>> {
    let section = self.section(pos)?;
    let mut counts: Vec<(&str, u32)> = vec![];
    for cell in 0..BIOME_CELLS {
      let biome = section.biome_cell(cell);
      match counts.iter_mut().find(|(b, _)| *b == biome) {
        Some((_, count)) => *count += 1,
        None => counts.push((biome, 1)),
      }
    }
    Some(counts)
  }

  /// Returns the most common biome in the section containing `pos`. If two
  /// biomes are tied, the one found first wins.
  pub fn primary_biome_near(&self, pos: Pos) -> Option<&str> {
    let mut best: Option<(&str, u32)> = None;
    for (biome, count) in self.biomes_near(pos)? {
      if best.map_or(true, |(_, c)| count > c) {
        best = Some((biome, count));
      }
    }
    best.map(|(biome, _)| biome)
  }

  /// Returns the given heightmap, if it was decoded.
  pub fn heightmap(&self, kind: HeightmapKind) -> Option<&Heightmap> { self.heightmaps.get(&kind) }

  /// Returns the height at the given column, using the given heightmap. The
  /// column is in world coordinates, and must be within [`rect`](Self::rect).
  pub fn height_at(&self, kind: HeightmapKind, x: i32, z: i32) -> Result<i32, SliceError> {
    let heightmap = self.heightmap(kind).ok_or_else(|| {
      SliceError::InvalidArgument(format!("the {kind} heightmap was not decoded"))
    })?;
    let outside =
      || SliceError::InvalidArgument(format!("column {x} {z} is outside of {}", self.rect));
    if !self.rect.contains(x, z) {
      return Err(outside());
    }
    heightmap.get(x - self.rect.x, z - self.rect.z).ok_or_else(outside)
  }

  /// Returns the height at the given column, using the default heightmap.
  pub fn height(&self, x: i32, z: i32) -> Result<i32, SliceError> {
    self.height_at(self.default_heightmap, x, z)
  }
}

fn validate(rect: Rect) -> Result<(), SliceError> {
  if rect.is_valid() {
    Ok(())
  } else {
    Err(SliceError::InvalidArgument(format!("{rect} must have a positive size that fits in i32")))
  }
}

fn decode_chunk(
  id: usize,
  mut chunk: ChunkView,
  chunk_rect: Rect,
  kinds: &[HeightmapKind],
) -> Result<DecodedChunk, SliceError> {
  let mut heightmaps = Vec::with_capacity(kinds.len());
  for &kind in kinds {
    let data = chunk
      .heightmaps
      .remove(kind.name())
      .ok_or(DocumentError::MissingHeightmap { chunk: id, kind })?;
    let arr = BitArray::from_data(HEIGHTMAP_BITS, CHUNK_COLUMNS, data)
      .map_err(|err| DocumentError::Heightmap { chunk: id, kind, err })?;
    heightmaps.push((kind, arr));
  }

  let cx = chunk_rect.x + (id % chunk_rect.dx as usize) as i32;
  let cz = chunk_rect.z + (id / chunk_rect.dx as usize) as i32;
  let mut sections = Vec::with_capacity(chunk.sections.len());
  for section in chunk.sections {
    let pos = SectionPos::new(cx, section.y, cz);
    let (blocks, biomes) = match (section.block_states, section.biomes) {
      (Some(blocks), Some(biomes)) => (blocks, biomes),
      _ => {
        trace!("skipping empty section {pos}");
        continue;
      }
    };
    let section =
      CachedSection::new(pos, blocks, biomes).map_err(|err| SliceError::Section { pos, err })?;
    sections.push(section);
  }
  Ok(DecodedChunk { heightmaps, sections })
}
