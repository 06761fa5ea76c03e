use super::{
  bits_for, BitArray, BitArrayError, BIOME_CELLS, MIN_BIOME_BITS, MIN_BLOCK_BITS, SECTION_BLOCKS,
};
use crate::math::{SectionPos, SectionRelPos};
use std::{collections::BTreeMap, error::Error, fmt};

/// A block name, with any properties it was saved with. This is the decoded
/// form of a palette entry in a section's `block_states`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
  name:       String,
  properties: BTreeMap<String, String>,
}

impl BlockState {
  pub fn new(name: impl Into<String>) -> Self {
    BlockState { name: name.into(), properties: BTreeMap::new() }
  }
  /// Adds the given property, replacing any existing value.
  pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.properties.insert(key.into(), value.into());
    self
  }

  /// Returns the namespaced id of this block, for example `minecraft:stone`.
  pub fn name(&self) -> &str { &self.name }
  pub fn prop(&self, key: &str) -> Option<&str> { self.properties.get(key).map(|s| s.as_str()) }
  pub fn properties(&self) -> &BTreeMap<String, String> { &self.properties }
}

impl fmt::Display for BlockState {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.name)?;
    if !self.properties.is_empty() {
      write!(f, "[")?;
      for (i, (k, v)) in self.properties.iter().enumerate() {
        if i != 0 {
          write!(f, ",")?;
        }
        write!(f, "{k}={v}")?;
      }
      write!(f, "]")?;
    }
    Ok(())
  }
}

/// A palette, and the packed indices into it. This is how both the
/// `block_states` and `biomes` of a section are stored on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Paletted<T> {
  pub palette: Vec<T>,
  /// The packed indices. This is `None` when the palette has a single entry.
  pub data:    Option<Vec<u64>>,
}

impl<T> Paletted<T> {
  pub fn new(palette: Vec<T>, data: Option<Vec<u64>>) -> Self { Paletted { palette, data } }
  /// A palette with one entry, and no data.
  pub fn single(value: T) -> Self { Paletted { palette: vec![value], data: None } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
  /// Every palette must have at least one entry.
  EmptyPalette { kind: &'static str },
  /// The palette had more than one entry, but there was no data.
  MissingData { kind: &'static str, palette_len: usize },
  /// The data could not be wrapped in a [`BitArray`].
  Bits { kind: &'static str, err: BitArrayError },
  /// A value in the data was not a valid palette index.
  PaletteIndex { kind: &'static str, index: u32, palette_len: usize },
}

impl fmt::Display for SectionError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::EmptyPalette { kind } => write!(f, "{kind} palette is empty"),
      Self::MissingData { kind, palette_len } => {
        write!(f, "{kind} palette has {palette_len} entries, but there is no data")
      }
      Self::Bits { kind, err } => write!(f, "invalid {kind} data: {err}"),
      Self::PaletteIndex { kind, index, palette_len } => write!(
        f,
        "{kind} data contains index {index}, which is outside of a palette with {palette_len} \
         entries"
      ),
    }
  }
}

impl Error for SectionError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::Bits { err, .. } => Some(err),
      _ => None,
    }
  }
}

/// A decoded 16x16x16 section. This holds the block and biome palettes, and
/// the packed indices into each of them. Every index is checked against its
/// palette when the section is created, so lookups can never fail.
#[derive(Debug, Clone)]
pub struct CachedSection {
  pos:           SectionPos,
  block_palette: Vec<BlockState>,
  blocks:        BitArray,
  biome_palette: Vec<String>,
  biomes:        BitArray,
}

impl CachedSection {
  /// Decodes a section. Blocks are stored with at least 4 bits per entry, and
  /// biomes with at least 1 bit per entry. Each is stored with 0 bits (no data
  /// at all) if the palette only has one entry.
  pub fn new(
    pos: SectionPos,
    blocks: Paletted<BlockState>,
    biomes: Paletted<String>,
  ) -> Result<Self, SectionError> {
    let (block_palette, blocks) = unpack("block", blocks, SECTION_BLOCKS, MIN_BLOCK_BITS)?;
    let (biome_palette, biomes) = unpack("biome", biomes, BIOME_CELLS, MIN_BIOME_BITS)?;
    Ok(CachedSection { pos, block_palette, blocks, biome_palette, biomes })
  }

  /// Returns the absolute section coordinates of this section.
  pub fn pos(&self) -> SectionPos { self.pos }

  /// Returns the block at the given position within this section.
  pub fn block_at(&self, pos: SectionRelPos) -> &BlockState {
    &self.block_palette[self.blocks.get(pos.block_index()) as usize]
  }
  /// Returns the biome of the 4x4x4 cell containing the given position.
  pub fn biome_at(&self, pos: SectionRelPos) -> &str {
    &self.biome_palette[self.biomes.get(pos.biome_index()) as usize]
  }
  /// Returns the biome at the given cell index. Cells are ordered with x
  /// changing fastest, then z, then y.
  ///
  /// # Panics
  /// - If `cell` is not within `0..64`.
  pub fn biome_cell(&self, cell: usize) -> &str {
    &self.biome_palette[self.biomes.get(cell) as usize]
  }

  pub fn block_palette(&self) -> &[BlockState] { &self.block_palette }
  pub fn biome_palette(&self) -> &[String] { &self.biome_palette }
  pub fn blocks(&self) -> &BitArray { &self.blocks }
  pub fn biomes(&self) -> &BitArray { &self.biomes }
}

fn unpack<T>(
  kind: &'static str,
  paletted: Paletted<T>,
  len: usize,
  min_bits: u8,
) -> Result<(Vec<T>, BitArray), SectionError> {
  let Paletted { palette, data } = paletted;
  if palette.is_empty() {
    return Err(SectionError::EmptyPalette { kind });
  }
  let data = data.filter(|d| !d.is_empty());
  let arr = match data {
    // Anything read from the data would be index 0 anyway, so it is ignored.
    _ if palette.len() == 1 => BitArray::constant(len),
    None => return Err(SectionError::MissingData { kind, palette_len: palette.len() }),
    Some(data) => {
      let bpe = bits_for(palette.len()).max(min_bits);
      BitArray::from_data(bpe, len, data).map_err(|err| SectionError::Bits { kind, err })?
    }
  };
  if let Some(index) = arr.iter().find(|&i| i as usize >= palette.len()) {
    return Err(SectionError::PaletteIndex { kind, index, palette_len: palette.len() });
  }
  Ok((palette, arr))
}
