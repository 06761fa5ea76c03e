//! Decoding for the paletted, bit packed data stored in chunks.

mod bits;
mod heightmap;
mod section;


pub use bits::{bits_for, BitArray, BitArrayError};
pub use heightmap::HeightmapKind;
pub use section::{BlockState, CachedSection, Paletted, SectionError};

/// Number of blocks in a 16x16x16 section.
pub const SECTION_BLOCKS: usize = 16 * 16 * 16;
/// Number of 4x4x4 biome cells in a section.
pub const BIOME_CELLS: usize = 4 * 4 * 4;
/// Number of columns in a chunk, which is the length of every heightmap.
pub const CHUNK_COLUMNS: usize = 16 * 16;
/// Heightmaps always use this many bits per entry.
pub const HEIGHTMAP_BITS: u8 = 9;
/// Block data never uses fewer bits than this, even for small palettes.
pub const MIN_BLOCK_BITS: u8 = 4;
pub const MIN_BIOME_BITS: u8 = 1;
/// The lowest y level of the overworld. Heightmap values are stored relative
/// to this.
pub const BUILD_Y_MIN: i32 = -64;
/// The block returned for positions outside of any stored section.
pub const VOID_AIR: &str = "minecraft:void_air";
