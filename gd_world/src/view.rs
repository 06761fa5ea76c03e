//! A typed view over the nbt returned by a [`ChunkSource`](crate::ChunkSource).
//! The nbt is walked once, and everything the slice needs is pulled out into
//! plain structs, so that the decoding code never has to look up fields by
//! name.

use crate::DocumentError;
use gd_common::{
  chunk::{BlockState, Paletted},
  nbt::{Tag, WrongTag, NBT},
};
use std::collections::HashMap;

/// Every chunk in the `Chunks` list, in the order they were sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunksView {
  pub chunks: Vec<ChunkView>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkView {
  /// Every heightmap in the chunk, keyed by its name (for example
  /// `WORLD_SURFACE`).
  pub heightmaps: HashMap<String, Vec<u64>>,
  pub sections:   Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
  /// The section index. This is signed, as sections may be below 0.
  pub y:            i32,
  /// This is `None` if the `block_states` compound is missing or empty.
  pub block_states: Option<Paletted<BlockState>>,
  /// This is `None` if the `biomes` compound is missing or empty.
  pub biomes:       Option<Paletted<String>>,
}

type Compound = HashMap<String, Tag>;

fn wrong(field: &'static str) -> impl Fn(WrongTag) -> DocumentError {
  move |err| DocumentError::WrongTag { field, err }
}

fn get<'a>(map: &'a Compound, field: &'static str) -> Result<&'a Tag, DocumentError> {
  map.get(field).ok_or(DocumentError::Missing { field })
}

/// Returns the compound at `field`, or `None` if it is missing or empty.
fn opt_compound<'a>(
  map: &'a Compound,
  field: &'static str,
) -> Result<Option<&'a Compound>, DocumentError> {
  match map.get(field) {
    Some(tag) => {
      let c = tag.as_compound().map_err(wrong(field))?;
      Ok(if c.is_empty() { None } else { Some(c) })
    }
    None => Ok(None),
  }
}

fn long_arr(tag: &Tag, field: &'static str) -> Result<Vec<u64>, DocumentError> {
  // Minecraft stores these as signed longs, but they are only ever used as
  // bit fields.
  Ok(tag.long_arr().map_err(wrong(field))?.iter().map(|&v| v as u64).collect())
}

impl ChunksView {
  pub fn from_nbt(nbt: &NBT) -> Result<Self, DocumentError> {
    let root = nbt.compound().map_err(wrong("root"))?;
    let chunks = get(root, "Chunks")?.list().map_err(wrong("Chunks"))?;
    Ok(ChunksView { chunks: chunks.iter().map(ChunkView::from_tag).collect::<Result<_, _>>()? })
  }
}

impl ChunkView {
  pub fn from_tag(tag: &Tag) -> Result<Self, DocumentError> {
    let chunk = tag.as_compound().map_err(wrong("Chunks"))?;
    let mut heightmaps = HashMap::new();
    if let Some(hm) = chunk.get("Heightmaps") {
      for (name, arr) in hm.as_compound().map_err(wrong("Heightmaps"))? {
        heightmaps.insert(name.clone(), long_arr(arr, "Heightmaps")?);
      }
    }
    let sections = match chunk.get("sections") {
      Some(s) => s
        .list()
        .map_err(wrong("sections"))?
        .iter()
        .map(SectionView::from_tag)
        .collect::<Result<_, _>>()?,
      None => vec![],
    };
    Ok(ChunkView { heightmaps, sections })
  }
}

impl SectionView {
  pub fn from_tag(tag: &Tag) -> Result<Self, DocumentError> {
    let section = tag.as_compound().map_err(wrong("sections"))?;
    let y = get(section, "Y")?.small_int().map_err(wrong("Y"))?;
    let block_states = match opt_compound(section, "block_states")? {
      Some(c) => Some(paletted(c, parse_state)?),
      None => None,
    };
    let biomes = match opt_compound(section, "biomes")? {
      Some(c) => Some(paletted(c, |t| Ok(t.string().map_err(wrong("palette"))?.to_string()))?),
      None => None,
    };
    Ok(SectionView { y, block_states, biomes })
  }
}

fn paletted<T>(
  map: &Compound,
  parse: impl Fn(&Tag) -> Result<T, DocumentError>,
) -> Result<Paletted<T>, DocumentError> {
  let palette = get(map, "palette")?.list().map_err(wrong("palette"))?;
  let palette = palette.iter().map(parse).collect::<Result<_, _>>()?;
  let data = match map.get("data") {
    Some(d) => Some(long_arr(d, "data")?),
    None => None,
  };
  Ok(Paletted::new(palette, data))
}

fn parse_state(item: &Tag) -> Result<BlockState, DocumentError> {
  let item = item.as_compound().map_err(wrong("palette"))?;
  let mut state = BlockState::new(get(item, "Name")?.string().map_err(wrong("Name"))?);
  if let Some(props) = item.get("Properties") {
    for (key, val) in props.as_compound().map_err(wrong("Properties"))? {
      state = state.with_prop(key.as_str(), val.string().map_err(wrong("Properties"))?);
    }
  }
  Ok(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_fields() {
    let chunk = Tag::compound(&[]);
    assert_eq!(ChunkView::from_tag(&chunk), Ok(ChunkView::default()));

    let section = Tag::compound(&[("block_states", Tag::compound(&[]))]);
    assert_eq!(SectionView::from_tag(&section), Err(DocumentError::Missing { field: "Y" }));

    let section = Tag::compound(&[
      ("Y", Tag::Byte(0)),
      ("block_states", Tag::compound(&[("data", Tag::LongArray(vec![0]))])),
    ]);
    assert_eq!(SectionView::from_tag(&section), Err(DocumentError::Missing { field: "palette" }));
  }

  #[test]
  fn wrong_tags() {
    let section = Tag::compound(&[("Y", Tag::String("0".into()))]);
    assert!(matches!(
      SectionView::from_tag(&section),
      Err(DocumentError::WrongTag { field: "Y", .. })
    ));
    let chunk = Tag::compound(&[("Heightmaps", Tag::compound(&[("WORLD_SURFACE", Tag::Int(3))]))]);
    assert!(matches!(
      ChunkView::from_tag(&chunk),
      Err(DocumentError::WrongTag { field: "Heightmaps", .. })
    ));
  }

  #[test]
  fn negative_longs() {
    let section = Tag::compound(&[
      ("Y", Tag::Byte(-1)),
      (
        "biomes",
        Tag::compound(&[
          ("palette", Tag::List(vec![Tag::String("a".into()), Tag::String("b".into())])),
          ("data", Tag::LongArray(vec![-1])),
        ]),
      ),
    ]);
    let view = SectionView::from_tag(&section).unwrap();
    assert_eq!(view.y, -1);
    assert_eq!(view.block_states, None);
    let biomes = Paletted::new(vec!["a".into(), "b".into()], Some(vec![u64::MAX]));
    assert_eq!(view.biomes, Some(biomes));
  }
}
