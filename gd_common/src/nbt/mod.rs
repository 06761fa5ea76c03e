mod deserialize;
mod serialize;
#[cfg(test)]
mod tests;

pub use deserialize::ParseError;

use std::{collections::HashMap, error::Error, fmt};

/// This is an nbt tag. It has a name, and any amount of data. Chunk data is
/// sent as one of these, with an unnamed compound at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct NBT {
  tag:  Tag,
  name: String,
}

impl Default for NBT {
  fn default() -> Self { NBT::new("", Tag::compound(&[])) }
}

/// This is a single tag. It does not contain a name, but has the actual data
/// for any of the nbt tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
  End,
  Byte(i8),
  Short(i16),
  Int(i32),
  Long(i64),
  Float(f32),
  Double(f64),
  ByteArr(Vec<u8>),
  String(String),
  List(Vec<Tag>),                 // All elements must be the same type, and un-named.
  Compound(HashMap<String, Tag>), // Types can be any kind, and are named. Order is not defined.
  IntArray(Vec<i32>),
  LongArray(Vec<i64>),
}

/// Returned from the typed accessors on [`Tag`] when the tag is some other
/// kind than the one asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongTag {
  expected: &'static str,
  found:    &'static str,
}

impl WrongTag {
  pub fn new(expected: &'static str, found: &Tag) -> Self {
    WrongTag { expected, found: found.name() }
  }
  pub fn expected(&self) -> &'static str { self.expected }
  pub fn found(&self) -> &'static str { self.found }
}

impl fmt::Display for WrongTag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "expected a {} tag, got a {} tag", self.expected, self.found)
  }
}

impl Error for WrongTag {}

impl NBT {
  /// Creates a new nbt tag. The tag value can be anything.
  ///
  /// # Panics
  /// This will panic if the tag is a list, and the values within that list
  /// contain multiple types. This is a limitation with the nbt data format:
  /// lists can only contain one type of data.
  pub fn new(name: &str, tag: Tag) -> Self {
    if let Tag::List(inner) = &tag {
      if let Some(v) = inner.first() {
        let ty = v.ty();
        for v in inner {
          if v.ty() != ty {
            panic!("the given list contains multiple types: {:?}", inner);
          }
        }
      }
    }
    NBT { tag, name: name.into() }
  }

  /// Creates an empty nbt tag.
  pub fn empty(name: &str) -> Self { NBT { tag: Tag::End, name: name.into() } }

  pub fn name(&self) -> &str { &self.name }
  pub fn tag(&self) -> &Tag { &self.tag }
  pub fn into_tag(self) -> Tag { self.tag }

  /// If this is a compound tag, this returns the inner data of the tag.
  pub fn compound(&self) -> Result<&HashMap<String, Tag>, WrongTag> { self.tag.as_compound() }
}

macro_rules! accessor {
  ($name:ident, $variant:ident, $ty:ty, $desc:expr) => {
    #[doc = concat!("Returns the inner value, if this is a ", $desc, " tag.")]
    pub fn $name(&self) -> Result<$ty, WrongTag> {
      match self {
        Self::$variant(v) => Ok(*v),
        _ => Err(WrongTag::new($desc, self)),
      }
    }
  };
  (ref $name:ident, $variant:ident, $ty:ty, $desc:expr) => {
    #[doc = concat!("Returns a reference to the inner value, if this is a ", $desc, " tag.")]
    pub fn $name(&self) -> Result<&$ty, WrongTag> {
      match self {
        Self::$variant(v) => Ok(v),
        _ => Err(WrongTag::new($desc, self)),
      }
    }
  };
}

impl Tag {
  /// A simpler way to construct compound tags inline.
  pub fn compound(value: &[(&str, Tag)]) -> Self {
    let mut inner = HashMap::new();
    for (name, tag) in value {
      inner.insert(name.to_string(), tag.clone());
    }
    Self::Compound(inner)
  }

  /// Returns a readable name for the kind of tag this is. Used in error
  /// messages.
  pub fn name(&self) -> &'static str {
    match self {
      Self::End => "end",
      Self::Byte(_) => "byte",
      Self::Short(_) => "short",
      Self::Int(_) => "int",
      Self::Long(_) => "long",
      Self::Float(_) => "float",
      Self::Double(_) => "double",
      Self::ByteArr(_) => "byte array",
      Self::String(_) => "string",
      Self::List(_) => "list",
      Self::Compound(_) => "compound",
      Self::IntArray(_) => "int array",
      Self::LongArray(_) => "long array",
    }
  }

  accessor!(byte, Byte, i8, "byte");
  accessor!(short, Short, i16, "short");
  accessor!(int, Int, i32, "int");
  accessor!(long, Long, i64, "long");
  accessor!(float, Float, f32, "float");
  accessor!(double, Double, f64, "double");
  accessor!(ref byte_arr, ByteArr, [u8], "byte array");
  accessor!(ref string, String, str, "string");
  accessor!(ref list, List, [Tag], "list");
  accessor!(ref int_arr, IntArray, [i32], "int array");
  accessor!(ref long_arr, LongArray, [i64], "long array");

  /// If this is a compound tag, this returns the inner data of the tag.
  ///
  /// This is named differently from the [`compound`](Self::compound)
  /// constructor, which builds a compound tag.
  pub fn as_compound(&self) -> Result<&HashMap<String, Tag>, WrongTag> {
    match self {
      Self::Compound(v) => Ok(v),
      _ => Err(WrongTag::new("compound", self)),
    }
  }

  /// Returns the value of any integer tag (byte, short, int) as an `i32`. Some
  /// fields are stored with different widths depending on who wrote them.
  pub fn small_int(&self) -> Result<i32, WrongTag> {
    match self {
      Self::Byte(v) => Ok((*v).into()),
      Self::Short(v) => Ok((*v).into()),
      Self::Int(v) => Ok(*v),
      _ => Err(WrongTag::new("integer", self)),
    }
  }
}
