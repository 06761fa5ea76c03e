use crate::util::Buffer;
use flate2::{write::GzEncoder, Compression};
use std::io::Write;

use super::{Tag, NBT};

impl NBT {
  pub fn serialize_buf(&self, out: &mut Buffer<&mut Vec<u8>>) {
    out.write_u8(self.tag.ty());
    if matches!(self.tag, Tag::End) {
      return;
    }
    out.write_short_str(&self.name);
    self.tag.serialize(out);
  }
  pub fn serialize(&self) -> Vec<u8> {
    let mut data = vec![];
    let mut out = Buffer::new(&mut data);
    self.serialize_buf(&mut out);
    data
  }
  /// Serializes the tag, and then gzip compresses it. This is the format nbt
  /// files are usually stored in.
  pub fn serialize_gzip(&self) -> Vec<u8> {
    let mut enc = GzEncoder::new(vec![], Compression::default());
    enc.write_all(&self.serialize()).expect("could not write to buffer");
    enc.finish().expect("could not write to buffer")
  }
}

impl Tag {
  /// Returns the type of the tag.
  pub fn ty(&self) -> u8 {
    match self {
      Self::End => 0,
      Self::Byte(_) => 1,
      Self::Short(_) => 2,
      Self::Int(_) => 3,
      Self::Long(_) => 4,
      Self::Float(_) => 5,
      Self::Double(_) => 6,
      Self::ByteArr(_) => 7,
      Self::String(_) => 8,
      Self::List(_) => 9,
      Self::Compound(_) => 10,
      Self::IntArray(_) => 11,
      Self::LongArray(_) => 12,
    }
  }

  /// Serializes the data of the tag. Does not add type byte.
  fn serialize(&self, out: &mut Buffer<&mut Vec<u8>>) {
    match self {
      Self::End => (),
      Self::Byte(v) => out.write_i8(*v),
      Self::Short(v) => out.write_i16(*v),
      Self::Int(v) => out.write_i32(*v),
      Self::Long(v) => out.write_i64(*v),
      Self::Float(v) => out.write_f32(*v),
      Self::Double(v) => out.write_f64(*v),
      Self::ByteArr(v) => {
        out.write_i32(v.len() as i32);
        out.write_buf(v);
      }
      Self::String(v) => out.write_short_str(v),
      Self::List(v) => {
        // An empty list has no element type, so vanilla writes End.
        out.write_u8(v.first().map(|v| v.ty()).unwrap_or(0));
        out.write_i32(v.len() as i32);
        for tag in v {
          tag.serialize(out);
        }
      }
      Self::Compound(v) => {
        for (name, tag) in v {
          out.write_u8(tag.ty());
          out.write_short_str(name);
          tag.serialize(out);
        }
        out.write_u8(Self::End.ty());
      }
      Self::IntArray(v) => {
        out.write_i32(v.len() as i32);
        for elem in v {
          out.write_i32(*elem);
        }
      }
      Self::LongArray(v) => {
        out.write_i32(v.len() as i32);
        for elem in v {
          out.write_i64(*elem);
        }
      }
    }
  }
}
