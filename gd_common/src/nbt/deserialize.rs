use super::{Tag, NBT};
use crate::util::{Buffer, BufferError};
use flate2::read::GzDecoder;
use std::{collections::HashMap, error::Error, fmt, io, io::Read};

/// Compounds and lists nested deeper than this are rejected. Vanilla uses the
/// same limit.
const MAX_DEPTH: u32 = 512;

#[derive(Debug)]
pub enum ParseError {
  InvalidType(u8),
  Buffer(BufferError),
  Gzip(io::Error),
  TooDeep,
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::InvalidType(ty) => write!(f, "invalid tag type: {ty}"),
      Self::Buffer(e) => write!(f, "{e}"),
      Self::Gzip(e) => write!(f, "invalid gzip data: {e}"),
      Self::TooDeep => write!(f, "tags are nested more than {MAX_DEPTH} levels deep"),
    }
  }
}

impl Error for ParseError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::Buffer(e) => Some(e),
      Self::Gzip(e) => Some(e),
      _ => None,
    }
  }
}

impl From<BufferError> for ParseError {
  fn from(e: BufferError) -> Self { ParseError::Buffer(e) }
}

impl NBT {
  /// Deserializes the given byte array as nbt data. If the data starts with
  /// the gzip header, it is decompressed first. Otherwise, this is the same as
  /// [`deserialize`](Self::deserialize).
  pub fn deserialize_file(buf: Vec<u8>) -> Result<Self, ParseError> {
    if buf.starts_with(&[0x1f, 0x8b]) {
      let mut data = vec![];
      GzDecoder::new(buf.as_slice()).read_to_end(&mut data).map_err(ParseError::Gzip)?;
      NBT::deserialize(data)
    } else {
      NBT::deserialize(buf)
    }
  }

  /// Deserializes the given byte array as uncompressed nbt data.
  pub fn deserialize(buf: Vec<u8>) -> Result<Self, ParseError> {
    NBT::deserialize_buf(&mut Buffer::new(buf))
  }

  /// Deserializes a single named tag from the buffer. The buffer is left just
  /// after the end of the tag.
  pub fn deserialize_buf<T: AsRef<[u8]>>(buf: &mut Buffer<T>) -> Result<Self, ParseError> {
    let ty = buf.read_u8()?;
    if ty == 0 {
      return Ok(NBT::empty(""));
    }
    let name = buf.read_short_str()?;
    Ok(NBT { tag: Tag::deserialize(ty, buf, 0)?, name })
  }
}

impl Tag {
  fn deserialize<T: AsRef<[u8]>>(
    ty: u8,
    buf: &mut Buffer<T>,
    depth: u32,
  ) -> Result<Self, ParseError> {
    if depth > MAX_DEPTH {
      return Err(ParseError::TooDeep);
    }
    Ok(match ty {
      0 => Self::End,
      1 => Self::Byte(buf.read_i8()?),
      2 => Self::Short(buf.read_i16()?),
      3 => Self::Int(buf.read_i32()?),
      4 => Self::Long(buf.read_i64()?),
      5 => Self::Float(buf.read_f32()?),
      6 => Self::Double(buf.read_f64()?),
      7 => {
        let len = buf.read_len(1)?;
        Self::ByteArr(buf.read_buf(len)?)
      }
      8 => Self::String(buf.read_short_str()?),
      9 => {
        let inner_ty = buf.read_u8()?;
        let len = buf.read_len(1)?;
        let mut inner = Vec::with_capacity(len);
        for _ in 0..len {
          inner.push(Tag::deserialize(inner_ty, buf, depth + 1)?);
        }
        Self::List(inner)
      }
      10 => {
        let mut inner = HashMap::new();
        loop {
          let ty = buf.read_u8()?;
          if ty == 0 {
            break;
          }
          let name = buf.read_short_str()?;
          let tag = Tag::deserialize(ty, buf, depth + 1)?;
          inner.insert(name, tag);
        }
        Self::Compound(inner)
      }
      11 => {
        let len = buf.read_len(4)?;
        let mut inner = Vec::with_capacity(len);
        for _ in 0..len {
          inner.push(buf.read_i32()?);
        }
        Self::IntArray(inner)
      }
      12 => {
        let len = buf.read_len(8)?;
        let mut inner = Vec::with_capacity(len);
        for _ in 0..len {
          inner.push(buf.read_i64()?);
        }
        Self::LongArray(inner)
      }
      _ => return Err(ParseError::InvalidType(ty)),
    })
  }
}
