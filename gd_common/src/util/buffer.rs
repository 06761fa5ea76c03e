use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::{
  error::Error,
  fmt, io,
  io::{Cursor, Read, Write},
  string::FromUtf8Error,
};

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Reading,
  Writing,
}

use Mode::Reading;

#[derive(Debug)]
pub struct BufferError {
  err:  BufferErrorKind,
  pos:  u64,
  mode: Mode,
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.mode == Mode::Reading {
      write!(f, "error while reading from buffer at index {}: {}", self.pos, self.err)
    } else {
      write!(f, "error while writing to buffer at index {}: {}", self.pos, self.err)
    }
  }
}

impl BufferError {
  pub fn kind(&self) -> &BufferErrorKind { &self.err }
  /// The index into the buffer where this error happened.
  pub fn pos(&self) -> u64 { self.pos }
}

#[derive(Debug)]
pub enum BufferErrorKind {
  IO(io::Error),
  FromUtf8Error(FromUtf8Error),
  ArrayTooLong { len: u64, max: u64 },
  NegativeLen(i32),
}

impl fmt::Display for BufferErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::IO(e) => write!(f, "{}", e),
      Self::FromUtf8Error(e) => write!(f, "{}", e),
      Self::ArrayTooLong { len, max } => {
        write!(f, "array is `{}` bytes, longer than the `{}` bytes left", len, max)
      }
      Self::NegativeLen(len) => write!(f, "len `{}` is negative", len),
    }
  }
}

impl Error for BufferError {}

impl From<io::Error> for BufferErrorKind {
  fn from(e: io::Error) -> Self { BufferErrorKind::IO(e) }
}
impl From<FromUtf8Error> for BufferErrorKind {
  fn from(e: FromUtf8Error) -> Self { BufferErrorKind::FromUtf8Error(e) }
}

/// A big endian cursor over some bytes. Reading is supported for anything
/// that derefs to `[u8]`, and writing is supported for anything a
/// [`Cursor`] can write to.
#[derive(Debug)]
pub struct Buffer<T> {
  data: Cursor<T>,
}

macro_rules! add_read {
  ($fn: ident, $ty: ty) => {
    pub fn $fn(&mut self) -> Result<$ty> {
      self.data.$fn::<BigEndian>().map_err(|e| self.err(e, Reading))
    }
  };
}
// The same as add_read(), but with no type parameter
macro_rules! add_read_byte {
  ($fn: ident, $ty: ty) => {
    pub fn $fn(&mut self) -> Result<$ty> { self.data.$fn().map_err(|e| self.err(e, Reading)) }
  };
}

macro_rules! add_write {
  ($fn: ident, $ty: ty) => {
    pub fn $fn(&mut self, v: $ty) {
      self.data.$fn::<BigEndian>(v).expect("could not write to buffer")
    }
  };
}
// The same as add_write(), but with no type parameter
macro_rules! add_write_byte {
  ($fn: ident, $ty: ty) => {
    pub fn $fn(&mut self, v: $ty) { self.data.$fn(v).expect("could not write to buffer") }
  };
}

impl<T> Buffer<T> {
  pub fn new(data: T) -> Self { Buffer { data: Cursor::new(data) } }

  fn err(&self, e: impl Into<BufferErrorKind>, mode: Mode) -> BufferError {
    BufferError { err: e.into(), pos: self.data.position(), mode }
  }
}

impl<T> Buffer<T>
where
  T: AsRef<[u8]>,
{
  /// Returns the number of bytes that have not been read yet.
  pub fn remaining(&self) -> usize {
    let len = self.data.get_ref().as_ref().len();
    let index = usize::try_from(self.data.position()).unwrap_or(usize::MAX);
    len.saturating_sub(index)
  }

  add_read_byte!(read_u8, u8);
  add_read!(read_u16, u16);
  add_read_byte!(read_i8, i8);
  add_read!(read_i16, i16);
  add_read!(read_i32, i32);
  add_read!(read_i64, i64);

  add_read!(read_f32, f32);
  add_read!(read_f64, f64);

  /// Reads exactly `len` bytes. If there are not enough bytes left, this fails
  /// without allocating anything.
  pub fn read_buf(&mut self, len: usize) -> Result<Vec<u8>> {
    if len > self.remaining() {
      return Err(self.err(
        BufferErrorKind::ArrayTooLong { len: len as u64, max: self.remaining() as u64 },
        Reading,
      ));
    }
    let mut buf = vec![0; len];
    self.data.read_exact(&mut buf).map_err(|e| self.err(e, Reading))?;
    Ok(buf)
  }

  /// Reads an `i32` length prefix, for an array where every element takes
  /// `elem_size` bytes. This fails if the length is negative, or if the array
  /// could not possibly fit in the rest of the buffer. This makes sure a
  /// corrupt length can't cause a huge allocation.
  pub fn read_len(&mut self, elem_size: usize) -> Result<usize> {
    let len = self.read_i32()?;
    let len =
      usize::try_from(len).map_err(|_| self.err(BufferErrorKind::NegativeLen(len), Reading))?;
    let bytes = len.saturating_mul(elem_size.max(1));
    if bytes > self.remaining() {
      return Err(self.err(
        BufferErrorKind::ArrayTooLong { len: bytes as u64, max: self.remaining() as u64 },
        Reading,
      ));
    }
    Ok(len)
  }

  /// Reads a string prefixed with a `u16` length. This is the string format
  /// used in nbt.
  pub fn read_short_str(&mut self) -> Result<String> {
    let len = self.read_u16()?;
    let vec = self.read_buf(len.into())?;
    String::from_utf8(vec).map_err(|e| self.err(e, Reading))
  }
}

impl<T> Buffer<T>
where
  Cursor<T>: io::Write,
{
  add_write_byte!(write_u8, u8);
  add_write!(write_u16, u16);
  add_write_byte!(write_i8, i8);
  add_write!(write_i16, i16);
  add_write!(write_i32, i32);
  add_write!(write_i64, i64);

  add_write!(write_f32, f32);
  add_write!(write_f64, f64);

  /// This doesn't return a result, as the only thing that could go wrong is a
  /// oom error, which isn't even returned as an error.
  pub fn write_buf(&mut self, v: &[u8]) {
    self.data.write_all(v).expect("could not write to buffer");
  }

  /// Writes a string with a `u16` length prefix.
  ///
  /// # Panics
  ///
  /// If `v` is longer than `u16::MAX` bytes.
  pub fn write_short_str(&mut self, v: &str) {
    let len = u16::try_from(v.len())
      .unwrap_or_else(|_| panic!("string of {} bytes is too long for a short string", v.len()));
    self.write_u16(len);
    self.write_buf(v.as_bytes());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn read_big_endian() {
    let data = vec![0x01, 0x02, 0xff, 0xff, 0xff, 0xfe, 0x80];
    let mut buf = Buffer::new(&data);
    assert_eq!(buf.read_u16().unwrap(), 0x0102);
    assert_eq!(buf.read_i32().unwrap(), -2);
    assert_eq!(buf.read_i8().unwrap(), -128);
    assert_eq!(buf.remaining(), 0);
    assert!(buf.read_u8().is_err());
  }

  #[test]
  fn read_buf_too_long() {
    let data = vec![1, 2, 3];
    let mut buf = Buffer::new(&data);
    let err = buf.read_buf(4).unwrap_err();
    assert!(matches!(err.kind(), BufferErrorKind::ArrayTooLong { len: 4, max: 3 }));
    // Nothing was consumed
    assert_eq!(buf.read_buf(3).unwrap(), vec![1, 2, 3]);
  }

  #[test]
  fn read_len() {
    let mut data = vec![];
    let mut buf = Buffer::new(&mut data);
    buf.write_i32(2);
    buf.write_i64(5);
    buf.write_i64(6);
    buf.write_i32(-1);
    let mut buf = Buffer::new(&data);
    assert_eq!(buf.read_len(8).unwrap(), 2);
    assert_eq!(buf.read_i64().unwrap(), 5);
    assert_eq!(buf.read_i64().unwrap(), 6);
    assert!(matches!(buf.read_len(8).unwrap_err().kind(), BufferErrorKind::NegativeLen(-1)));

    let mut data = vec![];
    let mut buf = Buffer::new(&mut data);
    buf.write_i32(1000);
    buf.write_i64(5);
    let mut buf = Buffer::new(&data);
    let err = buf.read_len(8).unwrap_err();
    assert!(matches!(err.kind(), BufferErrorKind::ArrayTooLong { .. }));
  }

  #[test]
  fn short_str() {
    let mut data = vec![];
    let mut buf = Buffer::new(&mut data);
    buf.write_short_str("minecraft:stone");
    assert_eq!(data[..2], [0, 15]);
    let mut buf = Buffer::new(&data);
    assert_eq!(buf.read_short_str().unwrap(), "minecraft:stone");
  }

  #[test]
  fn short_str_max_len() {
    let long = "a".repeat(u16::MAX.into());
    let mut data = vec![];
    let mut buf = Buffer::new(&mut data);
    buf.write_short_str(&long);
    assert_eq!(data[..2], [0xff, 0xff]);
    let mut buf = Buffer::new(&data);
    assert_eq!(buf.read_short_str().unwrap(), long);
  }

  #[test]
  #[should_panic(expected = "too long for a short string")]
  fn short_str_too_long() {
    let mut data = vec![];
    let mut buf = Buffer::new(&mut data);
    buf.write_short_str(&"a".repeat(70000));
  }

  #[test]
  fn error_pos() {
    let data = vec![0, 3, b'a', b'b'];
    let mut buf = Buffer::new(&data);
    let err = buf.read_short_str().unwrap_err();
    assert_eq!(err.pos(), 2);
    assert!(matches!(err.kind(), BufferErrorKind::ArrayTooLong { len: 3, max: 2 }));
    assert_eq!(
      err.to_string(),
      "error while reading from buffer at index 2: array is `3` bytes, longer than the `2` \
       bytes left"
    );
  }
}
