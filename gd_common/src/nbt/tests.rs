use super::*;
use pretty_assertions::assert_eq;

fn chunk_like() -> NBT {
  NBT::new(
    "",
    Tag::compound(&[
      ("DataVersion", Tag::Int(3120)),
      ("Status", Tag::String("minecraft:full".into())),
      (
        "sections",
        Tag::List(vec![Tag::compound(&[
          ("Y", Tag::Byte(-4)),
          (
            "block_states",
            Tag::compound(&[
              (
                "palette",
                Tag::List(vec![Tag::compound(&[(
                  "Name",
                  Tag::String("minecraft:bedrock".into()),
                )])]),
              ),
              ("data", Tag::LongArray(vec![-1, 0, i64::MAX])),
            ]),
          ),
        ])]),
      ),
      ("Heights", Tag::IntArray(vec![1, 2, 3])),
      ("Light", Tag::ByteArr(vec![0, 15, 255])),
      ("Pos", Tag::List(vec![Tag::Double(1.5), Tag::Double(-2.0)])),
      ("Scale", Tag::Float(0.25)),
      ("Seed", Tag::Long(-5)),
      ("Count", Tag::Short(300)),
      ("Empty", Tag::List(vec![])),
    ]),
  )
}

#[test]
fn test_list() {
  let list = NBT::new("List", Tag::List(vec![Tag::Int(5), Tag::Int(6)]));
  assert_eq!(list.tag().list().unwrap(), &[Tag::Int(5), Tag::Int(6)]);
}

#[test]
#[should_panic]
fn mixed_list() { NBT::new("List", Tag::List(vec![Tag::Int(5), Tag::Byte(6)])); }

#[test]
fn read_what_was_written() {
  let nbt = chunk_like();
  assert_eq!(NBT::deserialize(nbt.serialize()).unwrap(), nbt);
  assert_eq!(NBT::deserialize_file(nbt.serialize()).unwrap(), nbt);
  assert_eq!(NBT::deserialize_file(nbt.serialize_gzip()).unwrap(), nbt);
}

#[test]
fn read_known_bytes() {
  // TAG_Compound "hello world" { TAG_String "name": "Bananrama" }, the usual test.nbt file.
  let data = vec![
    0x0a, 0x00, 0x0b, b'h', b'e', b'l', b'l', b'o', b' ', b'w', b'o', b'r', b'l', b'd', 0x08, 0x00,
    0x04, b'n', b'a', b'm', b'e', 0x00, 0x09, b'B', b'a', b'n', b'a', b'n', b'r', b'a', b'm', b'a',
    0x00,
  ];
  let nbt = NBT::deserialize(data).unwrap();
  assert_eq!(nbt.name(), "hello world");
  assert_eq!(nbt.compound().unwrap()["name"].string().unwrap(), "Bananrama");
}

#[test]
fn accessors() {
  let nbt = chunk_like();
  let root = nbt.compound().unwrap();
  assert_eq!(root["DataVersion"].int(), Ok(3120));
  assert_eq!(root["Count"].small_int(), Ok(300));
  let section = &root["sections"].list().unwrap()[0];
  assert_eq!(section.as_compound().unwrap()["Y"].small_int(), Ok(-4));

  let err = root["DataVersion"].string().unwrap_err();
  assert_eq!(err.expected(), "string");
  assert_eq!(err.found(), "int");
  assert_eq!(err.to_string(), "expected a string tag, got a int tag");
  assert!(root["Status"].small_int().is_err());
  assert!(root["Status"].as_compound().is_err());
}

#[test]
fn truncated() {
  let data = chunk_like().serialize();
  for len in [0, 1, 5, data.len() / 2, data.len() - 1] {
    assert!(NBT::deserialize(data[..len].to_vec()).is_err(), "parsed truncated data of len {len}");
  }
}

#[test]
fn invalid_type() {
  // A compound containing a tag with type 13
  let data = vec![0x0a, 0x00, 0x00, 0x0d, 0x00, 0x00];
  assert!(matches!(NBT::deserialize(data), Err(ParseError::InvalidType(13))));
}

#[test]
fn huge_length() {
  // A long array claiming to have i32::MAX elements
  let data = vec![0x0c, 0x00, 0x00, 0x7f, 0xff, 0xff, 0xff, 0x00];
  assert!(matches!(NBT::deserialize(data), Err(ParseError::Buffer(_))));
}

#[test]
fn too_deep() {
  // 600 nested lists of lists
  let mut data = vec![0x09, 0x00, 0x00];
  for _ in 0..600 {
    data.extend([0x09, 0x00, 0x00, 0x00, 0x01]);
  }
  data.extend([0x00, 0x00, 0x00, 0x00, 0x00]);
  assert!(matches!(NBT::deserialize(data), Err(ParseError::TooDeep)));
}

#[test]
fn bad_gzip() {
  let data = vec![0x1f, 0x8b, 0x00, 0x01];
  assert!(matches!(NBT::deserialize_file(data), Err(ParseError::Gzip(_))));
}
