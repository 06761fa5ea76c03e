use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gd_common::{
  chunk::{BitArray, BlockState, CachedSection, Paletted},
  math::{SectionPos, SectionRelPos},
};

fn random_longs(len: usize) -> Vec<u64> {
  let mut v = 0x2545f4914f6cdd1d_u64;
  (0..len)
    .map(|_| {
      // xorshift
      v ^= v << 13;
      v ^= v >> 7;
      v ^= v << 17;
      v
    })
    .collect()
}

pub fn bits(c: &mut Criterion) {
  let arr = BitArray::from_data(5, 4096, random_longs(BitArray::longs_for(5, 4096))).unwrap();
  c.bench_function("bit array get", |b| {
    b.iter(|| {
      let mut sum = 0_u32;
      for i in 0..4096 {
        sum = sum.wrapping_add(arr.get(black_box(i)));
      }
      sum
    })
  });
  c.bench_function("bit array iter", |b| b.iter(|| arr.iter().fold(0_u32, u32::wrapping_add)));
}

pub fn section(c: &mut Criterion) {
  // 32 entries, so every 5 bit index is valid.
  let palette: Vec<BlockState> = (0..32).map(|i| BlockState::new(format!("test:{i}"))).collect();
  let data = random_longs(BitArray::longs_for(5, 4096));
  c.bench_function("section decode", |b| {
    b.iter(|| {
      CachedSection::new(
        SectionPos::new(0, 0, 0),
        Paletted::new(palette.clone(), Some(data.clone())),
        Paletted::single("minecraft:plains".to_string()),
      )
      .unwrap()
    })
  });
  let section = CachedSection::new(
    SectionPos::new(0, 0, 0),
    Paletted::new(palette, Some(data)),
    Paletted::single("minecraft:plains".to_string()),
  )
  .unwrap();
  c.bench_function("section lookup", |b| {
    b.iter(|| {
      let mut len = 0;
      for y in 0..16 {
        for z in 0..16 {
          for x in 0..16 {
            len += section.block_at(SectionRelPos::new(x, y, z)).name().len();
          }
        }
      }
      len
    })
  });
}

criterion_group!(benches, bits, section);
criterion_main!(benches);
