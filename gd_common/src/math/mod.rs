mod pos;
mod rect;

pub use pos::{ChunkPos, Pos, SectionPos, SectionRelPos};
pub use rect::Rect;
