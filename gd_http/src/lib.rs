//! A blocking client for the GDMC HTTP interface. This only implements the
//! read endpoints needed to load a [`WorldSlice`](gd_world::WorldSlice).

#[macro_use]
extern crate log;

mod build_area;
mod error;
mod interface;


pub use build_area::BuildArea;
pub use error::InterfaceError;
pub use interface::{Interface, DEFAULT_HOST};
