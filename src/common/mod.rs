mod cache;
mod data;
mod fs;
mod polygon;

pub use cache::SourceCache;
pub(crate) use data::*;
pub(crate) use fs::*;
pub(crate) use polygon::*;
