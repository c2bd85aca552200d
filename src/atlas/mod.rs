mod atlas;
mod district;
mod geojson;
mod winner;

pub use atlas::Atlas;
pub use district::Wahlkreise;
