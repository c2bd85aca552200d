#![doc = "Wahlatlas public API"]
mod atlas;
mod colors;
mod common;
mod detail;
mod results;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use atlas::{Atlas, Wahlkreise};

#[doc(inline)]
pub use colors::{ColorTable, FALLBACK_COLOR};

#[doc(inline)]
pub use common::SourceCache;

#[doc(inline)]
pub use detail::{detail_rows, PartyShare};

#[doc(inline)]
pub use results::{
    flatten_header, party_from_column, LongResults, Period, ResultKey, VoteType, WideResults,
    DEFAULT_PARTIES, DISTRICT_KEY,
};
