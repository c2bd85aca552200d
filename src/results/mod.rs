mod columns;
mod long;
mod wide;

pub use columns::{
    flatten_header, party_from_column, Period, ResultKey, VoteType, DEFAULT_PARTIES, DISTRICT_KEY,
};
pub use long::LongResults;
pub use wide::WideResults;

pub(crate) use long::{ANZAHL, GEBIETSNAME, GRUPPENART, GRUPPENNAME, PROZENT, STIMME};
