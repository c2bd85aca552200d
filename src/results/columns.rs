use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Canonical name of the district-key column after header flattening.
pub const DISTRICT_KEY: &str = "WKR_NR";

/// Ordered candidate list used for map coloring, spelled as in the
/// wide-format source. Order matters: it is the tie-break for equal shares.
pub const DEFAULT_PARTIES: [&str; 7] =
    ["CDU", "SPD", "AFD", "FDP", "CSU", "DIELINKE", "B90/GRÜNE"];

/// Erst- oder Zweitstimme.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
pub enum VoteType {
    Erststimmen,
    Zweitstimmen,
}

impl VoteType {
    /// Header spelling in the wide-format source.
    pub fn label(self) -> &'static str {
        match self {
            VoteType::Erststimmen => "Erststimmen",
            VoteType::Zweitstimmen => "Zweitstimmen",
        }
    }

    /// `Stimme` code in the long-format source (1 = Erst, 2 = Zweit).
    pub fn ballot_position(self) -> i64 {
        match self {
            VoteType::Erststimmen => 1,
            VoteType::Zweitstimmen => 2,
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current election (Vorläufig) vs. previous period (Vorperiode).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
pub enum Period {
    Vorlaeufig,
    Vorperiode,
}

impl Period {
    /// Header spelling in the wide-format source.
    pub fn label(self) -> &'static str {
        match self {
            Period::Vorlaeufig => "Vorläufig",
            Period::Vorperiode => "Vorperiode",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed coordinate of one numeric column in the wide result table.
///
/// Column names are never built ad hoc; every lookup goes through
/// [`ResultKey::column_name`], so a key that does not exist in the table
/// fails loudly instead of silently missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultKey {
    pub party: String,
    pub vote: VoteType,
    pub period: Period,
}

impl ResultKey {
    pub fn new(party: impl Into<String>, vote: VoteType, period: Period) -> Self {
        Self { party: party.into(), vote, period }
    }

    /// The flattened column name this key resolves to.
    pub fn column_name(&self) -> String {
        flatten_header([self.party.as_str(), self.vote.label(), self.period.label()])
    }

    /// One key per party, keeping the declared party order.
    pub fn candidates(parties: &[&str], vote: VoteType, period: Period) -> Vec<ResultKey> {
        parties.iter().map(|&party| ResultKey::new(party, vote, period)).collect()
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// Join non-empty header levels with `_` into one compound column name.
pub fn flatten_header<'a>(levels: impl IntoIterator<Item = &'a str>) -> String {
    levels
        .into_iter()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Party identifier encoded in a flattened column name: the token before
/// the first `_`.
pub fn party_from_column(column: &str) -> &str {
    column.split('_').next().unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_round_trip() {
        let name = flatten_header(["CDU", "Zweitstimmen", "Vorläufig"]);
        assert_eq!(name, "CDU_Zweitstimmen_Vorläufig");
        assert_eq!(party_from_column(&name), "CDU");
    }

    #[test]
    fn flatten_skips_empty_levels() {
        assert_eq!(flatten_header(["WKR_NR", "", ""]), "WKR_NR");
        assert_eq!(flatten_header(["", " SPD ", ""]), "SPD");
    }

    #[test]
    fn key_builds_column_name() {
        let key = ResultKey::new("SPD", VoteType::Erststimmen, Period::Vorperiode);
        assert_eq!(key.column_name(), "SPD_Erststimmen_Vorperiode");
    }

    #[test]
    fn candidates_keep_order() {
        let keys =
            ResultKey::candidates(&DEFAULT_PARTIES, VoteType::Zweitstimmen, Period::Vorlaeufig);
        assert_eq!(keys.len(), 7);
        assert_eq!(keys[0].party, "CDU");
        assert_eq!(keys[6].party, "B90/GRÜNE");
        assert_eq!(keys[6].column_name(), "B90/GRÜNE_Zweitstimmen_Vorläufig");
    }

    #[test]
    fn ballot_positions() {
        assert_eq!(VoteType::Erststimmen.ballot_position(), 1);
        assert_eq!(VoteType::Zweitstimmen.ballot_position(), 2);
    }
}
