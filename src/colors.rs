use std::collections::HashMap;

/// Color used for unknown parties and for districts where every candidate
/// value is absent.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Immutable party -> display color mapping.
///
/// Lookups never fail: a party without an entry resolves to the table's
/// fallback color. The table is passed explicitly into the pipelines that
/// need it, so the transforms stay pure and testable.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: HashMap<String, String>,
    fallback: String,
}

impl ColorTable {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            colors: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            fallback: FALLBACK_COLOR.to_string(),
        }
    }

    pub fn with_fallback(mut self, color: impl Into<String>) -> Self {
        self.fallback = color.into();
        self
    }

    /// Color for `party`, or the fallback when unmapped.
    pub fn get(&self, party: &str) -> &str {
        self.colors.get(party).map(String::as_str).unwrap_or(&self.fallback)
    }

    #[inline]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette used for coloring the Wahlkreis map by leading party.
    /// Party spellings match the wide-format result columns.
    pub fn winner_defaults() -> Self {
        Self::new([
            ("CDU", "#000000"),
            ("SPD", "#FF0000"),
            ("AFD", "#0000FF"),
            ("FDP", "#FFFF00"),
            ("CSU", "#808080"),
            ("DIELINKE", "#800080"),
            ("B90/GRÜNE", "#008000"),
        ])
    }

    /// Per-party palette for the district detail view. Party spellings match
    /// the `Gruppenname` column of the long-format results.
    pub fn chart_defaults() -> Self {
        Self::new([
            ("CDU", "#000000"),
            ("SPD", "#E3000F"),
            ("AfD", "#009EE0"),
            ("FDP", "#FFED00"),
            ("DIE LINKE", "#BE3075"),
            ("GRÜNE", "#64A12D"),
            ("CSU", "#008AC5"),
            ("FREIE WÄHLER", "#FF6600"),
            ("Die PARTEI", "#BB1E10"),
            ("Tierschutzpartei", "#00A650"),
            ("HEIMAT (2021: NPD)", "#A51D21"),
            ("PIRATEN", "#EE8208"),
            ("ÖDP", "#E65F00"),
            ("V-Partei³", "#009473"),
            ("DiB", "#D31566"),
            ("BP", "#FFD700"),
            ("Tierschutzallianz", "#B7005D"),
            ("MLPD", "#E2001A"),
            ("Verjüngungsforschung (2021: Gesundheitsforschung)", "#008000"),
            ("MENSCHLICHE WELT", "#7A0026"),
            ("DKP", "#D7141A"),
            ("Die Grauen", "#808080"),
            ("BüSo", "#1E90FF"),
            ("Die Humanisten", "#ED1C24"),
            ("Gartenpartei", "#006400"),
            ("du.", "#005BAC"),
            ("SGP", "#8B0000"),
            ("dieBasis", "#00A499"),
            ("Bündnis C", "#1B5E20"),
            ("BÜRGERBEWEGUNG", "#9C27B0"),
            ("III. Weg", "#004B49"),
            ("BÜNDNIS21", "#F57C00"),
            ("LIEBE", "#FF69B4"),
            ("Wir Bürger (2021: LKR)", "#002147"),
            ("PdF", "#008080"),
            ("LfK", "#4B0082"),
            ("SSW", "#002F6C"),
            ("Team Todenhöfer", "#B22222"),
            ("UNABHÄNGIGE", "#3F51B5"),
            ("Volt", "#572A8F"),
            ("Volksabstimmung", "#DAA520"),
            ("B*", "#DC143C"),
            ("sonstige", "#C0C0C0"),
            ("FAMILIE", "#FF4500"),
            ("Graue Panther", "#708090"),
            ("KlimalisteBW", "#2E8B57"),
            ("THP", "#D2691E"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_party_resolves() {
        let colors = ColorTable::winner_defaults();
        assert_eq!(colors.get("SPD"), "#FF0000");
        assert_eq!(colors.get("B90/GRÜNE"), "#008000");
    }

    #[test]
    fn unknown_party_falls_back() {
        let colors = ColorTable::winner_defaults();
        assert_eq!(colors.get("Piratenpartei Kambodscha"), FALLBACK_COLOR);
    }

    #[test]
    fn custom_fallback() {
        let colors = ColorTable::new([("A", "#111111")]).with_fallback("#ABCDEF");
        assert_eq!(colors.get("A"), "#111111");
        assert_eq!(colors.get("B"), "#ABCDEF");
        assert_eq!(colors.fallback(), "#ABCDEF");
    }
}
