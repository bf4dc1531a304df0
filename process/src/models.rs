use std::collections::BTreeMap;

use serde::Deserialize;

/// One fact as it appears in the raw dumps.
#[derive(Deserialize, Debug, Clone)]
pub struct RawFact {
    pub text: String,

    /// Facts about the number being a number ("42 is the number you searched
    /// for") are marked self-referential upstream and dropped here.
    #[serde(rename = "self", default)]
    pub self_referential: bool,

    /// Part-of-speech tag; "NP" marks a proper noun whose casing must be kept.
    #[serde(default)]
    pub pos: Option<String>,

    /// Historical year, present only in date dumps.
    #[serde(default)]
    pub year: Option<i64>,
}

/// A dump file maps a number key (a day-ordinal for date dumps) to its facts.
/// BTreeMap keeps the import order deterministic.
pub type RawDump = BTreeMap<String, Vec<RawFact>>;
