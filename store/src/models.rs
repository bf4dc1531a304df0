use chrono::{DateTime, Utc};

/// The four fact families served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Math,
    Trivia,
    Years,
    Dates,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Math,
        Category::Trivia,
        Category::Years,
        Category::Dates,
    ];

    /// Directory name used by the raw fact dumps.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Trivia => "trivia",
            Category::Years => "years",
            Category::Dates => "dates",
        }
    }

    /// The `"type"` value carried in API responses.
    pub fn label(self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Trivia => "trivia",
            Category::Years => "year",
            Category::Dates => "date",
        }
    }
}

/// Math facts are keyed by a real number ("pi", "e" and friends show up in
/// the source data), unlike the other numeric categories.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFact {
    pub id: i64,
    pub number: f64,
    pub fact_fragment: String,
    pub fact_statement: String,
    pub was_submitted: bool,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriviaFact {
    pub id: i64,
    pub number: i64,
    pub fact_fragment: String,
    pub fact_statement: String,
    pub was_submitted: bool,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearFact {
    pub id: i64,
    pub year: i64,
    pub fact_fragment: String,
    pub fact_statement: String,
    pub was_submitted: bool,
    pub added_at: DateTime<Utc>,
}

/// Date facts are keyed by the day-ordinal of a fixed reference leap year
/// (1..=366); the historical year lives in its own column so facts about
/// February 29 exist whether or not that year was itself a leap year.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFact {
    pub id: i64,
    pub day_of_year: u16,
    pub year: i64,
    pub fact_fragment: String,
    pub fact_statement: String,
    pub was_submitted: bool,
    pub added_at: DateTime<Utc>,
}
