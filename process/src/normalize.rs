//! Turns raw dump facts into the fragment/statement pair stored per row.
//!
//! A fragment has no leading subject and no trailing punctuation; the
//! statement prepends a subject prefix ("145 is", "February 29th is the day
//! in 2000 that") and ends with a period.

use calendar::{from_ordinal, month_name, with_ordinal_suffix};
use store::Category;

use crate::models::RawFact;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFact {
    pub fragment: String,
    pub statement: String,
    /// Historical year, only present for date facts.
    pub year: Option<i64>,
}

/// Normalizes one raw fact, or rejects it (`None`) when it is
/// self-referential, ends in grammar the statement form cannot carry, or
/// lacks the fields its category requires.
pub fn normalize(
    category: Category,
    number: i64,
    fact: &RawFact,
    current_year: i64,
) -> Option<NormalizedFact> {
    if fact.self_referential {
        return None;
    }

    let mut text = if fact.pos.as_deref() == Some("NP") {
        fact.text.clone()
    } else {
        lowercase_first(&fact.text)
    };

    let last = text.chars().last()?;
    if last == '.' {
        text.pop();
    } else if !last.is_ascii_alphanumeric() && last != ')' && last != '"' && last != '\'' {
        // Anything else likely ends in grammar we do not support.
        return None;
    }

    let prefix = prefix(category, number, fact.year, current_year)?;

    Some(NormalizedFact {
        statement: format!("{prefix} {text}."),
        fragment: text,
        year: fact.year,
    })
}

/// The subject prefix a statement starts with.
///
/// For date facts `number` is a day-ordinal; the codec turns it back into a
/// month/day pair for the human-readable form. Returns `None` for a date
/// fact whose ordinal is invalid or whose year is missing.
pub fn prefix(
    category: Category,
    number: i64,
    year: Option<i64>,
    current_year: i64,
) -> Option<String> {
    match category {
        Category::Math | Category::Trivia => Some(format!("{number} is")),

        Category::Dates => {
            let date = from_ordinal(number).ok()?;
            let month = month_name(date.month);
            let day = with_ordinal_suffix(u16::from(date.day));
            let year = year?;

            if year < 0 {
                Some(format!("{month} {day} is the day in {} BC that", -year))
            } else {
                Some(format!("{month} {day} is the day in {year} that"))
            }
        }

        Category::Years => {
            if number < 0 {
                Some(format!("{} BC is the year that", -number))
            } else if number > current_year {
                Some(format!("{number} will be the year that"))
            } else {
                Some(format!("{number} is the year that"))
            }
        }
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
