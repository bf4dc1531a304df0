use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use calendar::{from_ordinal, to_ordinal_checked, CalendarError};
use serde::Serialize;
use store::DateFact;

use super::FactResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct DateFactData {
    fragment: String,
    statement: String,
    month: u8,
    day: u8,
    year: i64,
    r#type: &'static str,
}

/// GET /api/dates/{month}/{day}
///
/// The month/day pair is translated to the day-ordinal used as the storage
/// key. Codec rejections become 400s carrying the codec's message text.
pub async fn fact(
    State(state): State<Arc<AppState>>,
    Path((month, day)): Path<(String, String)>,
) -> Result<Json<FactResponse<DateFactData>>, ApiError> {
    // Both path segments are type-checked together before any range check,
    // matching the codec's validation order.
    let ordinal = match (month.parse::<f64>(), day.parse::<f64>()) {
        (Ok(month), Ok(day)) => to_ordinal_checked(month, day)?,
        _ => return Err(CalendarError::InvalidMonthDayTypes.into()),
    };

    let fact = state
        .store
        .date_fact(ordinal)?
        .ok_or_else(|| ApiError::NotFound(format!("A date fact for {month}/{day} not found")))?;

    Ok(Json(FactResponse {
        fact: respond(fact)?,
    }))
}

/// GET /api/dates/random
pub async fn random(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FactResponse<DateFactData>>, ApiError> {
    let fact = state
        .store
        .random_date_fact()?
        .ok_or_else(|| ApiError::NotFound("No date facts found".to_string()))?;

    Ok(Json(FactResponse {
        fact: respond(fact)?,
    }))
}

/// POST /api/dates/like/{id}
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if state.store.like_date_fact(id)? {
        Ok("You have liked this fact.")
    } else {
        Err(ApiError::NotFound(format!(
            "A date fact for id {id} not found"
        )))
    }
}

/// Stored ordinals come from the import pipeline through the same codec, so
/// the reverse conversion failing means the database row is corrupt.
fn respond(fact: DateFact) -> Result<DateFactData, ApiError> {
    let date = from_ordinal(i64::from(fact.day_of_year)).map_err(|err| {
        ApiError::Internal(format!(
            "stored day_of_year {} for date fact {}: {err}",
            fact.day_of_year, fact.id
        ))
    })?;

    Ok(DateFactData {
        fragment: fact.fact_fragment,
        statement: fact.fact_statement,
        month: date.month,
        day: date.day,
        year: fact.year,
        r#type: "date",
    })
}
