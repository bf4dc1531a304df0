use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use store::MathFact;

use super::FactResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct MathFactData {
    fragment: String,
    statement: String,
    number: f64,
    r#type: &'static str,
}

impl From<MathFact> for MathFactData {
    fn from(fact: MathFact) -> Self {
        Self {
            fragment: fact.fact_fragment,
            statement: fact.fact_statement,
            number: fact.number,
            r#type: "math",
        }
    }
}

/// GET /api/math/{number} — math facts accept integer or float keys.
pub async fn fact(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<FactResponse<MathFactData>>, ApiError> {
    let parsed: f64 = number.parse().map_err(|_| {
        ApiError::BadRequest("Invalid data: number must be an integer or float".to_string())
    })?;

    let fact = state
        .store
        .math_fact(parsed)?
        .ok_or_else(|| ApiError::NotFound(format!("A math fact for {number} not found")))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// GET /api/math/random
pub async fn random(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FactResponse<MathFactData>>, ApiError> {
    let fact = state
        .store
        .random_math_fact()?
        .ok_or_else(|| ApiError::NotFound("No math facts found".to_string()))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// POST /api/math/like/{id}
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if state.store.like_math_fact(id)? {
        Ok("You have liked this fact.")
    } else {
        Err(ApiError::NotFound(format!(
            "A math fact for id {id} not found"
        )))
    }
}
