use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use store::TriviaFact;

use super::FactResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct TriviaFactData {
    fragment: String,
    statement: String,
    number: i64,
    r#type: &'static str,
}

impl From<TriviaFact> for TriviaFactData {
    fn from(fact: TriviaFact) -> Self {
        Self {
            fragment: fact.fact_fragment,
            statement: fact.fact_statement,
            number: fact.number,
            r#type: "trivia",
        }
    }
}

/// GET /api/trivia/{number}
pub async fn fact(
    State(state): State<Arc<AppState>>,
    Path(number): Path<i64>,
) -> Result<Json<FactResponse<TriviaFactData>>, ApiError> {
    let fact = state
        .store
        .trivia_fact(number)?
        .ok_or_else(|| ApiError::NotFound(format!("A trivia fact for {number} not found")))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// GET /api/trivia/random
pub async fn random(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FactResponse<TriviaFactData>>, ApiError> {
    let fact = state
        .store
        .random_trivia_fact()?
        .ok_or_else(|| ApiError::NotFound("No trivia facts found".to_string()))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// POST /api/trivia/like/{id}
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if state.store.like_trivia_fact(id)? {
        Ok("You have liked this fact.")
    } else {
        Err(ApiError::NotFound(format!(
            "A trivia fact for id {id} not found"
        )))
    }
}
