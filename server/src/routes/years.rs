use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use store::YearFact;

use super::FactResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct YearFactData {
    fragment: String,
    statement: String,
    year: i64,
    r#type: &'static str,
}

impl From<YearFact> for YearFactData {
    fn from(fact: YearFact) -> Self {
        Self {
            fragment: fact.fact_fragment,
            statement: fact.fact_statement,
            year: fact.year,
            r#type: "year",
        }
    }
}

/// GET /api/years/{year}
pub async fn fact(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i64>,
) -> Result<Json<FactResponse<YearFactData>>, ApiError> {
    let fact = state
        .store
        .year_fact(year)?
        .ok_or_else(|| ApiError::NotFound(format!("A fact for {year} not found")))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// GET /api/years/random
pub async fn random(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FactResponse<YearFactData>>, ApiError> {
    let fact = state
        .store
        .random_year_fact()?
        .ok_or_else(|| ApiError::NotFound("No year facts found".to_string()))?;

    Ok(Json(FactResponse { fact: fact.into() }))
}

/// POST /api/years/like/{id}
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if state.store.like_year_fact(id)? {
        Ok("You have liked this fact.")
    } else {
        Err(ApiError::NotFound(format!(
            "A year fact for id {id} not found"
        )))
    }
}
