// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::facet::{FacetDimension, FacetListParams},
    state::AppState,
};

/// Lists the values of one facet dimension, served through the TTL cache.
/// `?subject_id=` narrows the topic dimension to one subject so dependent
/// dropdowns only offer consistent choices.
pub async fn list_facet_values(
    State(state): State<AppState>,
    Path(dimension): Path<FacetDimension>,
    Query(params): Query<FacetListParams>,
) -> Result<impl IntoResponse, AppError> {
    let parent = match dimension {
        FacetDimension::Topic => params.subject_id,
        _ => None,
    };

    let values = state
        .facet_cache
        .get(&state.store, dimension, parent)
        .await?;

    Ok(Json(values))
}
