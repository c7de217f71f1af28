use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Director, NameFields},
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Director>>> {
    let directors = state.directors.list().await?;
    Ok(Json(directors.into_iter().map(Director::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(fields), _): WithRejection<Json<NameFields>, AppError>,
) -> AppResult<Response> {
    let director = state.directors.insert(fields.into_new_director()).await?;
    info!(director_id = director.id, "director created");
    Ok(super::created(format!("/directors/{}", director.id), Director::from(director)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Director>> {
    let director =
        state.directors.get(id).await?.ok_or_else(|| AppError::not_found("director", id))?;
    Ok(Json(director.into()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(fields), _): WithRejection<Json<NameFields>, AppError>,
) -> AppResult<StatusCode> {
    if !state.directors.update(id, fields.into_director_changes()).await? {
        return Err(AppError::not_found("director", id));
    }
    info!(director_id = id, "director updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.directors.delete(id).await? {
        return Err(AppError::not_found("director", id));
    }
    info!(director_id = id, "director deleted");
    Ok(StatusCode::NO_CONTENT)
}
