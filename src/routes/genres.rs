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
    models::{Genre, NameFields},
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.genres.list().await?;
    Ok(Json(genres.into_iter().map(Genre::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(fields), _): WithRejection<Json<NameFields>, AppError>,
) -> AppResult<Response> {
    let genre = state.genres.insert(fields.into_new_genre()).await?;
    info!(genre_id = genre.id, "genre created");
    Ok(super::created(format!("/genres/{}", genre.id), Genre::from(genre)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Genre>> {
    let genre = state.genres.get(id).await?.ok_or_else(|| AppError::not_found("genre", id))?;
    Ok(Json(genre.into()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(fields), _): WithRejection<Json<NameFields>, AppError>,
) -> AppResult<StatusCode> {
    if !state.genres.update(id, fields.into_genre_changes()).await? {
        return Err(AppError::not_found("genre", id));
    }
    info!(genre_id = id, "genre updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.genres.delete(id).await? {
        return Err(AppError::not_found("genre", id));
    }
    info!(genre_id = id, "genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
