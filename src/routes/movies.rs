use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, MovieFields},
    repo::MovieFilter,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    director_id: Option<String>,
    genre_id: Option<String>,
}

impl ListQuery {
    /// `director_id` wins over `genre_id`; empty values count as absent.
    fn filter(&self) -> AppResult<MovieFilter> {
        if let Some(id) = parse_id("director_id", self.director_id.as_deref())? {
            return Ok(MovieFilter::Director(id));
        }
        if let Some(id) = parse_id("genre_id", self.genre_id.as_deref())? {
            return Ok(MovieFilter::Genre(id));
        }
        Ok(MovieFilter::All)
    }
}

fn parse_id(name: &str, raw: Option<&str>) -> AppResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("{name} must be an integer, got {s:?}"))),
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(q), _): WithRejection<Query<ListQuery>, AppError>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.movies.list(q.filter()?).await?;
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(fields), _): WithRejection<Json<MovieFields>, AppError>,
) -> AppResult<Response> {
    let movie = state.movies.insert(fields.into_new()).await?;
    info!(movie_id = movie.id, "movie created");
    Ok(super::created(format!("/movies/{}", movie.id), Movie::from(movie)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.get(id).await?.ok_or_else(|| AppError::not_found("movie", id))?;
    Ok(Json(movie.into()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(fields), _): WithRejection<Json<MovieFields>, AppError>,
) -> AppResult<StatusCode> {
    if !state.movies.update(id, fields.into_changes()).await? {
        return Err(AppError::not_found("movie", id));
    }
    info!(movie_id = id, "movie updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.movies.delete(id).await? {
        return Err(AppError::not_found("movie", id));
    }
    info!(movie_id = id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
