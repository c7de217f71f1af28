use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::{entities::movie, error::AppResult};

/// The list filters are exclusive; at most one predicate is ever applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieFilter {
    All,
    Director(i32),
    Genre(i32),
}

#[derive(Clone)]
pub struct MovieRepo {
    db: DatabaseConnection,
}

impl MovieRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list(&self, filter: MovieFilter) -> AppResult<Vec<movie::Model>> {
        let query = match filter {
            MovieFilter::All => movie::Entity::find(),
            MovieFilter::Director(id) => {
                movie::Entity::find().filter(movie::Column::DirectorId.eq(id))
            }
            MovieFilter::Genre(id) => movie::Entity::find().filter(movie::Column::GenreId.eq(id)),
        };

        let movies = query.order_by_asc(movie::Column::Id).all(&self.db).await?;
        debug!(?filter, count = movies.len(), "listed movies");
        Ok(movies)
    }

    pub async fn insert(&self, row: movie::ActiveModel) -> AppResult<movie::Model> {
        Ok(row.insert(&self.db).await?)
    }

    /// Writes the set columns of `changes` in a single statement. Returns `false`
    /// when no movie has this id.
    pub async fn update(&self, id: i32, changes: movie::ActiveModel) -> AppResult<bool> {
        if !changes.is_changed() {
            return Ok(self.get(id).await?.is_some());
        }

        let res = movie::Entity::update_many()
            .set(changes)
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveValue::Set;

    use super::*;
    use crate::{
        db,
        error::AppError,
        models::{MovieFields, NameFields},
        repo::DirectorRepo,
    };

    fn fields(value: serde_json::Value) -> MovieFields {
        serde_json::from_value(value).unwrap()
    }

    async fn setup() -> (MovieRepo, DirectorRepo) {
        let db = db::memory().await;
        (MovieRepo::new(db.clone()), DirectorRepo::new(db))
    }

    async fn director(repo: &DirectorRepo, name: &str) -> i32 {
        let fields = NameFields { name: Some(Some(name.to_string())) };
        repo.insert(fields.into_new_director()).await.unwrap().id
    }

    #[tokio::test]
    async fn insert_then_get_returns_supplied_fields() {
        let (movies, _) = setup().await;

        let created = movies
            .insert(fields(serde_json::json!({ "title": "Heat", "year": 1995 })).into_new())
            .await
            .unwrap();
        let fetched = movies.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title.as_deref(), Some("Heat"));
        assert_eq!(fetched.year, Some(1995));
        assert_eq!(fetched.rating, None);
    }

    #[tokio::test]
    async fn filters_by_director_or_genre_never_both() {
        let (movies, directors) = setup().await;
        let nolan = director(&directors, "Nolan").await;
        let mann = director(&directors, "Mann").await;

        for (title, director_id) in [("Inception", nolan), ("Heat", mann), ("Tenet", nolan)] {
            movies
                .insert(
                    fields(serde_json::json!({ "title": title, "director_id": director_id }))
                        .into_new(),
                )
                .await
                .unwrap();
        }

        let titles = |list: Vec<movie::Model>| {
            list.into_iter().filter_map(|m| m.title).collect::<Vec<_>>()
        };

        assert_eq!(
            titles(movies.list(MovieFilter::Director(nolan)).await.unwrap()),
            ["Inception", "Tenet"]
        );
        assert_eq!(titles(movies.list(MovieFilter::Director(mann)).await.unwrap()), ["Heat"]);
        assert!(movies.list(MovieFilter::Genre(1)).await.unwrap().is_empty());
        assert_eq!(movies.list(MovieFilter::All).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_keeps_fields_not_in_changes() {
        let (movies, _) = setup().await;
        let created = movies
            .insert(fields(serde_json::json!({ "title": "Heat", "year": 1994 })).into_new())
            .await
            .unwrap();

        let changes = movie::ActiveModel { year: Set(Some(1995)), ..Default::default() };
        assert!(movies.update(created.id, changes).await.unwrap());

        let fetched = movies.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Heat"));
        assert_eq!(fetched.year, Some(1995));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let (movies, _) = setup().await;

        let changes = movie::ActiveModel { year: Set(Some(2000)), ..Default::default() };
        assert!(!movies.update(42, changes).await.unwrap());
        assert!(!movies.update(42, Default::default()).await.unwrap());
        assert!(!movies.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (movies, _) = setup().await;
        let created = movies.insert(MovieFields::default().into_new()).await.unwrap();

        assert!(movies.delete(created.id).await.unwrap());
        assert!(movies.get(created.id).await.unwrap().is_none());
        assert!(!movies.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_director_is_invalid_input() {
        let (movies, _) = setup().await;

        let err = movies
            .insert(fields(serde_json::json!({ "director_id": 99 })).into_new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)), "{err:?}");
    }

    #[tokio::test]
    async fn deleting_director_clears_reference() {
        let (movies, directors) = setup().await;
        let nolan = director(&directors, "Nolan").await;
        let created = movies
            .insert(
                fields(serde_json::json!({ "title": "Memento", "director_id": nolan })).into_new(),
            )
            .await
            .unwrap();

        assert!(directors.delete(nolan).await.unwrap());

        let fetched = movies.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.director_id, None);
    }
}
