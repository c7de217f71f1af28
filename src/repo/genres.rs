use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{entities::genre, error::AppResult};

#[derive(Clone)]
pub struct GenreRepo {
    db: DatabaseConnection,
}

impl GenreRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(&self.db).await?)
    }

    pub async fn insert(&self, row: genre::ActiveModel) -> AppResult<genre::Model> {
        Ok(row.insert(&self.db).await?)
    }

    /// Returns `false` when no genre has this id.
    pub async fn update(&self, id: i32, changes: genre::ActiveModel) -> AppResult<bool> {
        if !changes.is_changed() {
            return Ok(self.get(id).await?.is_some());
        }

        let res = genre::Entity::update_many()
            .set(changes)
            .filter(genre::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Movies pointing at the genre keep their row with `genre_id` cleared.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
