use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{entities::director, error::AppResult};

#[derive(Clone)]
pub struct DirectorRepo {
    db: DatabaseConnection,
}

impl DirectorRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<director::Model>> {
        Ok(director::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?)
    }

    pub async fn insert(&self, row: director::ActiveModel) -> AppResult<director::Model> {
        Ok(row.insert(&self.db).await?)
    }

    /// Returns `false` when no director has this id.
    pub async fn update(&self, id: i32, changes: director::ActiveModel) -> AppResult<bool> {
        if !changes.is_changed() {
            return Ok(self.get(id).await?.is_some());
        }

        let res = director::Entity::update_many()
            .set(changes)
            .filter(director::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Movies pointing at the director keep their row with `director_id` cleared.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = director::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, models::NameFields};

    fn named(name: Option<&str>) -> NameFields {
        NameFields { name: Some(name.map(str::to_string)) }
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let repo = DirectorRepo::new(db::memory().await);

        for name in ["Nolan", "Mann", "Varda"] {
            repo.insert(named(Some(name)).into_new_director()).await.unwrap();
        }

        let names: Vec<_> =
            repo.list().await.unwrap().into_iter().filter_map(|d| d.name).collect();
        assert_eq!(names, ["Nolan", "Mann", "Varda"]);
    }

    #[tokio::test]
    async fn update_overwrites_and_clears_name() {
        let repo = DirectorRepo::new(db::memory().await);
        let created = repo.insert(named(Some("Nolan")).into_new_director()).await.unwrap();

        let rename = named(Some("C. Nolan")).into_director_changes();
        assert!(repo.update(created.id, rename).await.unwrap());
        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("C. Nolan"));

        assert!(repo.update(created.id, named(None).into_director_changes()).await.unwrap());
        assert_eq!(repo.get(created.id).await.unwrap().unwrap().name, None);
    }

    #[tokio::test]
    async fn empty_update_only_checks_existence() {
        let repo = DirectorRepo::new(db::memory().await);
        let created = repo.insert(named(Some("Mann")).into_new_director()).await.unwrap();

        let nothing = || NameFields::default().into_director_changes();
        assert!(repo.update(created.id, nothing()).await.unwrap());
        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Mann"));
        assert!(!repo.update(created.id + 1, nothing()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_reported_once() {
        let repo = DirectorRepo::new(db::memory().await);
        let created = repo.insert(named(Some("Mann")).into_new_director()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
    }
}
