use sea_orm::ActiveValue::{self, NotSet, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{director, genre, movie};

/// Keeps an explicit `null` (`Some(None)`) apart from a missing key (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present<V: Into<sea_orm::Value>>(field: Option<V>) -> ActiveValue<V> {
    field.map_or(NotSet, Set)
}

/// Request body for `POST /movies/` and `PUT /movies/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovieFields {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub director_id: Option<Option<i32>>,
}

impl MovieFields {
    /// Row for an insert: every column is written, missing fields as NULL.
    pub fn into_new(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: NotSet,
            title: Set(self.title.flatten()),
            description: Set(self.description.flatten()),
            trailer: Set(self.trailer.flatten()),
            year: Set(self.year.flatten()),
            rating: Set(self.rating.flatten()),
            genre_id: Set(self.genre_id.flatten()),
            director_id: Set(self.director_id.flatten()),
        }
    }

    /// Changes for an update: only the fields present in the payload.
    pub fn into_changes(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: NotSet,
            title: present(self.title),
            description: present(self.description),
            trailer: present(self.trailer),
            year: present(self.year),
            rating: present(self.rating),
            genre_id: present(self.genre_id),
            director_id: present(self.director_id),
        }
    }
}

/// Request body shared by directors and genres.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameFields {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
}

impl NameFields {
    pub fn into_new_director(self) -> director::ActiveModel {
        director::ActiveModel { id: NotSet, name: Set(self.name.flatten()) }
    }

    pub fn into_director_changes(self) -> director::ActiveModel {
        director::ActiveModel { id: NotSet, name: present(self.name) }
    }

    pub fn into_new_genre(self) -> genre::ActiveModel {
        genre::ActiveModel { id: NotSet, name: Set(self.name.flatten()) }
    }

    pub fn into_genre_changes(self) -> genre::ActiveModel {
        genre::ActiveModel { id: NotSet, name: present(self.name) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Director {
    pub id: i32,
    pub name: Option<String>,
}

impl From<director::Model> for Director {
    fn from(m: director::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: i32,
    pub name: Option<String>,
}

impl From<genre::Model> for Genre {
    fn from(m: genre::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}
