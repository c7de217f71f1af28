//! One repository per table. Each wraps a clone of the connection pool and
//! speaks in sea-orm models; handlers never build queries themselves.

mod directors;
mod genres;
mod movies;

pub use directors::DirectorRepo;
pub use genres::GenreRepo;
pub use movies::{MovieFilter, MovieRepo};
