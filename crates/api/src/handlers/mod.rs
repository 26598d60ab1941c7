pub mod actors;
pub mod comments;
pub mod genres;
pub mod movies;
