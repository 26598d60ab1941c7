//! Domain logic for the movie catalog.
//!
//! This crate performs no I/O of its own. Storage is reached through the
//! [`catalog::MovieStore`] contract and response metadata through
//! [`catalog::MetadataSink`], so the listing and association engines can be
//! exercised against any backend.

pub mod association;
pub mod catalog;
pub mod error;
pub mod movie_filter;
pub mod movie_sort;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
