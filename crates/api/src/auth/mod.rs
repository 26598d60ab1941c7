//! Authentication primitives.
//!
//! Tokens are issued by an external identity service; this crate only
//! validates them. See [`jwt`].

pub mod jwt;
