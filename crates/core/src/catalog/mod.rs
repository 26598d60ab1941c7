//! Catalog engine: the movie listing pipeline and the association
//! synchronizer, written against the [`MovieStore`] storage contract.
//!
//! The engine holds no state between calls. Every storage round-trip is an
//! `.await` on the store; the only per-request side channel is the
//! [`MetadataSink`] the listing writes its total count into.

mod listing;
#[cfg(test)]
mod memory;
mod sync;

pub use listing::{filter_movies, list_movies};
pub use sync::{assign_actors, assign_genres, existing_ids};

pub use crate::association::MovieAssociations;

use async_trait::async_trait;

use crate::association::{AssociationBatch, AssociationTarget};
use crate::movie_filter::MoviePredicate;
use crate::movie_sort::MovieOrdering;
use crate::types::DbId;

/// Entity kinds a movie can reference through an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Genre,
    Actor,
}

impl ReferenceKind {
    pub fn entity(self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Actor => "Actor",
        }
    }
}

/// Storage contract the catalog engine runs against.
///
/// Implementations decide how predicates and orderings are evaluated (SQL,
/// in-memory iteration), but must honour their semantics exactly.
#[async_trait]
pub trait MovieStore: Send + Sync {
    type Movie: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of movies matching every predicate.
    async fn count(&self, predicates: &[MoviePredicate]) -> Result<i64, Self::Error>;

    /// One page of matching movies in the given order.
    async fn query(
        &self,
        predicates: &[MoviePredicate],
        ordering: &MovieOrdering,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Self::Movie>, Self::Error>;

    /// The subset of `ids` that exist for the given kind.
    async fn existing_ids(&self, kind: ReferenceKind, ids: &[DbId])
        -> Result<Vec<DbId>, Self::Error>;

    /// Bring one kind of association for a movie to `target` in a single
    /// unit of work.
    ///
    /// The movie is locked for the duration, its current rows are read
    /// under that lock and diffed with [`AssociationTarget::plan`], and the
    /// resulting batch is applied before the lock is released. Concurrent
    /// calls for the same movie therefore serialise: the last to acquire
    /// the lock wins outright. Returns the applied batch (possibly empty),
    /// or `None` if the movie does not exist.
    async fn reconcile(
        &self,
        movie_id: DbId,
        target: &AssociationTarget,
    ) -> Result<Option<AssociationBatch>, Self::Error>;
}

/// Out-of-band response metadata, written at most once per key per request.
pub trait MetadataSink {
    fn set_header(&mut self, key: &str, value: String);
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError<E: std::error::Error + 'static> {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Storage(#[from] E),
}
