use crate::association::{ActorCasting, AssociationTarget};
use crate::types::DbId;

use super::{CatalogError, MovieStore, ReferenceKind};

/// The subset of `ids` that exist in storage.
///
/// An empty request returns immediately without touching the store.
pub async fn existing_ids<S>(
    store: &S,
    kind: ReferenceKind,
    ids: &[DbId],
) -> Result<Vec<DbId>, S::Error>
where
    S: MovieStore + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    store.existing_ids(kind, ids).await
}

/// Replace a movie's genre set with `genre_ids`.
///
/// Ids are expected to have passed [`existing_ids`] already.
pub async fn assign_genres<S>(
    store: &S,
    movie_id: DbId,
    genre_ids: &[DbId],
) -> Result<(), CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
{
    reconcile(store, movie_id, AssociationTarget::genres(genre_ids)).await
}

/// Replace a movie's cast with `cast`, numbering positions from 1 in list
/// order.
pub async fn assign_actors<S>(
    store: &S,
    movie_id: DbId,
    cast: Vec<ActorCasting>,
) -> Result<(), CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
{
    reconcile(store, movie_id, AssociationTarget::actors(cast)).await
}

async fn reconcile<S>(
    store: &S,
    movie_id: DbId,
    target: AssociationTarget,
) -> Result<(), CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
{
    let batch = store
        .reconcile(movie_id, &target)
        .await?
        .ok_or(CatalogError::NotFound {
            entity: "Movie",
            id: movie_id,
        })?;

    if batch.is_empty() {
        tracing::debug!(movie_id, "Associations already up to date");
    } else {
        tracing::info!(movie_id, "Movie associations updated");
    }
    Ok(())
}
