use crate::movie_filter::{MovieFilter, MoviePredicate};
use crate::movie_sort::MovieOrdering;
use crate::pagination::{Pagination, TOTAL_COUNT_HEADER};
use crate::types::Date;

use super::{CatalogError, MetadataSink, MovieStore};

/// Unfiltered listing, ordered by title.
pub async fn list_movies<S, K>(
    store: &S,
    pagination: Pagination,
    sink: &mut K,
) -> Result<Vec<S::Movie>, CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
    K: MetadataSink + ?Sized,
{
    materialize(store, &[], &MovieOrdering::default(), pagination, sink).await
}

/// Filtered, sorted and paginated listing.
///
/// An unknown sort field is logged and replaced by the default ordering;
/// it never fails the request.
pub async fn filter_movies<S, K>(
    store: &S,
    filter: &MovieFilter,
    today: Date,
    sink: &mut K,
) -> Result<Vec<S::Movie>, CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
    K: MetadataSink + ?Sized,
{
    let predicates = filter.predicates(today);

    let ordering =
        match MovieOrdering::resolve(filter.order_by_field.as_deref(), filter.order_by_ascending) {
            Ok(resolved) => resolved.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring movie sort field, using default order");
                MovieOrdering::default()
            }
        };

    materialize(store, &predicates, &ordering, filter.pagination, sink).await
}

/// Count the filtered set once, publish it, then fetch the requested page.
async fn materialize<S, K>(
    store: &S,
    predicates: &[MoviePredicate],
    ordering: &MovieOrdering,
    pagination: Pagination,
    sink: &mut K,
) -> Result<Vec<S::Movie>, CatalogError<S::Error>>
where
    S: MovieStore + ?Sized,
    K: MetadataSink + ?Sized,
{
    let total = store.count(predicates).await?;
    sink.set_header(TOTAL_COUNT_HEADER, total.to_string());

    let movies = store
        .query(predicates, ordering, pagination.skip(), pagination.take())
        .await?;
    Ok(movies)
}
