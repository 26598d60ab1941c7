//! In-memory [`MovieStore`] with call counters and failure injection, used
//! by the engine tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{MetadataSink, MovieAssociations, MovieStore, ReferenceKind};
use crate::association::{ActorCredit, AssociationBatch, AssociationChange, AssociationTarget};
use crate::movie_filter::{matches_all, MovieAttributes, MoviePredicate};
use crate::movie_sort::MovieOrdering;
use crate::types::{Date, DbId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemMovie {
    pub id: DbId,
    pub title: String,
    pub in_theaters: bool,
    pub release_date: Date,
    pub genre_ids: Vec<DbId>,
    pub actors: Vec<ActorCredit>,
}

impl MemMovie {
    pub fn new(id: DbId, title: &str, in_theaters: bool, release_date: Date) -> Self {
        Self {
            id,
            title: title.to_string(),
            in_theaters,
            release_date,
            genre_ids: Vec::new(),
            actors: Vec::new(),
        }
    }

    pub fn with_genres(mut self, genre_ids: &[DbId]) -> Self {
        self.genre_ids = genre_ids.to_vec();
        self
    }
}

impl MovieAttributes for MemMovie {
    fn id(&self) -> DbId {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn in_theaters(&self) -> bool {
        self.in_theaters
    }
    fn release_date(&self) -> Date {
        self.release_date
    }
    fn has_genre(&self, genre_id: DbId) -> bool {
        self.genre_ids.contains(&genre_id)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("in-memory store failure: {0}")]
pub struct MemoryStoreError(pub &'static str);

#[derive(Debug, Default)]
pub struct CallCounts {
    pub count: AtomicUsize,
    pub query: AtomicUsize,
    pub reconcile: AtomicUsize,
    pub exists: AtomicUsize,
    /// Non-empty batches that reached the apply step.
    pub commit: AtomicUsize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        [
            &self.count,
            &self.query,
            &self.reconcile,
            &self.exists,
            &self.commit,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: Mutex<Vec<MemMovie>>,
    genres: HashSet<DbId>,
    actors: HashSet<DbId>,
    pub calls: CallCounts,
    fail_query: AtomicBool,
    fail_commit: AtomicBool,
}

impl InMemoryMovieStore {
    pub fn new(movies: Vec<MemMovie>, genres: &[DbId], actors: &[DbId]) -> Self {
        Self {
            movies: Mutex::new(movies),
            genres: genres.iter().copied().collect(),
            actors: actors.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn fail_queries(&self) {
        self.fail_query.store(true, Ordering::SeqCst);
    }

    pub fn fail_commits(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn movie(&self, id: DbId) -> Option<MemMovie> {
        self.movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<MemMovie> {
        self.movies.lock().unwrap().clone()
    }

    fn check_query(&self) -> Result<(), MemoryStoreError> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(MemoryStoreError("query failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    type Movie = MemMovie;
    type Error = MemoryStoreError;

    async fn count(&self, predicates: &[MoviePredicate]) -> Result<i64, Self::Error> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        self.check_query()?;
        let movies = self.movies.lock().unwrap();
        Ok(movies.iter().filter(|m| matches_all(predicates, *m)).count() as i64)
    }

    async fn query(
        &self,
        predicates: &[MoviePredicate],
        ordering: &MovieOrdering,
        skip: i64,
        take: i64,
    ) -> Result<Vec<MemMovie>, Self::Error> {
        self.calls.query.fetch_add(1, Ordering::SeqCst);
        self.check_query()?;
        let movies = self.movies.lock().unwrap();
        let mut matched: Vec<MemMovie> = movies
            .iter()
            .filter(|m| matches_all(predicates, *m))
            .cloned()
            .collect();
        matched.sort_by(|a, b| ordering.compare(a, b));
        Ok(matched
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(take.max(0) as usize)
            .collect())
    }

    async fn existing_ids(
        &self,
        kind: ReferenceKind,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, Self::Error> {
        self.calls.exists.fetch_add(1, Ordering::SeqCst);
        let known = match kind {
            ReferenceKind::Genre => &self.genres,
            ReferenceKind::Actor => &self.actors,
        };
        Ok(ids.iter().copied().filter(|id| known.contains(id)).collect())
    }

    async fn reconcile(
        &self,
        movie_id: DbId,
        target: &AssociationTarget,
    ) -> Result<Option<AssociationBatch>, Self::Error> {
        self.calls.reconcile.fetch_add(1, Ordering::SeqCst);
        // The guard is the movie lock: plan and apply see the same rows.
        let mut movies = self.movies.lock().unwrap();

        let Some(current) = movies.iter().find(|m| m.id == movie_id) else {
            return Ok(None);
        };
        let batch = target.plan(
            movie_id,
            &MovieAssociations {
                genre_ids: current.genre_ids.clone(),
                actors: current.actors.clone(),
            },
        );
        if batch.is_empty() {
            return Ok(Some(batch));
        }
        self.calls.commit.fetch_add(1, Ordering::SeqCst);

        // Work on a copy and swap it in only once every mutation succeeded.
        let mut working = movies.clone();
        let movie = working
            .iter_mut()
            .find(|m| m.id == movie_id)
            .ok_or(MemoryStoreError("movie vanished"))?;

        match &batch.change {
            AssociationChange::Genres(diff) => {
                movie.genre_ids.retain(|id| !diff.to_remove.contains(id));
                movie.genre_ids.extend(diff.to_add.iter().copied());
            }
            AssociationChange::Actors(diff) => {
                movie.actors.retain(|c| !diff.to_remove.contains(&c.actor_id));
                for update in &diff.to_update {
                    if let Some(stored) = movie
                        .actors
                        .iter_mut()
                        .find(|c| c.actor_id == update.actor_id)
                    {
                        *stored = update.clone();
                    }
                }
                movie.actors.extend(diff.to_add.iter().cloned());
                movie.actors.sort_by_key(|c| c.order);
            }
        }

        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(MemoryStoreError("commit failed"));
        }

        *movies = working;
        Ok(Some(batch))
    }
}

/// Records every header write so tests can assert write-once behaviour.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<(String, String)>,
}

impl MetadataSink for RecordingSink {
    fn set_header(&mut self, key: &str, value: String) {
        self.writes.push((key.to_string(), value));
    }
}
