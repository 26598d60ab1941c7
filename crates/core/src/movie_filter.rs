//! Movie filter criteria and the predicates they expand into.
//!
//! A [`MovieFilter`] is built once per request from caller input. Each
//! criterion that is present contributes one [`MoviePredicate`]; absent
//! criteria contribute nothing. The resulting predicates combine with
//! logical AND and are rendered by the storage backend (SQL for Postgres,
//! [`MoviePredicate::matches`] for in-memory evaluation).

use crate::pagination::Pagination;
use crate::types::{Date, DbId};

/// Read access to the movie attributes predicates and orderings inspect.
pub trait MovieAttributes {
    fn id(&self) -> DbId;
    fn title(&self) -> &str;
    fn in_theaters(&self) -> bool;
    fn release_date(&self) -> Date;
    /// Whether the movie has an association with the given genre.
    fn has_genre(&self, genre_id: DbId) -> bool;
}

/// Criteria for the movie filter listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFilter {
    pub pagination: Pagination,
    /// Substring the title must contain. Empty means no title filter.
    pub title: Option<String>,
    /// Genre the movie must be associated with. `None` or `Some(0)` means
    /// no genre filter.
    pub genre_id: Option<DbId>,
    /// `None` disables the filter; `Some(flag)` keeps movies whose
    /// in-theaters flag equals `flag`.
    pub in_theaters: Option<bool>,
    /// Keep only movies released strictly after the evaluation date.
    pub future_releases: bool,
    /// Sort field name as supplied by the caller.
    pub order_by_field: Option<String>,
    pub order_by_ascending: bool,
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            title: None,
            genre_id: None,
            in_theaters: None,
            future_releases: false,
            order_by_field: None,
            order_by_ascending: true,
        }
    }
}

/// One independent condition over the movie collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoviePredicate {
    /// Title contains the text, case-insensitively.
    TitleContains(String),
    InTheaters(bool),
    /// Release date is strictly after the given date.
    ReleasedAfter(Date),
    /// At least one genre association with this id exists.
    HasGenre(DbId),
}

impl MoviePredicate {
    pub fn matches<M: MovieAttributes>(&self, movie: &M) -> bool {
        match self {
            Self::TitleContains(text) => movie
                .title()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            Self::InTheaters(flag) => movie.in_theaters() == *flag,
            Self::ReleasedAfter(date) => movie.release_date() > *date,
            Self::HasGenre(genre_id) => movie.has_genre(*genre_id),
        }
    }
}

/// Evaluate a conjunction of predicates. An empty slice matches everything.
pub fn matches_all<M: MovieAttributes>(predicates: &[MoviePredicate], movie: &M) -> bool {
    predicates.iter().all(|p| p.matches(movie))
}

impl MovieFilter {
    /// Expand the criteria into predicates. `today` anchors the
    /// future-releases criterion.
    pub fn predicates(&self, today: Date) -> Vec<MoviePredicate> {
        let mut predicates = Vec::new();

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            predicates.push(MoviePredicate::TitleContains(title.to_string()));
        }

        if let Some(flag) = self.in_theaters {
            predicates.push(MoviePredicate::InTheaters(flag));
        }

        if self.future_releases {
            predicates.push(MoviePredicate::ReleasedAfter(today));
        }

        if let Some(genre_id) = self.genre_id.filter(|&id| id != 0) {
            predicates.push(MoviePredicate::HasGenre(genre_id));
        }

        predicates
    }
}
