//! Sort-field resolution for movie listings.
//!
//! Caller-supplied field names are matched against a fixed allow-list. A
//! name outside the list yields [`UnresolvableSortField`]; the listing
//! engine logs it and falls back to [`MovieOrdering::default`] (title
//! ascending). Every ordering ends with an `id` tiebreaker so pages are
//! stable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::movie_filter::MovieAttributes;

/// Movie attributes a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    Id,
    Title,
    ReleaseDate,
    InTheaters,
}

impl MovieSortField {
    /// Canonical (wire) name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::ReleaseDate => "releaseDate",
            Self::InTheaters => "inTheaters",
        }
    }
}

impl fmt::Display for MovieSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requested sort field is not in the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot order movies by unknown field '{0}'")]
pub struct UnresolvableSortField(pub String);

impl FromStr for MovieSortField {
    type Err = UnresolvableSortField;

    /// Case-insensitive; both camelCase and snake_case spellings are accepted.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "releasedate" => Ok(Self::ReleaseDate),
            "intheaters" => Ok(Self::InTheaters),
            _ => Err(UnresolvableSortField(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A resolved, safe ordering instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieOrdering {
    pub field: MovieSortField,
    pub direction: SortDirection,
}

impl Default for MovieOrdering {
    fn default() -> Self {
        Self {
            field: MovieSortField::Title,
            direction: SortDirection::Ascending,
        }
    }
}

impl MovieOrdering {
    /// Resolve an optional caller-supplied field name.
    ///
    /// Returns `Ok(None)` when no field was requested.
    pub fn resolve(
        field: Option<&str>,
        ascending: bool,
    ) -> Result<Option<Self>, UnresolvableSortField> {
        match field.map(str::trim).filter(|f| !f.is_empty()) {
            None => Ok(None),
            Some(name) => Ok(Some(Self {
                field: name.parse()?,
                direction: SortDirection::from_ascending(ascending),
            })),
        }
    }

    /// Compare two movies under this ordering, breaking ties by ascending id.
    pub fn compare<M: MovieAttributes>(&self, a: &M, b: &M) -> Ordering {
        let primary = match self.field {
            MovieSortField::Id => a.id().cmp(&b.id()),
            MovieSortField::Title => a.title().cmp(b.title()),
            MovieSortField::ReleaseDate => a.release_date().cmp(&b.release_date()),
            MovieSortField::InTheaters => a.in_theaters().cmp(&b.in_theaters()),
        };
        self.direction
            .apply(primary)
            .then_with(|| a.id().cmp(&b.id()))
    }
}
