//! Movie association reconciliation.
//!
//! Genre associations have set semantics; actor associations are an ordered
//! list carrying a character name and a 1-based position. Both are
//! reconciled by diffing the stored rows against the desired state and
//! producing an explicit add/remove/update batch that the store applies in
//! one transaction.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// A requested actor credit before positions are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorCasting {
    pub actor_id: DbId,
    pub character: String,
}

/// A stored (or to-be-stored) actor association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorCredit {
    pub actor_id: DbId,
    pub character: String,
    /// 1-based position within the movie's cast.
    pub order: i32,
}

/// Remove duplicate ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Ids in `requested` that are absent from `existing`, in request order and
/// without duplicates.
pub fn missing_ids(requested: &[DbId], existing: &[DbId]) -> Vec<DbId> {
    let existing: HashSet<DbId> = existing.iter().copied().collect();
    dedup_ids(requested)
        .into_iter()
        .filter(|id| !existing.contains(id))
        .collect()
}

/// Assign positions `1..=n` to a cast list, dropping repeated actors.
///
/// Any position the caller had in mind is ignored; list order is the order.
pub fn number_cast(castings: Vec<ActorCasting>) -> Vec<ActorCredit> {
    let mut seen = HashSet::with_capacity(castings.len());
    castings
        .into_iter()
        .filter(|c| seen.insert(c.actor_id))
        .zip(1..)
        .map(|(c, order)| ActorCredit {
            actor_id: c.actor_id,
            character: c.character,
            order,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreDiff {
    pub to_add: Vec<DbId>,
    pub to_remove: Vec<DbId>,
}

impl GenreDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff stored genre ids against the desired set.
pub fn diff_genres(current: &[DbId], desired: &[DbId]) -> GenreDiff {
    let current_set: HashSet<DbId> = current.iter().copied().collect();
    let desired = dedup_ids(desired);
    let desired_set: HashSet<DbId> = desired.iter().copied().collect();

    GenreDiff {
        to_add: desired
            .into_iter()
            .filter(|id| !current_set.contains(id))
            .collect(),
        to_remove: dedup_ids(current)
            .into_iter()
            .filter(|id| !desired_set.contains(id))
            .collect(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorDiff {
    pub to_add: Vec<ActorCredit>,
    /// Actor ids whose association must be deleted.
    pub to_remove: Vec<DbId>,
    /// Existing associations whose character or position changed.
    pub to_update: Vec<ActorCredit>,
}

impl ActorDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty() && self.to_update.is_empty()
    }
}

/// Diff stored actor credits against the desired, already-numbered cast.
pub fn diff_actors(current: &[ActorCredit], desired: &[ActorCredit]) -> ActorDiff {
    let current_by_actor: HashMap<DbId, &ActorCredit> =
        current.iter().map(|c| (c.actor_id, c)).collect();
    let desired_actors: HashSet<DbId> = desired.iter().map(|c| c.actor_id).collect();

    let mut diff = ActorDiff::default();

    for credit in desired {
        match current_by_actor.get(&credit.actor_id) {
            None => diff.to_add.push(credit.clone()),
            Some(stored) if *stored != credit => diff.to_update.push(credit.clone()),
            Some(_) => {}
        }
    }

    diff.to_remove = dedup_ids(
        &current
            .iter()
            .map(|c| c.actor_id)
            .filter(|id| !desired_actors.contains(id))
            .collect::<Vec<_>>(),
    );

    diff
}

/// A movie's current association rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieAssociations {
    pub genre_ids: Vec<DbId>,
    /// Sorted by `order`.
    pub actors: Vec<ActorCredit>,
}

/// Desired end state for one kind of association, already normalised:
/// genre ids deduplicated, cast numbered `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationTarget {
    Genres(Vec<DbId>),
    Actors(Vec<ActorCredit>),
}

impl AssociationTarget {
    pub fn genres(genre_ids: &[DbId]) -> Self {
        Self::Genres(dedup_ids(genre_ids))
    }

    pub fn actors(cast: Vec<ActorCasting>) -> Self {
        Self::Actors(number_cast(cast))
    }

    /// The batch that turns `current` into this target.
    ///
    /// Stores call this while holding the movie's row lock so the diff is
    /// computed from the rows the batch will be applied to.
    pub fn plan(&self, movie_id: DbId, current: &MovieAssociations) -> AssociationBatch {
        let change = match self {
            Self::Genres(desired) => {
                AssociationChange::Genres(diff_genres(&current.genre_ids, desired))
            }
            Self::Actors(desired) => {
                AssociationChange::Actors(diff_actors(&current.actors, desired))
            }
        };
        AssociationBatch { movie_id, change }
    }
}

/// The change set for one kind of association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationChange {
    Genres(GenreDiff),
    Actors(ActorDiff),
}

/// All association mutations for a single movie, applied atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationBatch {
    pub movie_id: DbId,
    pub change: AssociationChange,
}

impl AssociationBatch {
    pub fn is_empty(&self) -> bool {
        match &self.change {
            AssociationChange::Genres(diff) => diff.is_empty(),
            AssociationChange::Actors(diff) => diff.is_empty(),
        }
    }
}
