use crate::{db::query::LoadQuery, traits::EntityKind};
use derive_more::{Deref, DerefMut};
use std::collections::BTreeMap;

///
/// EntityStore
///
/// Ordered in-memory collection of one entity type, keyed by primary key.
/// Key order is the tie-break order for every deterministic sort, so two
/// identical queries over an unchanged store return byte-identical results.
///

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct EntityStore<E: EntityKind>(BTreeMap<E::Key, E>);

impl<E: EntityKind> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> EntityStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert an entity under its own key, replacing any previous row.
    ///
    /// Replacement is what makes composite keys (e.g. country/year) unable to
    /// hold same-key duplicates: the last write wins deterministically.
    pub fn insert(&mut self, entity: E) -> Option<E> {
        self.0.insert(entity.key(), entity)
    }

    /// Start a fluent load query over this store.
    #[must_use]
    pub fn query(&self) -> LoadQuery<'_, E> {
        LoadQuery::new(self)
    }
}

///
/// TESTS
///
