use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use museum_core::{Entity, SequenceCounter};

/// Keyed entity store with repository-assigned ids.
///
/// Reads hand out clones; callers never hold references into storage.
pub trait Repository<T: Entity>: Send + Sync {
    /// Inserts `entity`, assigning the next id if it has none, or overwrites
    /// the record at its existing id. Returns the stored entity.
    fn save(&self, entity: T) -> T;

    fn find_by_id(&self, id: T::Id) -> Option<T>;

    /// Snapshot of all records in ascending id order.
    fn find_all(&self) -> Vec<T>;

    /// Returns whether a record existed and was removed.
    fn delete_by_id(&self, id: T::Id) -> bool;

    fn count(&self) -> usize;

    fn delete_all(&self);

    /// First record (in id order) matching `predicate`.
    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.find_all().into_iter().find(|e| predicate(e))
    }

    /// All records (in id order) matching `predicate`.
    fn find_matching(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.find_all().into_iter().filter(|e| predicate(e)).collect()
    }

    fn exists(&self, id: T::Id) -> bool {
        self.find_by_id(id).is_some()
    }
}

impl<T, S> Repository<T> for Arc<S>
where
    T: Entity,
    S: Repository<T> + ?Sized,
{
    fn save(&self, entity: T) -> T {
        (**self).save(entity)
    }

    fn find_by_id(&self, id: T::Id) -> Option<T> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Vec<T> {
        (**self).find_all()
    }

    fn delete_by_id(&self, id: T::Id) -> bool {
        (**self).delete_by_id(id)
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn delete_all(&self) {
        (**self).delete_all()
    }

    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        (**self).find_first(predicate)
    }

    fn find_matching(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        (**self).find_matching(predicate)
    }

    fn exists(&self, id: T::Id) -> bool {
        (**self).exists(id)
    }
}

/// In-memory repository.
///
/// The id counter is atomic, so concurrent saves never share an id. Batches
/// of structural changes from several threads must still be serialized by
/// the caller.
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    inner: RwLock<BTreeMap<T::Id, T>>,
    ids: SequenceCounter,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_counter(SequenceCounter::new())
    }

    /// Uses `ids` for id assignment (tests, restored state).
    pub fn with_counter(ids: SequenceCounter) -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            ids,
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Id the next inserted entity without an id will receive.
    pub fn next_id(&self) -> u64 {
        self.ids.current()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<T::Id, T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<T::Id, T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
    T::Id: Send + Sync,
{
    fn save(&self, mut entity: T) -> T {
        let id = match entity.id() {
            Some(id) => {
                // Ids restored from a load must never be handed out again.
                self.ids.advance_past(id.into());
                tracing::debug!(id = ?id, "overwriting record");
                id
            }
            None => {
                let id = <T::Id as From<u64>>::from(self.ids.next());
                entity.assign_id(id);
                tracing::debug!(id = ?id, "inserted new record");
                id
            }
        };

        self.write().insert(id, entity.clone());
        entity
    }

    fn find_by_id(&self, id: T::Id) -> Option<T> {
        self.read().get(&id).cloned()
    }

    fn find_all(&self) -> Vec<T> {
        self.read().values().cloned().collect()
    }

    fn delete_by_id(&self, id: T::Id) -> bool {
        let removed = self.write().remove(&id).is_some();
        if !removed {
            tracing::warn!(id = ?id, "attempted to delete a missing record");
        }
        removed
    }

    fn count(&self) -> usize {
        self.read().len()
    }

    fn delete_all(&self) {
        let mut map = self.write();
        tracing::info!(count = map.len(), "deleting all records");
        map.clear();
    }

    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.read().values().find(|e| predicate(e)).cloned()
    }

    fn find_matching(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.read()
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    fn exists(&self, id: T::Id) -> bool {
        self.read().contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_catalog::Artist;
    use museum_core::ArtistId;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn artist(name: &str) -> Artist {
        Artist::new(name, 1900, "France")
    }

    #[test]
    fn save_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.save(artist("A"));
        let b = repo.save(artist("B"));
        assert_eq!(a.id(), Some(ArtistId::new(1)));
        assert_eq!(b.id(), Some(ArtistId::new(2)));
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn save_with_id_overwrites() {
        let repo = InMemoryRepository::new();
        let mut stored = repo.save(artist("A"));
        stored.country = "Spain".to_string();
        repo.save(stored.clone());

        assert_eq!(repo.count(), 1);
        let found = repo.find_by_id(ArtistId::new(1)).unwrap();
        assert_eq!(found.country, "Spain");
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let a = repo.save(artist("A"));
        assert!(repo.delete_by_id(a.id().unwrap()));
        let b = repo.save(artist("B"));
        assert_eq!(b.id(), Some(ArtistId::new(2)));
    }

    #[test]
    fn restored_ids_advance_the_counter() {
        let repo = InMemoryRepository::new();
        let mut loaded = artist("Loaded");
        loaded.assign_id(ArtistId::new(40));
        repo.save(loaded);

        let fresh = repo.save(artist("Fresh"));
        assert_eq!(fresh.id(), Some(ArtistId::new(41)));
        assert_eq!(repo.next_id(), 42);
    }

    #[test]
    fn delete_missing_returns_false() {
        let repo: InMemoryRepository<Artist> = InMemoryRepository::new();
        assert!(!repo.delete_by_id(ArtistId::new(9)));
    }

    #[test]
    fn find_all_is_a_detached_snapshot() {
        let repo = InMemoryRepository::new();
        repo.save(artist("A"));
        let mut snapshot = repo.find_all();
        snapshot[0].full_name = "Changed".to_string();
        snapshot.clear();

        assert_eq!(repo.count(), 1);
        assert_eq!(repo.find_by_id(ArtistId::new(1)).unwrap().full_name, "A");
    }

    #[test]
    fn delete_all_keeps_counter() {
        let repo = InMemoryRepository::new();
        repo.save(artist("A"));
        repo.save(artist("B"));
        repo.delete_all();
        assert_eq!(repo.count(), 0);
        assert_eq!(repo.save(artist("C")).id(), Some(ArtistId::new(3)));
    }

    #[test]
    fn predicate_queries_scan_in_id_order() {
        let repo = InMemoryRepository::new();
        repo.save(artist("Monet"));
        repo.save(artist("Manet"));
        repo.save(artist("Degas"));

        let first = repo.find_first(&|a: &Artist| a.full_name.starts_with('M')).unwrap();
        assert_eq!(first.full_name, "Monet");
        assert_eq!(repo.find_matching(&|a: &Artist| a.full_name.starts_with('M')).len(), 2);
    }

    #[test]
    fn concurrent_saves_get_unique_ids() {
        let repo = Arc::new(InMemoryRepository::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| repo.save(artist(&format!("{t}-{i}"))).id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id));
            }
        }
        assert_eq!(repo.count(), 400);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: ids stay unique across any interleaving of saves and deletes.
        #[test]
        fn ids_are_never_reused(ops in prop::collection::vec(any::<bool>(), 1..60)) {
            let repo = InMemoryRepository::new();
            let mut issued = HashSet::new();
            let mut live: Vec<ArtistId> = Vec::new();

            for save in ops {
                if save || live.is_empty() {
                    let id = repo.save(artist("x")).id().unwrap();
                    prop_assert!(issued.insert(id));
                    live.push(id);
                } else {
                    let id = live.remove(0);
                    prop_assert!(repo.delete_by_id(id));
                }
            }
            prop_assert_eq!(repo.count(), live.len());
        }
    }
}
