use std::{collections::HashSet, fmt, hash::Hash};

/// Returned when inserting under a key that is already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey<Id>(pub Id);

impl<Id: fmt::Display> fmt::Display for DuplicateKey<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate key: {}", self.0)
    }
}

impl<Id: fmt::Debug + fmt::Display> std::error::Error for DuplicateKey<Id> {}

/// Insertion-ordered in-memory storage with unique keys.
#[derive(Debug, Clone)]
pub struct InMemoryRepo<T, Id> {
    storage: Vec<T>,
    keys: HashSet<Id>,
}

impl<T, Id> InMemoryRepo<T, Id>
where
    Id: Clone + Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Appends `item` under `id`.
    /// # Errors
    /// Returns `DuplicateKey` if `id` is already stored; the repo is left untouched.
    pub fn insert(&mut self, id: Id, item: T) -> Result<(), DuplicateKey<Id>> {
        if self.keys.contains(&id) {
            return Err(DuplicateKey(id));
        }
        self.keys.insert(id);
        self.storage.push(item);
        Ok(())
    }

    /// All items, in the order they were inserted.
    pub fn values(&self) -> &[T] {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl<T, Id> Default for InMemoryRepo<T, Id>
where
    Id: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
