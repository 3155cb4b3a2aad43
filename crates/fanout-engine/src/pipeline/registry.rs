//! Run-scoped, append-only name registries.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::invariants;

#[derive(Debug, Default)]
struct RegistryList {
    owner: String,
    names: BTreeSet<String>,
    sealed: bool,
}

/// Named lists filled by one owning pass and readable once it has finished.
///
/// Appends may come from parallel workers, so every list sits behind one
/// lock. Lists are reset at the start of each pipeline run.
#[derive(Debug, Default)]
pub struct Registries {
    lists: Mutex<IndexMap<&'static str, RegistryList>>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn reset(&self) {
        self.lists.lock().clear();
    }

    pub(super) fn declare(&self, list: &'static str, owner: &str) {
        self.lists.lock().insert(
            list,
            RegistryList {
                owner: owner.to_string(),
                ..RegistryList::default()
            },
        );
    }

    pub(super) fn seal_owned_by(&self, pass: &str) {
        for list in self.lists.lock().values_mut() {
            if list.owner == pass {
                list.sealed = true;
            }
        }
    }

    /// Record `name` in `list`. Duplicate appends are idempotent.
    pub fn append(&self, list: &str, name: &str) {
        let mut lists = self.lists.lock();
        let Some(entry) = lists.get_mut(list) else {
            invariants::undeclared_registry(list)
        };
        if entry.sealed {
            invariants::sealed_append(list, name);
        }
        entry.names.insert(name.to_string());
    }

    /// Sorted contents of a sealed list; `None` while the owning pass has
    /// not finished or when the list is unknown.
    pub fn get(&self, list: &str) -> Option<Vec<String>> {
        let lists = self.lists.lock();
        let entry = lists.get(list).filter(|l| l.sealed)?;
        Some(entry.names.iter().cloned().collect())
    }

    /// Declared list names, in pass order.
    pub fn list_names(&self) -> Vec<&'static str> {
        self.lists.lock().keys().copied().collect()
    }

    /// Every sealed list with its contents.
    pub fn snapshot(&self) -> IndexMap<String, Vec<String>> {
        self.lists
            .lock()
            .iter()
            .filter(|(_, l)| l.sealed)
            .map(|(name, l)| (name.to_string(), l.names.iter().cloned().collect()))
            .collect()
    }
}
