//! Player lookup by printed name.

use std::collections::HashMap;

use shared_types::{PlayerId, RosterEntry};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip diacritics, collapse whitespace.
///
/// Names are decomposed (NFKD) first; anything left without an ASCII form
/// is dropped.
pub fn fold_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| c.is_ascii() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Folded full name to player id, built from a season roster file.
///
/// Names shared by two different players resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    ids: HashMap<String, Option<PlayerId>>,
}

impl NameIndex {
    pub fn from_roster(entries: &[RosterEntry]) -> Self {
        let mut ids: HashMap<String, Option<PlayerId>> = HashMap::new();
        for entry in entries {
            let key = fold_name(&entry.name);
            match ids.get(&key) {
                Some(Some(existing)) if *existing != entry.player_id => {
                    debug!(name = %entry.name, "Ambiguous roster name");
                    ids.insert(key, None);
                }
                Some(_) => {}
                None => {
                    ids.insert(key, Some(entry.player_id));
                }
            }
        }
        Self { ids }
    }

    pub fn lookup(&self, name: &str) -> Option<PlayerId> {
        self.ids.get(&fold_name(name)).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
