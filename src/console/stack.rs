//! A key/value map whose changes are applied in layers. Every push records
//! what it is about to overwrite so the matching pop can put it back.
use std::collections::BTreeMap;

use tracing::{event, Level};

/// What a single push overwrote: the prior value of each key it touched,
/// or `None` when the key had no binding.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Frame<K, V> {
    saved: Vec<(K, Option<V>)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayeredMap<K: Ord + Clone, V: Clone> {
    name: &'static str,
    active: BTreeMap<K, V>,
    frames: Vec<Frame<K, V>>,
}

impl<K: Ord + Clone, V: Clone> LayeredMap<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self { name, active: BTreeMap::new(), frames: Vec::new() }
    }

    /// Records the current bindings of every key in `entries`, then binds
    /// them. An empty push still adds a frame.
    pub fn push(&mut self, entries: BTreeMap<K, V>) {
        let saved = entries
            .keys()
            .map(|key| (key.clone(), self.active.get(key).cloned()))
            .collect();
        self.frames.push(Frame { saved });

        self.active.extend(entries);
        event!(Level::TRACE, "Pushed {} layer, depth {}", self.name, self.frames.len());
    }

    /// Restores the bindings recorded by the last push. Returns false, and
    /// does nothing, when there is nothing left to pop.
    pub fn pop(&mut self) -> bool {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return false,
        };

        for (key, prior) in frame.saved {
            match prior {
                Some(value) => {
                    self.active.insert(key, value);
                },
                None => {
                    self.active.remove(&key);
                }
            }
        }

        event!(Level::TRACE, "Popped {} layer, depth {}", self.name, self.frames.len());
        true
    }

    /// Pops until no frames are left
    pub fn unwind(&mut self) {
        while self.pop() {}
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.active.get(key)
    }

    pub fn active(&self) -> &BTreeMap<K, V> {
        &self.active
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
