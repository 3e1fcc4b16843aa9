//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions in recorded order, one queue per
/// `port::method` pair.
pub struct CassetteReplayer {
    pending: HashMap<(String, String), VecDeque<Interaction>>,
    served: Option<Interaction>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            pending
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { pending, served: None }
    }

    /// A replayer with no interactions; every call panics.
    #[must_use]
    pub fn empty() -> Self {
        Self { pending: HashMap::new(), served: None }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair,
    /// naming the pairs that still have interactions left.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.pending.get_mut(&key) else {
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Remaining: [{}]",
                self.remaining().join(", ")
            );
        };
        let Some(next) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: every interaction for port={port:?} method={method:?} \
                 has been consumed. Remaining: [{}]",
                self.remaining().join(", ")
            );
        };
        self.served.insert(next)
    }

    fn remaining(&self) -> Vec<String> {
        let mut pairs: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|((port, method), queue)| format!("{port}::{method} ({})", queue.len()))
            .collect();
        pairs.sort();
        pairs
    }
}
