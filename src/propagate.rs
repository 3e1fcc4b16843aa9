//! Change propagation over the reference graph.
//!
//! Starting from the changed files, each hop looks up the dependents of the
//! current frontier. Unit files found along the way are collected and not
//! expanded further; every other dependent becomes part of the next frontier.
//! A visited set guards against cycles so each origin is expanded at most once.

use std::collections::HashSet;

use crate::classify::PathClassifier;
use crate::graph::ReferenceGraph;

/// Returns the unit files affected by `changed`, in discovery order.
///
/// Within one hop, unit dependents of the frontier come before frontier
/// members that are themselves unit files. Earlier hops come before later ones.
#[must_use]
pub fn propagate<S: AsRef<str>>(
    changed: &[S],
    graph: &ReferenceGraph,
    classifier: &PathClassifier,
) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut collected = OrderedPaths::default();
    let mut frontier: Vec<String> = changed.iter().map(|p| p.as_ref().to_string()).collect();
    let mut hop = 0usize;

    while !frontier.is_empty() {
        frontier.retain(|origin| visited.insert(origin.clone()));
        if frontier.is_empty() {
            break;
        }

        let mut seen = HashSet::new();
        let dependents: Vec<&String> = frontier
            .iter()
            .flat_map(|origin| graph.dependents(origin))
            .filter(|dependent| seen.insert(dependent.as_str()))
            .collect();

        let (unit_dependents, non_unit_dependents): (Vec<&String>, Vec<&String>) =
            dependents.into_iter().partition(|dependent| classifier.is_unit_file(dependent));

        tracing::trace!(
            hop,
            frontier = frontier.len(),
            units = unit_dependents.len(),
            onward = non_unit_dependents.len(),
            "expanded frontier"
        );

        collected.extend(unit_dependents.into_iter().cloned());
        collected.extend(frontier.iter().filter(|path| classifier.is_unit_file(path)).cloned());

        frontier = non_unit_dependents.into_iter().cloned().collect();
        hop += 1;
    }

    collected.into_vec()
}

/// Insertion-ordered set of paths.
#[derive(Default)]
struct OrderedPaths {
    order: Vec<String>,
    members: HashSet<String>,
}

impl OrderedPaths {
    fn extend(&mut self, paths: impl IntoIterator<Item = String>) {
        for path in paths {
            if self.members.insert(path.clone()) {
                self.order.push(path);
            }
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DEFAULT_FULL_DEPLOYMENT_PATTERN;

    fn classifier() -> PathClassifier {
        PathClassifier::new(r".*\.function\.ts$", DEFAULT_FULL_DEPLOYMENT_PATTERN, None).unwrap()
    }

    #[test]
    fn empty_change_set_affects_nothing() {
        let graph = ReferenceGraph::from_edges([("a.ts", vec!["b.function.ts"])]);
        assert!(propagate::<&str>(&[], &graph, &classifier()).is_empty());
    }

    #[test]
    fn direct_dependents_precede_second_hop() {
        let graph = ReferenceGraph::from_edges([
            ("src/shared.ts", vec!["src/functions/a.function.ts", "src/shared2.ts"]),
            ("src/shared2.ts", vec!["src/functions/b.function.ts"]),
        ]);
        let affected = propagate(&["src/shared.ts"], &graph, &classifier());
        assert_eq!(affected, ["src/functions/a.function.ts", "src/functions/b.function.ts"]);
    }

    #[test]
    fn changed_unit_without_dependents_is_included() {
        let graph = ReferenceGraph::default();
        let affected = propagate(&["src/x.function.ts"], &graph, &classifier());
        assert_eq!(affected, ["src/x.function.ts"]);
    }

    #[test]
    fn unit_dependents_precede_changed_units_within_a_hop() {
        let graph = ReferenceGraph::from_edges([("lib/a.function.ts", vec!["lib/b.function.ts"])]);
        let affected = propagate(&["lib/a.function.ts"], &graph, &classifier());
        assert_eq!(affected, ["lib/b.function.ts", "lib/a.function.ts"]);
    }

    #[test]
    fn unknown_non_unit_file_contributes_nothing() {
        let graph = ReferenceGraph::from_edges([("src/shared.ts", vec!["a.function.ts"])]);
        assert!(propagate(&["README.md"], &graph, &classifier()).is_empty());
    }

    #[test]
    fn unit_files_are_not_expanded_further() {
        let graph = ReferenceGraph::from_edges([
            ("util.ts", vec!["a.function.ts"]),
            ("a.function.ts", vec!["b.function.ts"]),
        ]);
        assert_eq!(propagate(&["util.ts"], &graph, &classifier()), ["a.function.ts"]);
    }

    #[test]
    fn cycles_terminate_without_duplicates() {
        let graph = ReferenceGraph::from_edges([
            ("a.ts", vec!["b.ts", "x.function.ts"]),
            ("b.ts", vec!["c.ts"]),
            ("c.ts", vec!["a.ts", "y.function.ts", "x.function.ts"]),
        ]);
        let affected = propagate(&["a.ts"], &graph, &classifier());
        assert_eq!(affected, ["x.function.ts", "y.function.ts"]);
    }

    #[test]
    fn self_loop_terminates() {
        let graph = ReferenceGraph::from_edges([("a.ts", vec!["a.ts"])]);
        assert!(propagate(&["a.ts"], &graph, &classifier()).is_empty());
    }

    #[test]
    fn duplicate_changed_paths_are_collapsed() {
        let graph = ReferenceGraph::from_edges([("s.ts", vec!["f.function.ts"])]);
        let affected = propagate(&["s.ts", "s.ts", "f.function.ts"], &graph, &classifier());
        assert_eq!(affected, ["f.function.ts"]);
    }

    #[test]
    fn shared_dependent_is_expanded_once() {
        let graph = ReferenceGraph::from_edges([
            ("a.ts", vec!["common.ts"]),
            ("b.ts", vec!["common.ts"]),
            ("common.ts", vec!["z.function.ts"]),
        ]);
        let affected = propagate(&["a.ts", "b.ts"], &graph, &classifier());
        assert_eq!(affected, ["z.function.ts"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph = ReferenceGraph::from_edges([
            ("s.ts", vec!["m.ts", "k.function.ts", "j.function.ts"]),
            ("m.ts", vec!["q.function.ts", "s.ts"]),
        ]);
        let first = propagate(&["s.ts"], &graph, &classifier());
        let second = propagate(&["s.ts"], &graph, &classifier());
        assert_eq!(first, second);
        assert_eq!(first, ["k.function.ts", "j.function.ts", "q.function.ts"]);
    }
}
