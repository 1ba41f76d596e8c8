//! Breadth-first expansion of decay chains.

use std::collections::HashSet;
use std::hash::Hash;

/// Every identifier reachable from `seed` through `direct`, in discovery order.
///
/// Each round collects the direct relations of the identifiers found in the
/// previous round; the expansion stops when a round finds nothing new. Every
/// identifier is reported once, so cycles terminate. The seed itself appears
/// only if a cycle leads back to it.
pub fn expand<K, E, F>(seed: &K, mut direct: F) -> Result<Vec<K>, E>
where
    K: Clone + Eq + Hash,
    F: FnMut(&K) -> Result<Vec<K>, E>,
{
    let mut visited = HashSet::new();
    let mut found = Vec::new();
    let mut frontier = vec![seed.clone()];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for id in &frontier {
            for related in direct(id)? {
                if visited.insert(related.clone()) {
                    found.push(related.clone());
                    next.push(related);
                }
            }
        }
        frontier = next;
    }

    Ok(found)
}
