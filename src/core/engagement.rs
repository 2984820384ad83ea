//! Attacker/defender engagement matching.
//!
//! Whether a particular infantry move is legal can depend on whether the
//! moving side's infantry can still be assigned, one-to-one, to the enemy
//! infantry squares they stand adjacent to. This is a bipartite maximum
//! matching problem between attacker squares and the defender squares each
//! one threatens, solved with the standard Kuhn augmenting-path algorithm.
//!
//! The one piece of care needed is the tie-break for a move being tried
//! hypothetically: the attacker that just relocated, and the square it
//! relocated to, must not be preferred over matches that existed before the
//! move, or a move could look legal only because it stole another unit's
//! match.

use std::collections::HashMap;

/// Reorders `attackers` so that `relocated`, if present, is tried last.
fn order_attackers(attackers: &[u8], relocated: Option<u8>) -> Vec<u8> {
    match relocated {
        None => attackers.to_vec(),
        Some(r) => {
            let mut ordered: Vec<u8> = attackers.iter().copied().filter(|&a| a != r).collect();
            if attackers.contains(&r) {
                ordered.push(r);
            }
            ordered
        }
    }
}

/// Reorders one attacker's candidate defenders so that `relocated_to`, if
/// present, is tried last (lowest priority) and everything else keeps its
/// relative order at the front.
fn order_candidates(candidates: Vec<u8>, relocated_to: Option<u8>) -> Vec<u8> {
    match relocated_to {
        None => candidates,
        Some(to) => {
            let mut ordered: Vec<u8> = candidates.iter().copied().filter(|&c| c != to).collect();
            if candidates.contains(&to) {
                ordered.push(to);
            }
            ordered
        }
    }
}

fn try_kuhn(
    attacker: u8,
    adjacency: &HashMap<u8, Vec<u8>>,
    visited: &mut Vec<u8>,
    match_to: &mut HashMap<u8, u8>,
) -> bool {
    let Some(candidates) = adjacency.get(&attacker) else {
        return false;
    };
    for &defender in candidates {
        if visited.contains(&defender) {
            continue;
        }
        visited.push(defender);
        let free = match match_to.get(&defender) {
            None => true,
            Some(&occupant) => try_kuhn(occupant, adjacency, visited, match_to),
        };
        if free {
            match_to.insert(defender, attacker);
            return true;
        }
    }
    false
}

#[must_use]
/// Compute a maximum matching from attacker squares to defender squares,
/// given each attacker's list of adjacent defender candidates.
///
/// `relocated`/`relocated_to` identify a move being evaluated
/// hypothetically: `relocated` is tried last among attackers, and wherever
/// `relocated_to` appears as a candidate it is tried last for that
/// attacker. Returns a map from matched defender square to the attacker
/// matched to it.
pub fn maximize_engagement(
    attackers: &[u8],
    adjacency: impl Fn(u8) -> Vec<u8>,
    relocated: Option<u8>,
    relocated_to: Option<u8>,
) -> HashMap<u8, u8> {
    let ordered_attackers = order_attackers(attackers, relocated);
    let adjacency: HashMap<u8, Vec<u8>> = ordered_attackers
        .iter()
        .map(|&a| (a, order_candidates(adjacency(a), relocated_to)))
        .collect();

    let mut match_to: HashMap<u8, u8> = HashMap::new();
    for &attacker in &ordered_attackers {
        let mut visited = Vec::new();
        try_kuhn(attacker, &adjacency, &mut visited, &mut match_to);
    }
    match_to
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_attacker_to_a_distinct_defender() {
        // 0 -> {10}, 1 -> {10, 11}: a greedy left-to-right match would give
        // attacker 0 nothing if it went second, so the algorithm must
        // backtrack attacker 1 off defender 10 to free it for attacker 0.
        let adj = |a: u8| match a {
            0 => vec![10],
            1 => vec![10, 11],
            _ => vec![],
        };
        let matching = maximize_engagement(&[1, 0], adj, None, None);
        assert_eq!(matching.len(), 2);
        assert_eq!(matching.get(&10), Some(&0));
        assert_eq!(matching.get(&11), Some(&1));
    }

    #[test]
    fn relocated_attacker_does_not_steal_an_existing_match() {
        let adj = |a: u8| match a {
            0 => vec![10],
            5 => vec![10],
            _ => vec![],
        };
        let matching = maximize_engagement(&[0, 5], adj, Some(5), None);
        // 0 is tried first and claims the only candidate; the relocated
        // attacker 5 is left unmatched rather than displacing it.
        assert_eq!(matching.get(&10), Some(&0));
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn relocated_to_square_is_deprioritized_among_candidates() {
        let adj = |a: u8| match a {
            0 => vec![10, 20],
            _ => vec![],
        };
        let matching = maximize_engagement(&[0], adj, None, Some(10));
        assert_eq!(matching.get(&20), Some(&0));
    }
}
