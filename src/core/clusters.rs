//! Flood-fill over a mask of squares.
//!
//! Two distinct flood fills are needed. [`find_clusters`] partitions a
//! single mask into ordinary connected components — used once an
//! attacker/defender adjacency mask is already known and just needs
//! splitting into independent groups. [`find_adjacency_clusters`] instead
//! discovers those groups from scratch over two separate masks (attacker
//! squares and defender squares), expanding one side's frontier and then
//! the other's in alternation, since an attacker's neighbors of interest
//! are defenders and vice versa.

use super::bitboard::Mask;

#[must_use]
/// Split `mask` into its connected components under `adjacent`-adjacency,
/// regardless of which side occupies which square.
pub fn find_clusters(mask: Mask, adjacent: impl Fn(super::square::Square) -> Mask) -> Vec<Mask> {
    let mut remaining = mask;
    let mut clusters = Vec::new();
    while let Some(seed) = remaining.lsb() {
        let mut cluster = Mask::EMPTY;
        let mut frontier = Mask::from_square(seed);
        while !frontier.is_empty() {
            cluster |= frontier;
            remaining &= !frontier;
            let mut next = Mask::EMPTY;
            for sq in frontier.iter() {
                next |= adjacent(sq) & mask & !cluster;
            }
            frontier = next;
        }
        clusters.push(cluster);
    }
    clusters
}

#[must_use]
/// Find the connected components of the bipartite adjacency graph between
/// `attackers` and `defenders` under `adjacent`-adjacency, by expanding the
/// attacker frontier into defenders, then that defender frontier back into
/// attackers, layer by layer, until the frontier goes dry.
///
/// Returns one `(attacker_subset, defender_subset)` pair per component.
/// Attacker squares with no adjacent defender still form their own
/// singleton component with an empty defender subset.
pub fn find_adjacency_clusters(
    attackers: Mask,
    defenders: Mask,
    adjacent: impl Fn(super::square::Square) -> Mask,
) -> Vec<(Mask, Mask)> {
    let mut remaining_attackers = attackers;
    let mut clusters = Vec::new();
    while let Some(seed) = remaining_attackers.lsb() {
        let mut cluster_attackers = Mask::from_square(seed);
        let mut cluster_defenders = Mask::EMPTY;
        let mut frontier = Mask::from_square(seed);
        let mut frontier_is_attacker = true;
        loop {
            let pool = if frontier_is_attacker { defenders } else { attackers };
            let already = if frontier_is_attacker {
                cluster_defenders
            } else {
                cluster_attackers
            };
            let mut next = Mask::EMPTY;
            for sq in frontier.iter() {
                next |= adjacent(sq) & pool;
            }
            next &= !already;
            if next.is_empty() {
                break;
            }
            if frontier_is_attacker {
                cluster_defenders |= next;
            } else {
                cluster_attackers |= next;
            }
            frontier = next;
            frontier_is_attacker = !frontier_is_attacker;
        }
        remaining_attackers &= !cluster_attackers;
        clusters.push((cluster_attackers, cluster_defenders));
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::square::Square;
    use super::super::tables::TABLES;

    fn sq(rank: usize, file: usize) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn find_clusters_splits_disconnected_groups() {
        let mask = Mask::from_square(sq(0, 0))
            | Mask::from_square(sq(0, 1))
            | Mask::from_square(sq(7, 7));
        let clusters = find_clusters(mask, |s| TABLES.adjacent(s));
        assert_eq!(clusters.len(), 2);
        let sizes: Vec<u32> = clusters.iter().map(|c| c.len()).collect();
        assert!(sizes.contains(&2));
        assert!(sizes.contains(&1));
    }

    #[test]
    fn bipartite_cluster_alternates_sides() {
        // attacker (0,0) - defender (0,1) - attacker (0,2): one component.
        let attackers = Mask::from_square(sq(0, 0)) | Mask::from_square(sq(0, 2));
        let defenders = Mask::from_square(sq(0, 1));
        let clusters = find_adjacency_clusters(attackers, defenders, |s| TABLES.adjacent(s));
        assert_eq!(clusters.len(), 1);
        let (a, d) = clusters[0];
        assert_eq!(a, attackers);
        assert_eq!(d, defenders);
    }

    #[test]
    fn isolated_attacker_forms_singleton_component() {
        let attackers = Mask::from_square(sq(4, 4));
        let defenders = Mask::EMPTY;
        let clusters = find_adjacency_clusters(attackers, defenders, |s| TABLES.adjacent(s));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].0, attackers);
        assert!(clusters[0].1.is_empty());
    }
}
