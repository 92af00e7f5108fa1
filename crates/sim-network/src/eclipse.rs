//! Eclipse isolation helper (§4.7).
//!
//! Replaces victim nodes' adjacency with an attacker-controlled peer set
//! for propagation purposes. A victim's own `adjacency` field is left
//! untouched (so it can be restored if the eclipse window ends) but
//! every *other* node's adjacency has the victim struck out — otherwise
//! an honest neighbor would still route a BFS straight to the victim
//! regardless of what the victim's own `effective_peers()` reports, since
//! propagation only ever consults the peer list of the node it is
//! currently expanding from.

use sim_types::Node;

/// Mark `victims` as eclipsed, forcing their propagation-visible peer set
/// to `attacker_peers` (the attacker's own node ids, simulating the
/// attacker as the victims' sole relay) and severing every honest
/// neighbor's edge back to them.
pub fn apply_eclipse(nodes: &mut [Node], victims: &[u64], attacker_peers: &[u64]) {
    for &victim in victims {
        let honest_peers = nodes[victim as usize].adjacency.clone();
        for peer in honest_peers {
            nodes[peer as usize].adjacency.retain(|&p| p != victim);
        }
        let node = &mut nodes[victim as usize];
        node.eclipsed = true;
        node.forced_peers = Some(attacker_peers.to_vec());
    }
}

/// Lift the eclipse, restoring honest-graph propagation for `victims`:
/// each honest neighbor named in the victim's own (untouched) adjacency
/// gets its edge back.
pub fn lift_eclipse(nodes: &mut [Node], victims: &[u64]) {
    for &victim in victims {
        let honest_peers = nodes[victim as usize].adjacency.clone();
        for peer in honest_peers {
            if !nodes[peer as usize].adjacency.contains(&victim) {
                nodes[peer as usize].adjacency.push(victim);
            }
        }
        let node = &mut nodes[victim as usize];
        node.eclipsed = false;
        node.forced_peers = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::build_topology;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn eclipsed_node_uses_forced_peers() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut nodes = build_topology(10, 3, &mut rng);
        apply_eclipse(&mut nodes, &[2], &[99]);
        assert_eq!(nodes[2].effective_peers(), &[99]);
    }

    #[test]
    fn lifting_eclipse_restores_honest_adjacency() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut nodes = build_topology(10, 3, &mut rng);
        let honest = nodes[2].adjacency.clone();
        apply_eclipse(&mut nodes, &[2], &[99]);
        lift_eclipse(&mut nodes, &[2]);
        assert_eq!(nodes[2].effective_peers(), honest.as_slice());
    }

    #[test]
    fn honest_neighbors_lose_their_edge_to_the_victim() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut nodes = build_topology(10, 3, &mut rng);
        let honest_peers = nodes[2].adjacency.clone();
        apply_eclipse(&mut nodes, &[2], &[99]);
        for &peer in &honest_peers {
            assert!(
                !nodes[peer as usize].adjacency.contains(&2),
                "node {peer} still routes to eclipsed victim 2"
            );
        }
    }

    #[test]
    fn lifting_restores_neighbors_edges_back_to_the_victim() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut nodes = build_topology(10, 3, &mut rng);
        let honest_peers = nodes[2].adjacency.clone();
        apply_eclipse(&mut nodes, &[2], &[99]);
        lift_eclipse(&mut nodes, &[2]);
        for &peer in &honest_peers {
            assert!(nodes[peer as usize].adjacency.contains(&2));
        }
    }
}
