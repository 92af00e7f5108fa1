//! Peer topology construction (§4.3).
//!
//! For each node, pick `neighbors` distinct other nodes uniformly without
//! replacement, then symmetrize the resulting directed picks into an
//! undirected adjacency. Any node left isolated afterwards is connected
//! to its nearest-by-id neighbors until its degree is at least 1.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use sim_types::Node;

/// Build an undirected peer graph of `node_count` nodes, each with
/// approximately `neighbors` edges.
pub fn build_topology<R: Rng + ?Sized>(node_count: u64, neighbors: u64, rng: &mut R) -> Vec<Node> {
    assert!(node_count > 0, "topology requires at least one node");
    let mut adjacency: Vec<BTreeSet<u64>> = vec![BTreeSet::new(); node_count as usize];

    for id in 0..node_count {
        let mut candidates: Vec<u64> = (0..node_count).filter(|&other| other != id).collect();
        candidates.shuffle(rng);
        let pick = neighbors.min(candidates.len() as u64) as usize;
        for &peer in &candidates[..pick] {
            adjacency[id as usize].insert(peer);
            adjacency[peer as usize].insert(id);
        }
    }

    // Rescue isolated nodes by wiring them to their nearest-by-id peers.
    for id in 0..node_count {
        if adjacency[id as usize].is_empty() {
            let mut offset = 1u64;
            while adjacency[id as usize].is_empty() && offset < node_count {
                for candidate in [id.wrapping_sub(offset), id + offset] {
                    if candidate < node_count && candidate != id {
                        adjacency[id as usize].insert(candidate);
                        adjacency[candidate as usize].insert(id);
                        break;
                    }
                }
                offset += 1;
            }
        }
    }

    adjacency
        .into_iter()
        .enumerate()
        .map(|(id, peers)| Node {
            id: id as u64,
            adjacency: peers.into_iter().collect(),
            last_known_height: -1,
            eclipsed: false,
            forced_peers: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_node_has_at_least_one_peer() {
        let mut rng = StdRng::seed_from_u64(3);
        let nodes = build_topology(50, 3, &mut rng);
        for node in &nodes {
            assert!(!node.adjacency.is_empty(), "node {} is isolated", node.id);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(11);
        let nodes = build_topology(30, 4, &mut rng);
        for node in &nodes {
            for &peer in &node.adjacency {
                assert!(
                    nodes[peer as usize].adjacency.contains(&node.id),
                    "edge {}-{} is not symmetric",
                    node.id,
                    peer
                );
            }
        }
    }

    #[test]
    fn no_self_loops() {
        let mut rng = StdRng::seed_from_u64(5);
        let nodes = build_topology(20, 5, &mut rng);
        for node in &nodes {
            assert!(!node.adjacency.contains(&node.id));
        }
    }
}
