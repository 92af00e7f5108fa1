//! Capacity-weighted producer selection, shared by all three disciplines.

use rand::Rng;
use sim_types::Producer;

/// Pick a producer id with probability proportional to capacity. Ties
/// (identical weight draws, or a total of zero) resolve to the lowest
/// producer id (§4.2).
///
/// # Panics
/// Panics if `producers` is empty or every capacity is non-positive —
/// both are validated away before a run starts (`CapacityUnderflow`,
/// §7); by the time sampling runs this is an internal invariant.
pub fn weighted_pick<R: Rng + ?Sized>(rng: &mut R, producers: &[Producer]) -> u64 {
    assert!(!producers.is_empty(), "cannot sample from an empty producer set");
    let total: f64 = producers.iter().map(|p| p.capacity).sum();
    assert!(total > 0.0, "total producer capacity must be positive");

    let mut draw = rng.gen_range(0.0..total);
    let mut ordered: Vec<&Producer> = producers.iter().collect();
    ordered.sort_by_key(|p| p.id);
    for p in &ordered {
        if draw < p.capacity {
            return p.id;
        }
        draw -= p.capacity;
    }
    // Floating-point rounding at the tail: fall back to the lowest id.
    ordered[0].id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn equal_capacity_converges_to_uniform_share() {
        let producers: Vec<Producer> = (0..4)
            .map(|id| Producer {
                id,
                capacity: 1.0,
                is_adversary: false,
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        let n = 40_000;
        for _ in 0..n {
            let id = weighted_pick(&mut rng, &producers);
            counts[id as usize] += 1;
        }
        for c in counts {
            let share = c as f64 / n as f64;
            assert!((share - 0.25).abs() < 0.02, "share {share}");
        }
    }

    #[test]
    #[should_panic(expected = "positive")]
    fn zero_total_capacity_panics() {
        let producers = vec![Producer {
            id: 0,
            capacity: 0.0,
            is_adversary: false,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        weighted_pick(&mut rng, &producers);
    }
}
