//! Selfish mining (Eyal–Sirer) state machine (§4.7).
//!
//! Tracks only the lead counter δ = private_len − public_len and the
//! accepted-block tally each side accumulates as δ resolves; the actual
//! withheld blocks live wherever the coordinator assembles them. This
//! module decides *when* to release and *how many*, not what a block
//! contains.

use rand::Rng;

/// Which side found the next block, fed in by the coordinator after a
/// consensus sampling draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    Attacker,
    Honest,
}

/// What the coordinator should do in response to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfishAction {
    /// Publish this many withheld private blocks now.
    ReleasePrivateBlocks(u64),
    /// The private branch is abandoned; adopt the public tip.
    AdoptPublic,
}

/// Eyal–Sirer selfish mining strategy, parameterized by γ: the
/// attacker's share of the honest race during a δ=1 tie.
#[derive(Debug, Clone)]
pub struct SelfishMining {
    gamma: f64,
    delta: i64,
    attacker_blocks: u64,
    honest_blocks: u64,
}

impl SelfishMining {
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma: gamma.clamp(0.0, 1.0),
            delta: 0,
            attacker_blocks: 0,
            honest_blocks: 0,
        }
    }

    /// Current lead: private branch length minus public branch length.
    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn attacker_blocks(&self) -> u64 {
        self.attacker_blocks
    }

    pub fn honest_blocks(&self) -> u64 {
        self.honest_blocks
    }

    /// Fraction of blocks accepted onto the canonical chain that were
    /// produced by the attacker, over the run so far.
    pub fn attacker_share(&self) -> f64 {
        let total = self.attacker_blocks + self.honest_blocks;
        if total == 0 {
            0.0
        } else {
            self.attacker_blocks as f64 / total as f64
        }
    }

    /// Advance the state machine by one block-found event.
    pub fn step<R: Rng + ?Sized>(&mut self, finder: Finder, rng: &mut R) -> Option<SelfishAction> {
        match finder {
            Finder::Attacker => {
                self.delta += 1;
                None
            }
            Finder::Honest => Some(self.on_public_block(rng)),
        }
    }

    fn on_public_block<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SelfishAction {
        match self.delta {
            d if d <= 0 => {
                // No private lead: the attacker simply mines on the new
                // public tip.
                self.honest_blocks += 1;
                self.delta = 0;
                SelfishAction::AdoptPublic
            }
            1 => {
                // Race for the tie: release the private block now;
                // attacker wins the network race with probability γ.
                let attacker_wins = rng.gen_bool(self.gamma);
                self.delta = 0;
                if attacker_wins {
                    self.attacker_blocks += 1;
                    SelfishAction::ReleasePrivateBlocks(1)
                } else {
                    self.honest_blocks += 1;
                    SelfishAction::AdoptPublic
                }
            }
            2 => {
                // Attacker had a two-block lead: release both, the
                // longer private branch wins outright.
                self.attacker_blocks += 2;
                self.delta = 0;
                SelfishAction::ReleasePrivateBlocks(2)
            }
            _ => {
                // Lead of 3 or more: release just one block to stay
                // ahead, keep the rest withheld.
                self.attacker_blocks += 1;
                self.delta -= 1;
                SelfishAction::ReleasePrivateBlocks(1)
            }
        }
    }
}
