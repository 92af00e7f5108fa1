//! Chain state, difficulty retargeting, reward schedule, and block
//! assembly (§3, §4.4, §4.5).

pub mod chain;
pub mod difficulty;
pub mod rewards;

pub use chain::{ChainState, EconomicsSchedule, RetargetSchedule};
pub use difficulty::retarget;
pub use rewards::reward_at_height;
