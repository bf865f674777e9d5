pub mod rewards;

pub use rewards::{get_battle_summary, summarize, BattleSummary, RewardCalculator};
