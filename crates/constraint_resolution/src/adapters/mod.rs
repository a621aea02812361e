pub mod jsonl_tracker;
pub mod shortcuts;
pub mod tracker;

pub use jsonl_tracker::JsonlTracker;
pub use shortcuts::{LearnedCompositions, NoShortcut};
pub use tracker::{LogTracker, MemoryTracker};
