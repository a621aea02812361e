pub mod shortcut_port;
pub mod tracker_port;

pub use shortcut_port::ShortcutStore;
pub use tracker_port::UnknownStructureTracker;
