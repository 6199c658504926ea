//! Interactive surface: roster view, event rendering, and the prompt loop.

pub mod render;
pub mod repl;
pub mod roster;

pub use repl::run_client;
pub use roster::RoomRoster;
