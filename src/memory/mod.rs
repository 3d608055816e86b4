//! Conversation history stores used by memory agents.

pub mod buffer;
pub mod turn_window;
mod types;

pub use buffer::BufferMemory;
pub use turn_window::TurnWindowMemory;
pub use types::{MemoryProvider, MemoryType};
