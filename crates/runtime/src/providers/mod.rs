//! Move provider implementations for different participant behaviors.

mod ai;
mod scripted;

pub use ai::AiMoveProvider;
pub use scripted::ScriptedMoveProvider;
