//! Public API surface of the runtime.

mod errors;
mod events;
mod providers;

pub use errors::{Result, RuntimeError};
pub use events::{TurnEvent, TurnObserver};
pub use providers::MoveProvider;
