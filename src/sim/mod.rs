//! Lane-dodge simulation
//!
//! Everything that decides what happens in a frame lives here:
//! - No terminal or rendering dependencies
//! - Caller supplies the timestamp and the RNG
//! - Session state is owned by the caller and passed in explicitly

pub mod rules;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rules::Rules;
pub use state::{Action, Phase, Session};
pub use tick::{apply_action, update, Frame};
