//! Loop and pen state
//!
//! The orchestration loop is an explicit two-state machine. Pen state is
//! the only other durable state besides the pen position.

pub mod events;
pub mod machine;
pub mod pen;

pub use events::Event;
pub use machine::{LoopState, StopReason};
pub use pen::PenState;
