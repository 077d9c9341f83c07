//! # Realtime channel stub
//!
//! Subscription API kept for shape compatibility with a networked backend.
//! Delivery is disabled in the embedded store: listeners are registered
//! and never invoked.

pub mod channel;
pub mod event;

pub use channel::{Channel, ChannelState, Listener};
pub use event::{ChangeKind, ChangePayload};
