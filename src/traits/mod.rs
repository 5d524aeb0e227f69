//! Extension seams.
//!
//! - [`EventSink`]: push-based consumer of committed pool events, registered
//!   under a [`SubscriptionId`].

mod event_sink;

pub use event_sink::{EventSink, SubscriptionId};
