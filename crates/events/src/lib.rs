//! Change notifications: the event contract and a pub/sub bus.
//!
//! The inventory store publishes one event per successful mutation so that
//! listing views can refresh without polling.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
