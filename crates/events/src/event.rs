use chrono::{DateTime, Utc};

/// A domain-agnostic change notification.
///
/// Events are facts about mutations that already happened; they are never
/// edited after publication.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.part.added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the mutation happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
