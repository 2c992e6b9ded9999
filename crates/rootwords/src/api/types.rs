use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable identity of one letter slot on the ring.
/// Never reused within a session, even after the ring is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

/// Stable identity of one node in the derivation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Monotonic id counter. Reserved blocks are always consecutive.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Reserve `count` consecutive ids and return the first one.
    pub fn reserve(&mut self, count: usize) -> u32 {
        let first = self.next;
        self.next += count as u32;
        first
    }

    /// The id the next reservation will start at.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// An event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

// Outbound event kinds (Rust → host).

/// A word was inserted. a = node id, b = new score, c = word length.
/// The score is only exact up to 2^24 as f32; read `RenderSnapshot::score` for the full value.
pub const EVENT_WORD_ACCEPTED: f32 = 1.0;
/// A commit was refused. a = one of the `REJECT_*` codes.
pub const EVENT_WORD_REJECTED: f32 = 2.0;
/// The gesture selection grew or was cleared. a = selection length.
pub const EVENT_SELECTION_CHANGED: f32 = 3.0;
/// The node new words attach under changed. a = node id.
pub const EVENT_CURRENT_NODE: f32 = 4.0;
/// The ring letters changed and the session restarted. a = slot count.
pub const EVENT_SESSION_RESET: f32 = 5.0;

pub const REJECT_INVALID_WORD: f32 = 1.0;
pub const REJECT_DUPLICATE_WORD: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.reserve(3), 1);
        assert_eq!(ids.reserve(1), 4);
        assert_eq!(ids.peek(), 5);
        assert_eq!(IdAllocator::starting_at(9).reserve(2), 9);
    }

    #[test]
    fn game_event_is_four_floats() {
        let events = [GameEvent::new(EVENT_WORD_ACCEPTED, 2.0, 10.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats.len(), GameEvent::FLOATS);
        assert_eq!(floats, &[1.0, 2.0, 10.0, 4.0]);
    }
}
