use crate::api::types::NodeId;

/// Input events a session understands.
/// Pointer coordinates are in the same space as the ring geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y). Starts a new gesture.
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The commit control was activated directly (click/tap on "Enter").
    ActivateCommit,
    /// Drop the current selection without committing.
    CancelGesture,
    /// The player picked a tree node to branch new words from.
    SelectNode { node: NodeId },
}

/// A queue of input events.
/// The host writes events into the queue; the session drains them in order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 12.0, y: 22.0 });
        q.push(InputEvent::ActivateCommit);
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::ActivateCommit);
    }

    #[test]
    fn select_node_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::SelectNode { node: NodeId(7) });
        let first = q.iter().next();
        match first {
            Some(InputEvent::SelectNode { node }) => assert_eq!(*node, NodeId(7)),
            other => panic!("Expected SelectNode, got {other:?}"),
        }
    }
}
