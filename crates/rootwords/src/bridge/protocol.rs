/// Wire formats shared with the host page.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Two channels:
/// ```text
/// [Events: n × 4 floats]  kind, a, b, c  (read through a raw pointer)
/// [Snapshot: JSON]        ring, gesture, tree + layout, score
/// ```
///
/// The snapshot is the only thing the renderer needs to draw a frame.

use glam::Vec2;
use serde::Serialize;

use crate::api::types::{GameEvent, NodeId, SlotId};
use crate::core::ring::LetterSlot;
use crate::error::Result;
use crate::session::controller::SelectionController;
use crate::session::dictionary::WordValidator;
use crate::systems::layout::LayoutEntry;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: u32 = 1;

/// Floats per game event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// View events as a flat float slice for the host to copy.
pub fn pack_events(events: &[GameEvent]) -> &[f32] {
    bytemuck::cast_slice(events)
}

/// One tree node as the renderer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct NodeView<'a> {
    pub id: NodeId,
    pub word: &'a str,
    pub parent: Option<NodeId>,
    #[serde(flatten)]
    pub layout: LayoutEntry,
}

/// Everything the rendering layer draws, captured after an input batch.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub version: u32,
    pub slots: &'a [LetterSlot],
    /// Center of the commit control.
    pub commit: Vec2,
    pub selection: &'a [SlotId],
    /// Slot centers of the selection, in order, for the connecting path.
    pub path: &'a [Vec2],
    pub display_word: &'a str,
    /// Nodes in layout (pre-)order.
    pub nodes: Vec<NodeView<'a>>,
    pub rows: usize,
    pub columns: usize,
    pub current: NodeId,
    pub score: u64,
    /// Sorted for a stable display order.
    pub used_words: Vec<&'a str>,
}

impl<'a> RenderSnapshot<'a> {
    pub fn capture<V: WordValidator>(session: &'a SelectionController<V>) -> Self {
        let tree = session.tree();
        let layout = session.layout();
        let gesture = session.gesture();

        let nodes = layout
            .iter()
            .filter_map(|&(id, entry)| {
                tree.get(id).map(|node| NodeView {
                    id,
                    word: node.word.as_str(),
                    parent: node.parent(),
                    layout: entry,
                })
            })
            .collect();

        let mut used_words: Vec<&str> = session.used_words().iter().map(String::as_str).collect();
        used_words.sort_unstable();

        Self {
            version: PROTOCOL_VERSION,
            slots: session.ring().slots(),
            commit: session.ring().commit_position(),
            selection: gesture.selection(),
            path: gesture.path_points(),
            display_word: gesture.display_word(),
            nodes,
            rows: layout.rows(),
            columns: layout.columns(),
            current: session.current(),
            score: session.score(),
            used_words,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
