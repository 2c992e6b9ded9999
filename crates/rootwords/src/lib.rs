pub mod api;
pub mod bridge;
pub mod core;
pub mod error;
pub mod input;
pub mod session;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{AttachPolicy, AvailabilityPolicy, SessionConfig};
pub use api::types::{GameEvent, IdAllocator, NodeId, SlotId};
pub use api::types::{
    EVENT_CURRENT_NODE, EVENT_SELECTION_CHANGED, EVENT_SESSION_RESET, EVENT_WORD_ACCEPTED,
    EVENT_WORD_REJECTED, REJECT_DUPLICATE_WORD, REJECT_INVALID_WORD,
};
pub use bridge::protocol::{pack_events, NodeView, RenderSnapshot, EVENT_FLOATS, PROTOCOL_VERSION};
pub use crate::core::ring::{parse_letters, Hit, LetterRing, LetterSlot, SlotState};
pub use crate::core::tree::{DerivationTree, TreeNode};
pub use error::{Error, Result};
pub use input::queue::{InputEvent, InputQueue};
pub use session::{Dictionary, SelectionController, SessionPhase, WordValidator};
pub use systems::{
    compute_layout, compute_score, score_depths, slot_depths, CommittedWord, GestureResult,
    GestureSelector, Layout, LayoutEntry,
};
