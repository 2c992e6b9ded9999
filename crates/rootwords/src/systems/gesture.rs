use glam::Vec2;

use crate::api::types::SlotId;
use crate::core::ring::{Hit, LetterRing};

/// A finished selection, handed to the session for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedWord {
    /// Letters in selection order.
    pub word: String,
    /// Slots in selection order; one per letter.
    pub slots: Vec<SlotId>,
}

/// Result of processing a pointer event or commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureResult {
    /// No action (no gesture in progress, or the pointer is over nothing).
    Ignored,
    /// A new slot was appended to the selection.
    Selected(SlotId),
    /// The pointer is over a slot that is already part of the selection.
    AlreadySelected,
    /// The selection was committed and cleared.
    Committed(CommittedWord),
    /// Commit was requested with nothing selected.
    EmptyCommit,
}

/// Turns continuous pointer movement over the ring into an ordered,
/// duplicate-free selection of slots.
///
/// There is no backtracking: passing over a selected slot again does nothing.
/// Reaching the commit control mid-gesture commits, as does an explicit
/// [`GestureSelector::commit`] after the pointer was lifted.
#[derive(Debug, Clone, Default)]
pub struct GestureSelector {
    active: bool,
    selection: Vec<SlotId>,
    /// Slot centers in selection order, for drawing the connecting path.
    path: Vec<Vec2>,
    word: String,
}

impl GestureSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pointer down: drop any previous selection and start a gesture.
    /// The starting point counts as the first move.
    pub fn on_pointer_down(&mut self, ring: &LetterRing, pos: Vec2) -> GestureResult {
        self.reset();
        self.active = true;
        self.on_pointer_move(ring, pos)
    }

    /// Handle pointer move: extend the selection with whatever slot lies under `pos`.
    pub fn on_pointer_move(&mut self, ring: &LetterRing, pos: Vec2) -> GestureResult {
        if !self.active {
            return GestureResult::Ignored;
        }

        match ring.hit_test(pos) {
            None => GestureResult::Ignored,
            Some(Hit::Commit) => self.commit(),
            Some(Hit::Slot(id)) => {
                if self.selection.contains(&id) {
                    return GestureResult::AlreadySelected;
                }
                let Some(slot) = ring.get(id) else {
                    return GestureResult::Ignored;
                };
                self.selection.push(id);
                self.path.push(slot.pos);
                self.word.push(slot.letter);
                log::debug!("gesture: selected '{}' -> {}", slot.letter, self.word);
                GestureResult::Selected(id)
            }
        }
    }

    /// Handle pointer up. The selection stays so it can still be committed.
    pub fn on_pointer_up(&mut self) -> GestureResult {
        self.active = false;
        GestureResult::Ignored
    }

    /// Commit the current selection. Empty selections are a no-op.
    pub fn commit(&mut self) -> GestureResult {
        if self.selection.is_empty() {
            return GestureResult::EmptyCommit;
        }

        let committed = CommittedWord {
            word: std::mem::take(&mut self.word),
            slots: std::mem::take(&mut self.selection),
        };
        self.reset();
        GestureResult::Committed(committed)
    }

    /// Drop the selection and end any gesture in progress.
    pub fn reset(&mut self) {
        self.active = false;
        self.selection.clear();
        self.path.clear();
        self.word.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selection(&self) -> &[SlotId] {
        &self.selection
    }

    /// Letters selected so far, in order.
    pub fn display_word(&self) -> &str {
        &self.word
    }

    pub fn path_points(&self) -> &[Vec2] {
        &self.path
    }
}
