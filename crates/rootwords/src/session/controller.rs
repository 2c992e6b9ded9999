use std::collections::HashSet;

use glam::Vec2;

use crate::api::config::{AttachPolicy, AvailabilityPolicy, SessionConfig};
use crate::api::types::*;
use crate::core::ring::{parse_letters, LetterRing};
use crate::core::tree::DerivationTree;
use crate::error::{Error, Result};
use crate::input::queue::{InputEvent, InputQueue};
use crate::session::dictionary::{Dictionary, WordValidator};
use crate::systems::gesture::{CommittedWord, GestureResult, GestureSelector};
use crate::systems::layout::{compute_layout, Layout};
use crate::systems::scoring::compute_score;

/// Session state machine phases.
///
/// A commit is judged as soon as it arrives, so the accepted and rejected
/// outcomes are not held as phases: they are the `Result` returned by
/// [`SelectionController::submit`], and the session is `Idle` again by the
/// time the caller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No pointer is down. A selection may still be waiting for an explicit commit.
    Idle,
    /// A gesture is in progress.
    Gesturing,
}

/// Owns one game session: ring, gesture, tree, used words, layout and score.
///
/// Every mutation runs to completion before the next input is handled.
/// Layout and score are rebuilt from the tree whenever it changes.
pub struct SelectionController<V: WordValidator = Dictionary> {
    config: SessionConfig,
    validator: V,
    slot_ids: IdAllocator,
    ring: LetterRing,
    gesture: GestureSelector,
    tree: DerivationTree,
    used_words: HashSet<String>,
    /// Node new words attach under.
    current: NodeId,
    phase: SessionPhase,
    layout: Layout,
    score: u64,
    /// Outbound events, kept until the host drains them.
    events: Vec<GameEvent>,
}

impl<V: WordValidator> SelectionController<V> {
    /// Start a session on the ring described by `letters` (see [`parse_letters`]).
    pub fn new(config: SessionConfig, letters: &str, validator: V) -> Self {
        let mut slot_ids = IdAllocator::new();
        let ring = LetterRing::new(&parse_letters(letters), &config, &mut slot_ids);
        let tree = DerivationTree::new(&ring);
        let current = tree.root();
        let layout = compute_layout(&tree);

        let mut session = Self {
            config,
            validator,
            slot_ids,
            ring,
            gesture: GestureSelector::new(),
            tree,
            used_words: HashSet::new(),
            current,
            phase: SessionPhase::Idle,
            layout,
            score: 0,
            events: Vec::with_capacity(32),
        };
        session.update_availability();
        log::info!("session: started with letters {}", session.ring.letters());
        session
    }

    /// Replace the root letters. Clears used words, discards the tree and
    /// builds a fresh root from the new ring.
    pub fn reconfigure(&mut self, letters: &str) {
        self.ring = LetterRing::new(&parse_letters(letters), &self.config, &mut self.slot_ids);
        self.tree = DerivationTree::following(&self.tree, &self.ring);
        self.used_words.clear();
        self.gesture.reset();
        self.phase = SessionPhase::Idle;
        self.current = self.tree.root();
        self.update_availability();
        self.refresh();

        self.emit(EVENT_SESSION_RESET, self.ring.len() as f32, 0.0, 0.0);
        log::info!("session: reset with letters {}", self.ring.letters());
    }

    // -- Pointer input --

    /// Start a gesture at `pos`.
    pub fn pointer_down(&mut self, pos: Vec2) -> Option<Result<NodeId>> {
        self.phase = SessionPhase::Gesturing;
        let had_selection = !self.gesture.selection().is_empty();
        let result = self.gesture.on_pointer_down(&self.ring, pos);
        if had_selection && !matches!(result, GestureResult::Selected(_)) {
            self.emit_selection();
        }
        self.handle_gesture(result)
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> Option<Result<NodeId>> {
        let result = self.gesture.on_pointer_move(&self.ring, pos);
        self.handle_gesture(result)
    }

    /// End the gesture. The selection stays available for [`Self::activate_commit`].
    pub fn pointer_up(&mut self, _pos: Vec2) {
        self.gesture.on_pointer_up();
        self.phase = SessionPhase::Idle;
    }

    /// Commit the current selection via the explicit commit control.
    pub fn activate_commit(&mut self) -> Option<Result<NodeId>> {
        let result = self.gesture.commit();
        self.handle_gesture(result)
    }

    /// Drop the current selection.
    pub fn cancel_gesture(&mut self) {
        self.gesture.reset();
        self.phase = SessionPhase::Idle;
        self.emit_selection();
    }

    fn handle_gesture(&mut self, result: GestureResult) -> Option<Result<NodeId>> {
        match result {
            GestureResult::Selected(_) => {
                self.emit_selection();
                None
            }
            GestureResult::Committed(word) => {
                self.emit_selection();
                Some(self.submit(word))
            }
            GestureResult::Ignored | GestureResult::AlreadySelected | GestureResult::EmptyCommit => None,
        }
    }

    // -- Commit handling --

    /// Validate a committed word and, if it is new, add it under the current node.
    ///
    /// The slots must be distinct, currently selectable, and spell `word`.
    /// Rejections leave the tree, current node, layout and score untouched.
    pub fn submit(&mut self, committed: CommittedWord) -> Result<NodeId> {
        self.phase = SessionPhase::Idle;
        let word = committed.word.to_uppercase();

        if !self.offers(&committed.slots) || self.ring.word_of(&committed.slots) != word {
            log::warn!("session: rejected '{word}', slots do not spell it from the current node");
            self.emit(EVENT_WORD_REJECTED, REJECT_INVALID_WORD, 0.0, 0.0);
            return Err(Error::InvalidWord(word));
        }

        let long_enough = word.chars().count() >= self.config.min_word_length.max(1);
        if !long_enough || !self.validator.is_valid_word(&word) {
            log::warn!("session: rejected '{word}', not a valid word");
            self.emit(EVENT_WORD_REJECTED, REJECT_INVALID_WORD, 0.0, 0.0);
            return Err(Error::InvalidWord(word));
        }

        if self.used_words.contains(&word) {
            log::warn!("session: rejected '{word}', already used");
            self.emit(EVENT_WORD_REJECTED, REJECT_DUPLICATE_WORD, 0.0, 0.0);
            return Err(Error::DuplicateWord(word));
        }

        let id = self.tree.insert(self.current, &self.ring, &committed.slots).map_err(|err| {
            log::error!("session: cannot attach '{word}': {err}");
            err
        })?;
        let len = self.tree.get(id).map_or(0, |n| n.len());
        self.used_words.insert(word.clone());

        self.current = id;
        self.update_availability();
        self.refresh();

        self.emit(EVENT_CURRENT_NODE, id.0 as f32, 0.0, 0.0);
        // Exact up to 2^24; the snapshot carries the full score.
        self.emit(EVENT_WORD_ACCEPTED, id.0 as f32, self.score as f32, len as f32);
        log::info!("session: accepted '{word}' as {id:?}, score {}", self.score);
        Ok(id)
    }

    /// Make `id` the node new words attach under.
    pub fn select_node(&mut self, id: NodeId) -> Result<()> {
        if self.config.attach_policy == AttachPolicy::Chain {
            return Err(Error::BranchingDisabled);
        }
        if !self.tree.contains(id) {
            return Err(Error::InvalidParent(id));
        }

        // The old selection may include slots the new node does not offer.
        if !self.gesture.selection().is_empty() {
            self.gesture.reset();
            self.emit_selection();
        }
        self.current = id;
        self.update_availability();
        self.emit(EVENT_CURRENT_NODE, id.0 as f32, 0.0, 0.0);
        log::debug!("session: current node is now {id:?}");
        Ok(())
    }

    /// Whether `slots` is a non-empty run of distinct slots the ring lets the player pick now.
    fn offers(&self, slots: &[SlotId]) -> bool {
        !slots.is_empty()
            && slots.iter().enumerate().all(|(i, &id)| {
                !slots[..i].contains(&id) && self.ring.get(id).is_some_and(|slot| slot.state.is_selectable())
            })
    }

    /// Enable the current node's slots according to the availability policy.
    fn update_availability(&mut self) {
        let Some(node) = self.tree.get(self.current) else { return };
        let used = match self.config.availability_policy {
            AvailabilityPolicy::MarkChildrenUsed => self.tree.slots_used_by_children(self.current),
            AvailabilityPolicy::SelectedNodeOnly => Vec::new(),
        };
        self.ring.apply_availability(&node.slots, &used);
    }

    fn refresh(&mut self) {
        self.layout = compute_layout(&self.tree);
        self.score = compute_score(&self.tree);
    }

    // -- Input queue --

    /// Handle one input event. Returns the outcome if it committed a word.
    pub fn handle(&mut self, event: &InputEvent) -> Option<Result<NodeId>> {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                self.pointer_up(Vec2::new(x, y));
                None
            }
            InputEvent::ActivateCommit => self.activate_commit(),
            InputEvent::CancelGesture => {
                self.cancel_gesture();
                None
            }
            InputEvent::SelectNode { node } => {
                if let Err(err) = self.select_node(node) {
                    log::error!("session: cannot select {node:?}: {err}");
                }
                None
            }
        }
    }

    /// Handle every pending event in arrival order. Returns commit outcomes in order.
    pub fn process(&mut self, input: &InputQueue) -> Vec<Result<NodeId>> {
        input.iter().filter_map(|event| self.handle(event)).collect()
    }

    // -- Outbound events --

    fn emit(&mut self, kind: f32, a: f32, b: f32, c: f32) {
        self.events.push(GameEvent::new(kind, a, b, c));
    }

    fn emit_selection(&mut self) {
        let len = self.gesture.selection().len() as f32;
        self.emit(EVENT_SELECTION_CHANGED, len, 0.0, 0.0);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // -- Accessors --

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ring(&self) -> &LetterRing {
        &self.ring
    }

    pub fn gesture(&self) -> &GestureSelector {
        &self.gesture
    }

    pub fn tree(&self) -> &DerivationTree {
        &self.tree
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    pub fn is_word_used(&self, word: &str) -> bool {
        self.used_words.contains(&word.to_uppercase())
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }
}
