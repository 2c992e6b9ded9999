use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::Serialize;

use crate::api::config::SessionConfig;
use crate::api::types::{IdAllocator, SlotId};

/// Availability of a ring slot for the next gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Selectable.
    Available,
    /// Not selectable.
    Disabled,
    /// Not selectable; already consumed by a child of the current node.
    Used,
}

impl SlotState {
    pub fn is_selectable(self) -> bool {
        self == SlotState::Available
    }
}

/// One letter position on the ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterSlot {
    pub id: SlotId,
    pub letter: char,
    pub pos: Vec2,
    pub state: SlotState,
}

/// What a pointer position landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Slot(SlotId),
    /// The commit control at the ring center.
    Commit,
}

/// Split a host `letters` attribute into ring letters.
///
/// Accepts either a comma-separated list (`"a, b, c"`) or a literal
/// sequence (`"abc"`). Whitespace and commas are dropped; letters are
/// uppercased.
pub fn parse_letters(attr: &str) -> Vec<char> {
    attr.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Fixed circular arrangement of letter slots plus a central commit control.
///
/// Slot ids are reserved as one consecutive block, so lookup is an offset
/// into `slots`. Ids from a previous ring never fall inside the block.
#[derive(Debug, Clone)]
pub struct LetterRing {
    slots: Vec<LetterSlot>,
    first_id: u32,
    center: Vec2,
    slot_radius: f32,
    commit_radius: f32,
}

impl LetterRing {
    /// Lay out `letters` clockwise around the configured center, starting at the top.
    pub fn new(letters: &[char], config: &SessionConfig, ids: &mut IdAllocator) -> Self {
        let first_id = ids.reserve(letters.len());
        let center = config.center();
        let angle_step = if letters.is_empty() {
            0.0
        } else {
            TAU / letters.len() as f32
        };

        let slots = letters
            .iter()
            .enumerate()
            .map(|(i, &letter)| {
                let angle = i as f32 * angle_step - FRAC_PI_2;
                LetterSlot {
                    id: SlotId(first_id + i as u32),
                    letter,
                    pos: center + Vec2::from_angle(angle) * config.ring_radius,
                    state: SlotState::Available,
                }
            })
            .collect();

        Self {
            slots,
            first_id,
            center,
            slot_radius: config.slot_radius,
            commit_radius: config.commit_radius,
        }
    }

    fn index_of(&self, id: SlotId) -> Option<usize> {
        let idx = id.0.checked_sub(self.first_id)? as usize;
        (idx < self.slots.len()).then_some(idx)
    }

    pub fn slots(&self) -> &[LetterSlot] {
        &self.slots
    }

    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    pub fn get(&self, id: SlotId) -> Option<&LetterSlot> {
        self.index_of(id).map(|i| &self.slots[i])
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn letter(&self, id: SlotId) -> Option<char> {
        self.get(id).map(|s| s.letter)
    }

    pub fn position(&self, id: SlotId) -> Option<Vec2> {
        self.get(id).map(|s| s.pos)
    }

    pub fn commit_position(&self) -> Vec2 {
        self.center
    }

    /// The full ring content in slot order.
    pub fn letters(&self) -> String {
        self.slots.iter().map(|s| s.letter).collect()
    }

    /// Concatenate the letters of `ids`, skipping any not on this ring.
    pub fn word_of(&self, ids: &[SlotId]) -> String {
        ids.iter().filter_map(|&id| self.letter(id)).collect()
    }

    /// Find what lies under `point`.
    ///
    /// The commit control wins over slots. Among slots, only selectable ones
    /// are hit, and the nearest center wins if hit circles overlap.
    pub fn hit_test(&self, point: Vec2) -> Option<Hit> {
        if point.distance(self.center) <= self.commit_radius {
            return Some(Hit::Commit);
        }

        self.slots
            .iter()
            .filter(|s| s.state.is_selectable())
            .map(|s| (s.id, point.distance(s.pos)))
            .filter(|&(_, dist)| dist <= self.slot_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| Hit::Slot(id))
    }

    pub fn set_state(&mut self, id: SlotId, state: SlotState) {
        if let Some(i) = self.index_of(id) {
            self.slots[i].state = state;
        }
    }

    /// Enable exactly `enabled`, marking the members of `used` as used.
    /// Every other slot is disabled.
    pub fn apply_availability(&mut self, enabled: &[SlotId], used: &[SlotId]) {
        for slot in &mut self.slots {
            slot.state = if !enabled.contains(&slot.id) {
                SlotState::Disabled
            } else if used.contains(&slot.id) {
                SlotState::Used
            } else {
                SlotState::Available
            };
        }
    }

    pub fn enable_all(&mut self) {
        for slot in &mut self.slots {
            slot.state = SlotState::Available;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
