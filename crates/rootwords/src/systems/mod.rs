pub mod gesture;
pub mod layout;
pub mod scoring;

pub use gesture::{CommittedWord, GestureResult, GestureSelector};
pub use layout::{compute_layout, Layout, LayoutEntry};
pub use scoring::{compute_score, score_depths, slot_depths};
