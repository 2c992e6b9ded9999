pub mod controller;
pub mod dictionary;

pub use controller::{SelectionController, SessionPhase};
pub use dictionary::{Dictionary, WordValidator};
