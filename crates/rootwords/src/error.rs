//! Error types for a Rootwords session.

use thiserror::Error;

use crate::api::types::NodeId;

/// Errors raised by the session, tree and dictionary.
///
/// `InvalidWord` and `DuplicateWord` are player-facing and never change
/// state. `InvalidParent` signals an integration bug in the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The word is not in the dictionary (or the dictionary is not loaded yet).
    #[error("'{0}' is not a valid word")]
    InvalidWord(String),

    /// The word was already played this session.
    #[error("'{0}' has already been used")]
    DuplicateWord(String),

    /// The node handle does not belong to the current tree.
    #[error("node {0:?} is not part of this tree")]
    InvalidParent(NodeId),

    /// Node selection was requested while words only attach as a chain.
    #[error("branching is disabled for this session")]
    BranchingDisabled,

    /// The word list may only be ingested once per session.
    #[error("dictionary has already been loaded")]
    DictionaryAlreadyLoaded,

    /// The session configuration could not be parsed.
    #[error("invalid session config: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Whether the player caused this error and can simply try again.
    pub fn is_player_facing(&self) -> bool {
        matches!(self, Error::InvalidWord(_) | Error::DuplicateWord(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
