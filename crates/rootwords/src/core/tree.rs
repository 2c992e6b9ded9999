// core/tree.rs
//
// Derivation tree — records which word was built from which earlier word.
// Nodes live in an arena addressed by NodeId; parents and children are ids,
// so there are no ownership cycles.
//
// Usage:
//   let mut tree = DerivationTree::new(&ring);
//   let stone = tree.insert(tree.root(), &ring, &slots)?;
//   for (id, depth) in tree.iter() { ... }

use std::collections::VecDeque;

use crate::api::types::{IdAllocator, NodeId, SlotId};
use crate::core::ring::LetterRing;
use crate::error::{Error, Result};

/// One word in the tree. The root holds the full ring.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    /// Letters in slot order. Always one letter per slot.
    pub word: String,
    /// Ring slots consumed to spell `word`.
    pub slots: Vec<SlotId>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of letters, which is also the number of consumed slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Rooted tree of committed words.
///
/// Node ids are handed out consecutively, so lookup is an offset into
/// `nodes`. A tree built with [`DerivationTree::following`] starts where the
/// previous tree stopped, so stale ids never resolve.
#[derive(Debug, Clone)]
pub struct DerivationTree {
    nodes: Vec<TreeNode>,
    first_id: u32,
    ids: IdAllocator,
}

impl DerivationTree {
    /// Build a tree whose root is the complete ring.
    pub fn new(ring: &LetterRing) -> Self {
        Self::with_ids(ring, IdAllocator::new())
    }

    /// Build a fresh tree for `ring` whose ids continue after `previous`.
    pub fn following(previous: &DerivationTree, ring: &LetterRing) -> Self {
        Self::with_ids(ring, IdAllocator::starting_at(previous.ids.peek()))
    }

    fn with_ids(ring: &LetterRing, mut ids: IdAllocator) -> Self {
        let first_id = ids.reserve(1);
        let root = TreeNode {
            id: NodeId(first_id),
            word: ring.letters(),
            slots: ring.slot_ids(),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            first_id,
            ids,
        }
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        let idx = id.0.checked_sub(self.first_id)? as usize;
        (idx < self.nodes.len()).then_some(idx)
    }

    pub fn root(&self) -> NodeId {
        self.nodes[0].id
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append a word spelled by `slots` as the last child of `parent`.
    ///
    /// Fails with `InvalidWord` if `slots` is empty or names a slot that is
    /// not on `ring`, so every stored word has exactly one letter per slot.
    pub fn insert(&mut self, parent: NodeId, ring: &LetterRing, slots: &[SlotId]) -> Result<NodeId> {
        let parent_idx = self.index_of(parent).ok_or(Error::InvalidParent(parent))?;
        if slots.is_empty() || !slots.iter().all(|&s| ring.contains(s)) {
            return Err(Error::InvalidWord(ring.word_of(slots)));
        }

        let id = NodeId(self.ids.reserve(1));
        self.nodes.push(TreeNode {
            id,
            word: ring.word_of(slots),
            slots: slots.to_vec(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent_idx].children.push(id);
        Ok(id)
    }

    /// Number of parent hops from `id` to the root.
    pub fn depth_of(&self, id: NodeId) -> Result<usize> {
        let mut idx = self.index_of(id).ok_or(Error::InvalidParent(id))?;
        let mut depth = 0;
        while let Some(parent) = self.nodes[idx].parent {
            // Parents are always inserted before their children.
            idx = parent.0 as usize - self.first_id as usize;
            depth += 1;
        }
        Ok(depth)
    }

    /// Ids from `id` up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.get(id).map(|n| n.id);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.parent(node);
        }
        path
    }

    /// Slots consumed by any direct child of `id`, deduplicated.
    pub fn slots_used_by_children(&self, id: NodeId) -> Vec<SlotId> {
        let mut used: Vec<SlotId> = Vec::new();
        for &child in self.children(id) {
            if let Some(node) = self.get(child) {
                for &slot in &node.slots {
                    if !used.contains(&slot) {
                        used.push(slot);
                    }
                }
            }
        }
        used
    }

    /// Pre-order walk yielding `(id, depth)`, children in insertion order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![(self.root(), 0)],
        }
    }

    /// Breadth-first walk yielding `(id, depth)`.
    pub fn iter_level_order(&self) -> LevelOrder<'_> {
        LevelOrder {
            tree: self,
            queue: VecDeque::from([(self.root(), 0)]),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Lazy pre-order traversal. Call [`DerivationTree::iter`] again for a fresh walk.
pub struct PreOrder<'a> {
    tree: &'a DerivationTree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for PreOrder<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        // Push in reverse so the first child is visited first.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((id, depth))
    }
}

pub struct LevelOrder<'a> {
    tree: &'a DerivationTree,
    queue: VecDeque<(NodeId, usize)>,
}

impl Iterator for LevelOrder<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.queue.pop_front()?;
        for &child in self.tree.children(id) {
            self.queue.push_back((child, depth + 1));
        }
        Some((id, depth))
    }
}
