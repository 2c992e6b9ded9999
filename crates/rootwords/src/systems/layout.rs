use std::collections::HashMap;

use serde::Serialize;

use crate::api::types::NodeId;
use crate::core::tree::DerivationTree;

/// Grid placement of one tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    /// Depth from the root.
    pub row: usize,
    pub column_start: usize,
    /// Always the node's word length.
    pub column_span: usize,
}

impl LayoutEntry {
    /// First column past this entry.
    pub fn column_end(&self) -> usize {
        self.column_start + self.column_span
    }
}

/// Placement of every node, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    entries: Vec<(NodeId, LayoutEntry)>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn get(&self, id: NodeId) -> Option<&LayoutEntry> {
        self.index.get(&id).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, LayoutEntry)> {
        self.entries.iter()
    }

    /// Number of rows the grid needs.
    pub fn rows(&self) -> usize {
        self.entries.iter().map(|(_, e)| e.row + 1).max().unwrap_or(0)
    }

    /// Number of columns the grid needs.
    pub fn columns(&self) -> usize {
        self.entries.iter().map(|(_, e)| e.column_end()).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, id: NodeId, entry: LayoutEntry) {
        self.index.insert(id, self.entries.len());
        self.entries.push((id, entry));
    }
}

/// Place every node of `tree` on a row/column grid.
///
/// The root sits at row 0, column 0. Children go one row down and tile
/// left to right starting at their parent's column, each reserving only its
/// own word length. A node's descendants are therefore not guaranteed to
/// stay inside the parent's span.
pub fn compute_layout(tree: &DerivationTree) -> Layout {
    let mut layout = Layout::default();
    place(tree, tree.root(), 0, 0, &mut layout);
    layout
}

fn place(tree: &DerivationTree, id: NodeId, row: usize, column_start: usize, out: &mut Layout) {
    let Some(node) = tree.get(id) else { return };
    out.push(
        id,
        LayoutEntry {
            row,
            column_start,
            column_span: node.len(),
        },
    );

    let mut cursor = column_start;
    for &child in node.children() {
        place(tree, child, row + 1, cursor, out);
        cursor += tree.get(child).map_or(0, |c| c.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SessionConfig;
    use crate::api::types::{IdAllocator, SlotId};
    use crate::core::ring::{parse_letters, LetterRing};

    fn ring() -> LetterRing {
        LetterRing::new(&parse_letters("STONE"), &SessionConfig::default(), &mut IdAllocator::new())
    }

    fn pick(ring: &LetterRing, idx: &[usize]) -> Vec<SlotId> {
        idx.iter().map(|&i| ring.slots()[i].id).collect()
    }

    #[test]
    fn root_spans_the_ring() {
        let ring = ring();
        let tree = DerivationTree::new(&ring);
        let layout = compute_layout(&tree);
        assert_eq!(
            layout.get(tree.root()),
            Some(&LayoutEntry { row: 0, column_start: 0, column_span: 5 })
        );
        assert_eq!(layout.rows(), 1);
        assert_eq!(layout.columns(), 5);
    }

    #[test]
    fn siblings_tile_by_word_length() {
        let ring = ring();
        let mut tree = DerivationTree::new(&ring);
        let root = tree.root();
        let a = tree.insert(root, &ring, &pick(&ring, &[1, 2, 3])).unwrap();
        let b = tree.insert(root, &ring, &pick(&ring, &[2, 3, 4, 0])).unwrap();
        let c = tree.insert(root, &ring, &pick(&ring, &[3, 2])).unwrap();

        let layout = compute_layout(&tree);
        let root_start = layout.get(root).unwrap().column_start;
        let starts: Vec<_> = [a, b, c].iter().map(|&id| layout.get(id).unwrap().column_start).collect();
        assert_eq!(starts, vec![root_start, root_start + 3, root_start + 7]);
        assert!([a, b, c].iter().all(|&id| layout.get(id).unwrap().row == 1));
        assert_eq!(layout.columns(), 9);
    }

    #[test]
    fn grandchildren_start_under_their_parent() {
        let ring = ring();
        let mut tree = DerivationTree::new(&ring);
        let root = tree.root();
        let a = tree.insert(root, &ring, &pick(&ring, &[1, 2])).unwrap();
        let b = tree.insert(root, &ring, &pick(&ring, &[2, 3, 4])).unwrap();
        let b1 = tree.insert(b, &ring, &pick(&ring, &[2, 3])).unwrap();
        let b2 = tree.insert(b, &ring, &pick(&ring, &[3, 2, 4])).unwrap();

        let layout = compute_layout(&tree);
        assert_eq!(layout.get(a).unwrap().column_start, 0);
        assert_eq!(layout.get(b).unwrap().column_start, 2);
        assert_eq!(layout.get(b1), Some(&LayoutEntry { row: 2, column_start: 2, column_span: 2 }));
        // The second grandchild runs past its parent's span.
        assert_eq!(layout.get(b2), Some(&LayoutEntry { row: 2, column_start: 4, column_span: 3 }));
        assert_eq!(layout.rows(), 3);

        let order: Vec<NodeId> = layout.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![root, a, b, b1, b2]);
    }

    #[test]
    fn layout_is_a_pure_function_of_the_tree() {
        let ring = ring();
        let mut tree = DerivationTree::new(&ring);
        let root = tree.root();
        let a = tree.insert(root, &ring, &pick(&ring, &[1, 2, 3])).unwrap();
        tree.insert(a, &ring, &pick(&ring, &[2, 3])).unwrap();
        assert_eq!(compute_layout(&tree), compute_layout(&tree));
    }
}
