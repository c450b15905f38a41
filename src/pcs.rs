//! The PCS triple: the relational encoding of one parent/sibling adjacency.
//!
//! A rooted ordered tree decomposes into one [`Pcs`] per adjacent-sibling
//! pair, plus sentinel triples for first children, leaves, and the tree
//! root. Comparing the PCS sets of two edited versions of a common ancestor
//! reveals structural conflicts without computing an edit script: a triple
//! present in only one version is a non-conflicting change, and two triples
//! that agree on two slots but differ on the third are a conflict.
//!
//! Triple equality and hashing follow the slots' *value* equality so that
//! sets deduplicate across versions; the divergence queries compare slots by
//! *identity* ([`MergeNode::same_node`]). Both relations are part of the
//! contract.

use core::fmt;

use crate::set::PcsSet;
use crate::tree::MergeNode;

/// One slot of a PCS triple: a tree node, or the boundary sentinel.
///
/// `Boundary` stands in for "no such node": the virtual parent of the tree
/// root, the anchor before a first child, and the anchor after a last child.
/// Modeling it as a variant keeps construction and comparison free of
/// scattered null checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot<N> {
    /// A real tree node.
    Node(N),
    /// The "no such node" sentinel.
    Boundary,
}

impl<N: MergeNode> Slot<N> {
    /// Identity comparison between slots.
    ///
    /// Two `Node` slots are the same only when they refer to the same tree
    /// node ([`MergeNode::same_node`]); two `Boundary` slots are always the
    /// same. Deliberately different from `==`, which follows the nodes'
    /// value equality.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Node(a), Slot::Node(b)) => a.same_node(b),
            (Slot::Boundary, Slot::Boundary) => true,
            _ => false,
        }
    }

    /// True for the boundary sentinel.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Slot::Boundary)
    }

    /// The node in this slot, if it is not the boundary.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            Slot::Node(n) => Some(n),
            Slot::Boundary => None,
        }
    }
}

impl<N: fmt::Display> fmt::Display for Slot<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Node(n) => write!(f, "{n}"),
            Slot::Boundary => write!(f, "∅"),
        }
    }
}

/// A parent-child-successor triple.
///
/// Reads as: under parent `root`, the sibling after `predecessor` is
/// `successor`. A `Boundary` predecessor marks a first child, a `Boundary`
/// successor marks a last child, and a `Boundary` root marks the position of
/// the tree itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pcs<N> {
    root: Slot<N>,
    predecessor: Slot<N>,
    successor: Slot<N>,
}

impl<N: MergeNode> Pcs<N> {
    /// Create a triple from its three slots.
    pub fn new(root: Slot<N>, predecessor: Slot<N>, successor: Slot<N>) -> Self {
        Self {
            root,
            predecessor,
            successor,
        }
    }

    /// The parent slot.
    pub fn root(&self) -> &Slot<N> {
        &self.root
    }

    /// The predecessor slot.
    pub fn predecessor(&self) -> &Slot<N> {
        &self.predecessor
    }

    /// The successor slot.
    pub fn successor(&self) -> &Slot<N> {
        &self.successor
    }

    /// First triple in `set` that agrees with `self` on exactly two slots
    /// (by identity) and differs on the third.
    ///
    /// Each candidate is checked in the order: successor differs, then
    /// predecessor differs, then root differs. In a well-formed pair of PCS
    /// sets at most one triple can match, so scan order does not affect the
    /// result.
    ///
    /// Unlike [`divergent_root`], this generalized form carries no
    /// boundary guard and no exclusion set.
    ///
    /// [`divergent_root`]: Pcs::divergent_root
    pub fn any_divergent<'s>(&self, set: &'s PcsSet<N>) -> Option<&'s Pcs<N>> {
        set.iter().find(|&other| {
            let root = self.root.same(&other.root);
            let pred = self.predecessor.same(&other.predecessor);
            let succ = self.successor.same(&other.successor);
            (root && pred && !succ) || (root && !pred && succ) || (!root && pred && succ)
        })
    }

    /// First triple in `set` (skipping `ignored`) with the same root and
    /// predecessor but a different successor.
    ///
    /// Signals that this node's position among its siblings differs between
    /// versions. `ignored` lets an iterative merge loop mark triples already
    /// consumed so repeated queries don't re-surface stale conflicts; it is
    /// matched by value equality and never mutated.
    pub fn divergent_successor<'s>(
        &self,
        set: &'s PcsSet<N>,
        ignored: &PcsSet<N>,
    ) -> Option<&'s Pcs<N>> {
        set.iter()
            .filter(|&other| !ignored.contains(other))
            .find(|&other| {
                self.root.same(&other.root)
                    && self.predecessor.same(&other.predecessor)
                    && !self.successor.same(&other.successor)
            })
    }

    /// First triple in `set` (skipping `ignored`) with the same root and
    /// successor but a different predecessor.
    ///
    /// The mirror image of [`divergent_successor`]: sibling-order conflicts
    /// are detectable scanning from either neighbor.
    ///
    /// [`divergent_successor`]: Pcs::divergent_successor
    pub fn divergent_predecessor<'s>(
        &self,
        set: &'s PcsSet<N>,
        ignored: &PcsSet<N>,
    ) -> Option<&'s Pcs<N>> {
        set.iter()
            .filter(|&other| !ignored.contains(other))
            .find(|&other| {
                self.root.same(&other.root)
                    && !self.predecessor.same(&other.predecessor)
                    && self.successor.same(&other.successor)
            })
    }

    /// First triple in `set` (skipping `ignored`) with the same predecessor
    /// and successor but a different root: the pair appears under two
    /// different parents (a reparenting conflict).
    ///
    /// Only applies when both anchors are real nodes. Boundary-anchored
    /// triples (leaves, first-child markers) share their `(∅, ∅)` anchors
    /// with every other such triple in the set and would spuriously match.
    pub fn divergent_root<'s>(
        &self,
        set: &'s PcsSet<N>,
        ignored: &PcsSet<N>,
    ) -> Option<&'s Pcs<N>> {
        if self.predecessor.is_boundary() || self.successor.is_boundary() {
            return None;
        }
        set.iter()
            .filter(|&other| !ignored.contains(other))
            .find(|&other| {
                !self.root.same(&other.root)
                    && self.predecessor.same(&other.predecessor)
                    && self.successor.same(&other.successor)
            })
    }

    /// Render the triple using `render` for individual nodes.
    pub fn to_pretty_string<F: Fn(&N) -> String>(&self, render: F) -> String {
        let slot = |s: &Slot<N>| match s.as_node() {
            Some(n) => render(n),
            None => "∅".to_owned(),
        };
        format!(
            "({},{},{})",
            slot(&self.root),
            slot(&self.predecessor),
            slot(&self.successor)
        )
    }
}

impl<N: fmt::Display> fmt::Display for Pcs<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.root, self.predecessor, self.successor)
    }
}

/// Render a pair of triples, using `render` for individual nodes.
///
/// Diagnostic output only, e.g. for reporting a conflicting triple pair.
pub fn inspect_pair<N: MergeNode, F: Fn(&N) -> String>(
    a: &Pcs<N>,
    b: &Pcs<N>,
    render: F,
) -> String {
    format!(
        "({}, {})",
        a.to_pretty_string(&render),
        b.to_pretty_string(&render)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::PcsSet;
    use crate::tree::{Handle, NodeData, Tree};

    fn slot<'a>(h: Handle<'a, &'static str>) -> Slot<Handle<'a, &'static str>> {
        Slot::Node(h)
    }

    #[test]
    fn test_divergent_successor_on_reorder() {
        // Version A: parent -> [x, y]
        // Version B: parent -> [y, x]  (same node ids, reordered)
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        let xa = tree_a.add_child(tree_a.root, NodeData::new(1, "x"));
        let ya = tree_a.add_child(tree_a.root, NodeData::new(2, "y"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        tree_b.add_child(tree_b.root, NodeData::new(2, "y"));
        tree_b.add_child(tree_b.root, NodeData::new(1, "x"));

        let set_b = PcsSet::from_tree(&tree_b);

        // (parent, x, y) from version A: in B, the triple anchored at the
        // same (parent, x) pair is (parent, x, ∅).
        let triple = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            slot(tree_a.handle(xa)),
            slot(tree_a.handle(ya)),
        );

        let other = triple
            .divergent_successor(&set_b, &PcsSet::new())
            .expect("reordered sibling should diverge");
        assert!(triple.root().same(other.root()));
        assert!(triple.predecessor().same(other.predecessor()));
        assert!(other.successor().is_boundary());
    }

    #[test]
    fn test_divergent_predecessor_on_reorder() {
        // Same trees as above, scanning from the other neighbor: in B the
        // triple anchored at (parent, _, y) is (parent, ∅, y).
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        let xa = tree_a.add_child(tree_a.root, NodeData::new(1, "x"));
        let ya = tree_a.add_child(tree_a.root, NodeData::new(2, "y"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        tree_b.add_child(tree_b.root, NodeData::new(2, "y"));
        tree_b.add_child(tree_b.root, NodeData::new(1, "x"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            slot(tree_a.handle(xa)),
            slot(tree_a.handle(ya)),
        );

        let other = triple
            .divergent_predecessor(&set_b, &PcsSet::new())
            .expect("reordered sibling should diverge");
        assert!(other.predecessor().is_boundary());
        assert!(triple.successor().same(other.successor()));
    }

    #[test]
    fn test_divergent_root_on_reparent() {
        // Version A: root -> [p -> [x, y], q]
        // Version B: root -> [p, q -> [x, y]]  (the pair moved under q)
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "root"));
        let pa = tree_a.add_child(tree_a.root, NodeData::new(1, "p"));
        let xa = tree_a.add_child(pa, NodeData::new(3, "x"));
        let ya = tree_a.add_child(pa, NodeData::new(4, "y"));
        tree_a.add_child(tree_a.root, NodeData::new(2, "q"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "root"));
        tree_b.add_child(tree_b.root, NodeData::new(1, "p"));
        let qb = tree_b.add_child(tree_b.root, NodeData::new(2, "q"));
        tree_b.add_child(qb, NodeData::new(3, "x"));
        tree_b.add_child(qb, NodeData::new(4, "y"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(
            slot(tree_a.handle(pa)),
            slot(tree_a.handle(xa)),
            slot(tree_a.handle(ya)),
        );

        let other = triple
            .divergent_root(&set_b, &PcsSet::new())
            .expect("reparented pair should diverge");
        assert_eq!(other.root().as_node().map(|n| n.id()), Some(2));
    }

    #[test]
    fn test_divergent_root_boundary_guard() {
        // Two unrelated leaves under different parents both produce
        // (leaf, ∅, ∅) triples; they must not count as a reparenting
        // conflict against each other.
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "root"));
        let pa = tree_a.add_child(tree_a.root, NodeData::new(1, "p"));
        let leaf_a = tree_a.add_child(pa, NodeData::new(3, "x"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "root"));
        let qb = tree_b.add_child(tree_b.root, NodeData::new(2, "q"));
        tree_b.add_child(qb, NodeData::new(4, "w"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(slot(tree_a.handle(leaf_a)), Slot::Boundary, Slot::Boundary);
        assert!(triple.divergent_root(&set_b, &PcsSet::new()).is_none());
    }

    #[test]
    fn test_ignored_triples_are_skipped() {
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        let xa = tree_a.add_child(tree_a.root, NodeData::new(1, "x"));
        let ya = tree_a.add_child(tree_a.root, NodeData::new(2, "y"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        tree_b.add_child(tree_b.root, NodeData::new(2, "y"));
        let xb = tree_b.add_child(tree_b.root, NodeData::new(1, "x"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            slot(tree_a.handle(xa)),
            slot(tree_a.handle(ya)),
        );

        // Mark the would-be match (parent, x, ∅) as already consumed.
        let mut ignored = PcsSet::new();
        ignored.insert(Pcs::new(
            slot(tree_b.handle(tree_b.root)),
            slot(tree_b.handle(xb)),
            Slot::Boundary,
        ));
        assert!(triple.divergent_successor(&set_b, &ignored).is_none());

        // The set itself is untouched: without the exclusion the match is
        // still there.
        assert!(triple.divergent_successor(&set_b, &PcsSet::new()).is_some());
    }

    #[test]
    fn test_any_divergent_on_reorder() {
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        let xa = tree_a.add_child(tree_a.root, NodeData::new(1, "x"));
        let ya = tree_a.add_child(tree_a.root, NodeData::new(2, "y"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "parent"));
        tree_b.add_child(tree_b.root, NodeData::new(2, "y"));
        tree_b.add_child(tree_b.root, NodeData::new(1, "x"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            slot(tree_a.handle(xa)),
            slot(tree_a.handle(ya)),
        );

        // Either (parent, x, ∅) or (parent, ∅, y) qualifies; whichever is
        // returned must agree with the query on exactly two slots.
        let other = triple
            .any_divergent(&set_b)
            .expect("reordered siblings should diverge");
        let same = [
            triple.root().same(other.root()),
            triple.predecessor().same(other.predecessor()),
            triple.successor().same(other.successor()),
        ];
        assert_eq!(same.iter().filter(|&&s| s).count(), 2);
    }

    #[test]
    fn test_any_divergent_none_for_identical_versions() {
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(0, "a"));
        let ba = tree_a.add_child(tree_a.root, NodeData::new(1, "b"));
        let ca = tree_a.add_child(tree_a.root, NodeData::new(2, "c"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(0, "a"));
        tree_b.add_child(tree_b.root, NodeData::new(1, "b"));
        tree_b.add_child(tree_b.root, NodeData::new(2, "c"));

        let set_b = PcsSet::from_tree(&tree_b);

        let triple = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            slot(tree_a.handle(ba)),
            slot(tree_a.handle(ca)),
        );
        assert!(triple.any_divergent(&set_b).is_none());
    }

    #[test]
    fn test_value_equal_triples_collapse_but_never_diverge() {
        // Two trees whose nodes carry the same labels but unrelated ids:
        // structurally identical, yet no slot is *the same node*. Their
        // triples are equal (they collapse in a set) but the identity-based
        // queries never relate them.
        let mut tree_a: Tree<&'static str> = Tree::new(NodeData::new(1, "p"));
        let ca = tree_a.add_child(tree_a.root, NodeData::new(2, "c"));

        let mut tree_b: Tree<&'static str> = Tree::new(NodeData::new(3, "p"));
        let cb = tree_b.add_child(tree_b.root, NodeData::new(4, "c"));

        let triple_a = Pcs::new(
            slot(tree_a.handle(tree_a.root)),
            Slot::Boundary,
            slot(tree_a.handle(ca)),
        );
        let triple_b = Pcs::new(
            slot(tree_b.handle(tree_b.root)),
            Slot::Boundary,
            slot(tree_b.handle(cb)),
        );

        assert_eq!(triple_a, triple_b);

        let mut collapsed = PcsSet::new();
        collapsed.insert(triple_a);
        collapsed.insert(triple_b);
        assert_eq!(collapsed.len(), 1);

        let set_b = PcsSet::from_tree(&tree_b);
        let none = PcsSet::new();
        assert!(triple_a.any_divergent(&set_b).is_none());
        assert!(triple_a.divergent_successor(&set_b, &none).is_none());
        assert!(triple_a.divergent_predecessor(&set_b, &none).is_none());
        assert!(triple_a.divergent_root(&set_b, &none).is_none());
    }

    #[test]
    fn test_display_and_pretty() {
        let mut tree: Tree<&'static str> = Tree::new(NodeData::new(0, "a"));
        let b = tree.add_child(tree.root, NodeData::new(1, "b"));

        let triple = Pcs::new(
            slot(tree.handle(tree.root)),
            Slot::Boundary,
            slot(tree.handle(b)),
        );
        assert_eq!(triple.to_string(), "(a,∅,b)");
        assert_eq!(
            triple.to_pretty_string(|n| format!("<{}>", n.label())),
            "(<a>,∅,<b>)"
        );

        let last = Pcs::new(slot(tree.handle(tree.root)), slot(tree.handle(b)), Slot::Boundary);
        assert_eq!(
            inspect_pair(&triple, &last, |n| n.label().to_string()),
            "((a,∅,b), (a,b,∅))"
        );
    }
}
