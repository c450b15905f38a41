//! PCS set construction: deriving the complete triple encoding of a tree.

use crate::pcs::{Pcs, Slot};
use crate::tree::{MergeNode, MergeTree};
use crate::{debug, trace};
use rapidhash::RapidHashSet as HashSet;

/// The complete PCS encoding of one tree snapshot.
///
/// A thin wrapper over a hash set of triples, deduplicated under the
/// triples' value equality and read-only after construction. The same type
/// doubles as the `ignored` argument of the divergence queries (an empty set
/// ignores nothing).
///
/// For a tree of N nodes with C child edges the derived set holds exactly
/// C + N + 2 triples: one per adjacent-sibling pair, a first-child marker
/// per internal node, one marker per leaf, and the two root sentinels.
///
/// Lookups scan linearly; sets are proportional to tree size, so a merge
/// driver issuing many queries should build its own index over the slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcsSet<N: MergeNode> {
    inner: HashSet<Pcs<N>>,
}

impl<N: MergeNode> PcsSet<N> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            inner: HashSet::default(),
        }
    }

    /// Derive the complete PCS set of `tree`.
    ///
    /// Visits every node once in pre-order. A node with children emits a
    /// first-child triple plus one triple per child (the last child's
    /// successor being the boundary); a leaf emits a single
    /// boundary-anchored triple; the tree root contributes the two sentinel
    /// triples (∅, root, ∅) and (∅, ∅, root).
    ///
    /// Deterministic given deterministic child order. The tree must be
    /// finite and acyclic; this is not checked.
    pub fn from_tree<T>(tree: T) -> Self
    where
        T: MergeTree<Node = N>,
    {
        let mut set = Self::new();
        for node in tree.pre_order() {
            let children: Vec<N> = tree.children(&node).collect();
            trace!(children = children.len(), "pcs: encode node");
            if children.is_empty() {
                set.insert(Pcs::new(
                    Slot::Node(node.clone()),
                    Slot::Boundary,
                    Slot::Boundary,
                ));
                continue;
            }
            set.insert(Pcs::new(
                Slot::Node(node.clone()),
                Slot::Boundary,
                Slot::Node(children[0].clone()),
            ));
            for (i, child) in children.iter().enumerate() {
                let successor = match children.get(i + 1) {
                    Some(next) => Slot::Node(next.clone()),
                    None => Slot::Boundary,
                };
                set.insert(Pcs::new(
                    Slot::Node(node.clone()),
                    Slot::Node(child.clone()),
                    successor,
                ));
            }
        }
        let root = tree.root();
        set.insert(Pcs::new(
            Slot::Boundary,
            Slot::Node(root.clone()),
            Slot::Boundary,
        ));
        set.insert(Pcs::new(Slot::Boundary, Slot::Boundary, Slot::Node(root)));
        debug!(triples = set.len(), "pcs: encoded tree");
        set
    }

    /// Number of triples in the set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the set holds no triples.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Membership by value equality.
    pub fn contains(&self, pcs: &Pcs<N>) -> bool {
        self.inner.contains(pcs)
    }

    /// Insert a triple; returns false if a value-equal one was present.
    pub fn insert(&mut self, pcs: Pcs<N>) -> bool {
        self.inner.insert(pcs)
    }

    /// Iterate over the triples, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Pcs<N>> + '_ {
        self.inner.iter()
    }
}

impl<N: MergeNode> Default for PcsSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: MergeNode> FromIterator<Pcs<N>> for PcsSet<N> {
    fn from_iter<I: IntoIterator<Item = Pcs<N>>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<N: MergeNode> Extend<Pcs<N>> for PcsSet<N> {
    fn extend<I: IntoIterator<Item = Pcs<N>>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<'a, N: MergeNode> IntoIterator for &'a PcsSet<N> {
    type Item = &'a Pcs<N>;
    type IntoIter = std::collections::hash_set::Iter<'a, Pcs<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Render every triple in `set`, using `render` for individual nodes.
///
/// Diagnostic output only; triples appear in the set's iteration order.
pub fn inspect<N: MergeNode, F: Fn(&N) -> String>(set: &PcsSet<N>, render: F) -> String {
    set.iter()
        .map(|pcs| pcs.to_pretty_string(&render))
        .collect::<Vec<_>>()
        .join(", ")
}
