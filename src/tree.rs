//! Tree abstraction consumed by the PCS encoder, plus a concrete
//! arena-backed tree.
//!
//! The encoder only needs three things from a tree: its root, each node's
//! ordered children, and a pre-order walk. Node handles carry a dual
//! equality contract: `Eq`/`Hash` follow the node's *value*, while
//! [`MergeNode::same_node`] compares *identity*. Set membership of triples
//! uses the former so that triples built from two versions of a tree
//! collapse when the versions agree; the divergence queries use the latter
//! so that "the same node" and "a different node that happens to look the
//! same" stay distinguishable.

use core::fmt;
use core::hash::{Hash, Hasher};
use indextree::{Arena, NodeId};

/// A node handle with the dual equality contract.
///
/// `Eq` and `Hash` must follow the node's value (structural equality);
/// `same_node` must compare identity. The two relations are allowed to
/// disagree in both directions: two instances of the same conceptual node
/// whose label was edited are identical but not equal, and two unrelated
/// nodes with the same label are equal but not identical.
pub trait MergeNode: Clone + Eq + Hash {
    /// Identity comparison: true only when both handles refer to the same
    /// tree node, not merely to structurally equal ones.
    fn same_node(&self, other: &Self) -> bool;
}

/// A finite, acyclic, ordered tree that can be encoded into a PCS set.
///
/// The encoder visits every node exactly once via [`pre_order`] and asks for
/// ordered children; it never checks for cycles, so implementations must
/// guarantee acyclicity.
///
/// [`pre_order`]: MergeTree::pre_order
pub trait MergeTree {
    /// Node handle type produced by this tree.
    type Node: MergeNode;

    /// The root node.
    fn root(&self) -> Self::Node;

    /// Ordered children of a node.
    fn children(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// All nodes in pre-order, starting at the root.
    fn pre_order(&self) -> impl Iterator<Item = Self::Node> + '_;
}

/// Payload of one node in a [`Tree`]: a stable identity plus a label.
///
/// The id is the node's identity. A merge driver assigns the same id to the
/// same conceptual node across the base and edited versions of a tree
/// (typically out of an upstream matching phase); within one tree, ids are
/// unique. The label is the node's value, used for structural equality.
#[derive(Clone, Debug)]
pub struct NodeData<L> {
    id: u64,
    label: L,
}

impl<L> NodeData<L> {
    /// Create a node payload from an identity and a label.
    pub fn new(id: u64, label: L) -> Self {
        Self { id, label }
    }

    /// The node's stable identity.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The node's label.
    pub fn label(&self) -> &L {
        &self.label
    }
}

/// A labeled ordered tree backed by an indextree arena.
///
/// This is the crate's concrete [`MergeTree`]; the encoder works against the
/// trait, so any other tree representation can be plugged in instead.
/// `MergeTree` is implemented on `&Tree`, so encoding borrows the tree:
/// `PcsSet::from_tree(&tree)`. The tree must outlive the triples built from
/// it.
///
/// For a well-formed PCS encoding, labels should be pairwise distinct within
/// one tree (otherwise value-equal triples collapse); across versions, equal
/// labels mean "structurally the same node".
pub struct Tree<L> {
    arena: Arena<NodeData<L>>,
    /// Root node of the tree.
    pub root: NodeId,
}

impl<L> Tree<L> {
    /// Create a tree with a single root node.
    pub fn new(data: NodeData<L>) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(data);
        Self { arena, root }
    }

    /// Append a child to `parent`, returning the new node's id.
    pub fn add_child(&mut self, parent: NodeId, data: NodeData<L>) -> NodeId {
        let child = self.arena.new_node(data);
        parent.append(child, &mut self.arena);
        child
    }

    /// The payload of a node.
    pub fn data(&self, id: NodeId) -> &NodeData<L> {
        self.arena[id].get()
    }

    /// A [`Handle`] to a node, usable in PCS triples.
    pub fn handle(&self, id: NodeId) -> Handle<'_, L> {
        Handle {
            id,
            data: self.data(id),
        }
    }

    /// Ordered children of a node, as arena ids.
    pub fn children_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Number of children of a node.
    pub fn child_count(&self, id: NodeId) -> usize {
        id.children(&self.arena).count()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.count()
    }
}

impl<'t, L: Eq + Hash> MergeTree for &'t Tree<L> {
    type Node = Handle<'t, L>;

    fn root(&self) -> Handle<'t, L> {
        let tree: &'t Tree<L> = *self;
        tree.handle(tree.root)
    }

    fn children(&self, node: &Handle<'t, L>) -> impl Iterator<Item = Handle<'t, L>> + '_ {
        let tree: &'t Tree<L> = *self;
        node.id.children(&tree.arena).map(move |id| tree.handle(id))
    }

    fn pre_order(&self) -> impl Iterator<Item = Handle<'t, L>> + '_ {
        let tree: &'t Tree<L> = *self;
        tree.root
            .descendants(&tree.arena)
            .map(move |id| tree.handle(id))
    }
}

/// A cheap, copyable handle to a node in a [`Tree`].
///
/// Value equality and hashing delegate to the node's label; identity is the
/// node's stable id ([`NodeData::id`]), so handles from two versions of a
/// tree refer to the same node exactly when the versions agree on the id.
pub struct Handle<'t, L> {
    id: NodeId,
    data: &'t NodeData<L>,
}

impl<L> Handle<'_, L> {
    /// The node's stable identity.
    pub fn id(&self) -> u64 {
        self.data.id
    }

    /// The node's label.
    pub fn label(&self) -> &L {
        &self.data.label
    }
}

impl<L> Clone for Handle<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Handle<'_, L> {}

impl<L: PartialEq> PartialEq for Handle<'_, L> {
    fn eq(&self, other: &Self) -> bool {
        self.data.label == other.data.label
    }
}

impl<L: Eq> Eq for Handle<'_, L> {}

impl<L: Hash> Hash for Handle<'_, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.label.hash(state);
    }
}

impl<L: Eq + Hash> MergeNode for Handle<'_, L> {
    fn same_node(&self, other: &Self) -> bool {
        self.data.id == other.data.id
    }
}

impl<L: fmt::Display> fmt::Display for Handle<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.label)
    }
}

impl<L: fmt::Debug> fmt::Debug for Handle<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}@{}", self.data.id, self.data.label, usize::from(self.id))
    }
}
