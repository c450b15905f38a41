//! # Petaurus
//!
//! PCS (parent-child-successor) triple encoding for three-way structural
//! tree merging.
//!
//! Named after *Petaurus breviceps* (the sugar glider), another resident of
//! gum trees.
//!
//! ## Algorithm Overview
//!
//! A rooted ordered tree decomposes into a set of PCS triples — one per
//! adjacent-sibling pair, plus sentinels marking first children, leaves, and
//! the tree root (the relational encoding of Lindholm's 3DM merge). Two
//! edited versions of a common ancestor can then be merged by set algebra
//! instead of an edit-script diff:
//!
//! - triples present in only one edited version are non-conflicting changes;
//! - triples that agree on two slots but differ on the third are structural
//!   conflicts: a reordered sibling ([`Pcs::divergent_successor`],
//!   [`Pcs::divergent_predecessor`]) or a reparented node
//!   ([`Pcs::divergent_root`]).
//!
//! This crate covers the triple entity, the tree-to-set codec, and the
//! conflict-classification queries. Resolving conflicts and reconstructing a
//! merged tree are the consuming merge driver's concern.
//!
//! ## Usage
//!
//! ```
//! use petaurus::{NodeData, PcsSet, Tree};
//!
//! let mut base: Tree<&'static str> = Tree::new(NodeData::new(0, "a"));
//! base.add_child(base.root, NodeData::new(1, "b"));
//! base.add_child(base.root, NodeData::new(2, "c"));
//!
//! let pcs = PcsSet::from_tree(&base);
//! assert_eq!(pcs.len(), 7); // C + N + 2
//! ```

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

pub use indextree;

mod tracing_macros;

mod pcs;
mod set;
/// Tree abstraction consumed by the encoder, plus an arena-backed tree.
pub mod tree;

pub use pcs::{Pcs, Slot, inspect_pair};
pub use set::{PcsSet, inspect};
pub use tree::{Handle, MergeNode, MergeTree, NodeData, Tree};
