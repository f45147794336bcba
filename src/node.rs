//! Node Model: the contract every configuration-tree backend must satisfy
//!
//! A configuration file in Apache-style syntax is a tree of three node
//! variants: blocks (`<VirtualHost ...>...</VirtualHost>`), directives
//! (`ServerName example.org`) and comments. This module defines the trait
//! family a backend implements, plus the supporting types the equivalence
//! engine compares:
//!
//! - [`ParserNode`] / [`CommentNode`] / [`DirectiveNode`] / [`BlockNode`] —
//!   the capability set, no logic of its own
//! - [`NodeKind`] — the variant tag
//! - [`NodeId`] — a non-owning handle identifying one backend node
//! - [`NodeFacts`] — an owned snapshot of a node's comparable fields
//!
//! Backends own their `children` sequences exclusively; the ancestor link is
//! always a non-owning back-reference, never a second owner.

use crate::attr::Attr;
use crate::error::Result;
use std::path::PathBuf;
use strum::{Display, EnumIter, EnumString};

/// The three node variants of the configuration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    Block,
    Directive,
    Comment,
}

/// Non-owning handle identifying a single backend node.
///
/// Used for the ancestor back-reference and for `delete_child`, so that a
/// child can be matched against a block's children without handing out a
/// second owner of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Builds an id from a backend-specific address or index.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// Owned snapshot of the fields the equivalence engine is allowed to compare.
///
/// `enabled` and the child list are deliberately absent: one backend class
/// cannot reliably report enablement or pre-populate children, so comparing
/// them is an explicit non-goal, not an oversight.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeFacts {
    Comment {
        filepath: Attr<PathBuf>,
        dirty: bool,
        comment: Attr<String>,
    },
    Directive {
        filepath: Attr<PathBuf>,
        dirty: bool,
        name: Attr<String>,
        parameters: Attr<Vec<String>>,
    },
    Block {
        filepath: Attr<PathBuf>,
        dirty: bool,
        name: Attr<String>,
        parameters: Attr<Vec<String>>,
    },
}

impl NodeFacts {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Comment { .. } => NodeKind::Comment,
            Self::Directive { .. } => NodeKind::Directive,
            Self::Block { .. } => NodeKind::Block,
        }
    }

    pub fn filepath(&self) -> &Attr<PathBuf> {
        match self {
            Self::Comment { filepath, .. }
            | Self::Directive { filepath, .. }
            | Self::Block { filepath, .. } => filepath,
        }
    }

    pub fn dirty(&self) -> bool {
        match self {
            Self::Comment { dirty, .. }
            | Self::Directive { dirty, .. }
            | Self::Block { dirty, .. } => *dirty,
        }
    }
}

/// Capabilities shared by every node variant.
///
/// Handles are cheap to clone; cloning a node handle never copies the
/// underlying tree.
pub trait ParserNode: Clone {
    /// Identity of this node within its backend.
    fn id(&self) -> NodeId;

    /// Identity of the enclosing block, or `None` for the root.
    fn ancestor_id(&self) -> Option<NodeId>;

    /// Source file the node was parsed from. Immutable once set; a backend
    /// that has not wired up file tracking yet reports `Attr::Unverified`.
    fn filepath(&self) -> Attr<PathBuf>;

    /// True if this node (or a descendant) carries unsaved mutations.
    fn dirty(&self) -> bool;

    /// Whether the node sits in an active (non-commented-out) context.
    /// `Attr::Unverified` means the backend cannot compute enablement.
    fn enabled(&self) -> Attr<bool>;

    /// Persist pending changes. Actual file I/O belongs to the editing
    /// engine behind the backend; this clears the dirty state.
    fn save(&mut self, message: &str) -> Result<()>;

    /// Snapshot of the comparable fields, for the equivalence engine.
    fn facts(&self) -> NodeFacts;

    fn kind(&self) -> NodeKind {
        self.facts().kind()
    }
}

/// A comment node: free-form text with no configuration meaning.
pub trait CommentNode: ParserNode {
    fn comment(&self) -> Attr<String>;
}

/// A directive node: a name plus an ordered parameter sequence.
pub trait DirectiveNode: ParserNode {
    fn name(&self) -> Attr<String>;

    /// Parameters in file order.
    fn parameters(&self) -> Attr<Vec<String>>;

    /// Replaces the parameter sequence.
    fn set_parameters(&mut self, parameters: &[&str]) -> Result<()>;
}

/// A block node: a named directive that owns an ordered, mixed-variant child
/// sequence. Child order is semantically meaningful; it reflects file order.
pub trait BlockNode: DirectiveNode {
    type Comment: CommentNode;
    type Directive: DirectiveNode;

    /// Creates a child block. `position` is the index in `children` to
    /// insert at; `None` appends. The tie-break policy must be identical
    /// between any two backends being compared.
    fn add_child_block(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<Self>;

    fn add_child_directive(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<Self::Directive>;

    fn add_child_comment(&mut self, comment: &str, position: Option<usize>) -> Result<Self::Comment>;

    /// Finds child blocks by name. `exclude` omits disabled nodes.
    ///
    /// A backend that has not implemented a `find_*` operation yet must
    /// return a one-element sequence holding a sentinel placeholder of the
    /// requested variant; the equivalence engine special-cases that shape.
    fn find_blocks(&self, name: &str, exclude: bool) -> Vec<Self>;

    fn find_directives(&self, name: &str, exclude: bool) -> Vec<Self::Directive>;

    /// Finds child comments. `exact` requires the full text to match;
    /// otherwise substring containment is used.
    fn find_comments(&self, comment: &str, exact: bool) -> Vec<Self::Comment>;

    /// Removes the identified child from this block's child sequence.
    fn delete_child(&mut self, child: NodeId) -> Result<()>;

    fn child_count(&self) -> usize;

    /// Paths of files with pending changes under this tree.
    fn unsaved_files(&self) -> Attr<Vec<PathBuf>>;
}
