//! Reference backend: an in-memory configuration tree
//!
//! This backend implements the Node Model the way a lens-driven editing
//! engine would expose it, while standing in for the engine itself. The tree
//! lives in memory: blocks own their children, every node keeps a weak
//! back-reference to its enclosing block, and handles (`LensBlockNode`,
//! `LensDirectiveNode`, `LensCommentNode`) are cheap clones sharing the same
//! underlying node.
//!
//! # Migration coverage
//!
//! A backend in the middle of a migration does not implement everything.
//! [`Coverage`] records which operation families have landed for a given
//! tree; operations outside the coverage produce sentinel results instead of
//! failing:
//!
//! - `search: false` — every `find_*` returns a one-element vec holding a
//!   sentinel placeholder of the requested variant
//! - `parameters: false` — `set_parameters` stores `Attr::Unverified`
//!
//! Independently of coverage, `filepath` and `unsaved_files` always report
//! `Attr::Unverified`: file tracking belongs to the editing engine, which is
//! an external collaborator here.

use crate::attr::Attr;
use crate::error::{DualConfError, Result};
use crate::node::{BlockNode, CommentNode, DirectiveNode, NodeFacts, NodeId, NodeKind, ParserNode};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use tracing::debug;

// ============================================================================
// Coverage
// ============================================================================

/// Which operation families this backend has migrated so far.
///
/// Inherited from the root by every node created under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// `find_blocks` / `find_directives` / `find_comments` are implemented.
    pub search: bool,
    /// `set_parameters` is implemented.
    pub parameters: bool,
}

impl Coverage {
    /// Every operation implemented for real.
    pub const fn full() -> Self {
        Self {
            search: true,
            parameters: true,
        }
    }

    /// Search has not been migrated yet; `find_*` returns placeholders.
    pub const fn pending_search() -> Self {
        Self {
            search: false,
            parameters: true,
        }
    }

    /// Parameter rewriting has not been migrated yet.
    pub const fn pending_parameters() -> Self {
        Self {
            search: true,
            parameters: false,
        }
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Self::full()
    }
}

// ============================================================================
// Tree storage
// ============================================================================

/// Fields common to every node variant.
#[derive(Debug)]
struct Shared {
    /// Weak back-reference to the enclosing block. Never an owner: the
    /// owner is the parent's child sequence.
    ancestor: Weak<RefCell<BlockData>>,
    filepath: Attr<PathBuf>,
    dirty: bool,
    enabled: Attr<bool>,
    coverage: Coverage,
}

impl Shared {
    fn child_of(parent: &Rc<RefCell<BlockData>>, coverage: Coverage) -> Self {
        Self {
            ancestor: Rc::downgrade(parent),
            // File tracking is the editing engine's concern; until that
            // integration lands, the path is unverified.
            filepath: Attr::Unverified,
            dirty: true,
            enabled: Attr::Value(true),
            coverage,
        }
    }
}

#[derive(Debug)]
struct CommentData {
    shared: Shared,
    comment: Attr<String>,
}

#[derive(Debug)]
struct DirectiveData {
    shared: Shared,
    name: Attr<String>,
    parameters: Attr<Vec<String>>,
}

#[derive(Debug)]
struct BlockData {
    shared: Shared,
    name: Attr<String>,
    parameters: Attr<Vec<String>>,
    children: Vec<LensChild>,
}

/// One entry in a block's child sequence.
#[derive(Debug, Clone)]
pub enum LensChild {
    Block(LensBlockNode),
    Directive(LensDirectiveNode),
    Comment(LensCommentNode),
}

impl LensChild {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Block(node) => node.id(),
            Self::Directive(node) => node.id(),
            Self::Comment(node) => node.id(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Block(_) => NodeKind::Block,
            Self::Directive(_) => NodeKind::Directive,
            Self::Comment(_) => NodeKind::Comment,
        }
    }
}

// ============================================================================
// Handles
// ============================================================================

/// Handle to a comment node.
#[derive(Debug, Clone)]
pub struct LensCommentNode {
    inner: Rc<RefCell<CommentData>>,
}

/// Handle to a directive node.
#[derive(Debug, Clone)]
pub struct LensDirectiveNode {
    inner: Rc<RefCell<DirectiveData>>,
}

/// Handle to a block node.
#[derive(Debug, Clone)]
pub struct LensBlockNode {
    inner: Rc<RefCell<BlockData>>,
}

fn to_params(parameters: &[&str]) -> Vec<String> {
    parameters.iter().map(|p| (*p).to_string()).collect()
}

/// Apache directive and block names are case-insensitive.
fn name_matches(stored: &Attr<String>, wanted: &str) -> bool {
    match stored.as_value() {
        Some(name) => name.eq_ignore_ascii_case(wanted),
        None => false,
    }
}

/// A node with unverified enablement is treated as enabled for search.
fn counts_as_enabled(enabled: &Attr<bool>) -> bool {
    !matches!(enabled, Attr::Value(false))
}

/// Marks the block and every ancestor of it as carrying unsaved changes.
fn mark_dirty_up(start: &Rc<RefCell<BlockData>>) {
    let mut current = Some(Rc::clone(start));
    while let Some(block) = current {
        let mut data = block.borrow_mut();
        data.shared.dirty = true;
        current = data.shared.ancestor.upgrade();
    }
}

/// Clears dirty flags for a whole subtree.
fn clear_dirty_down(block: &Rc<RefCell<BlockData>>) {
    let mut data = block.borrow_mut();
    data.shared.dirty = false;
    for child in &data.children {
        match child {
            LensChild::Block(node) => clear_dirty_down(&node.inner),
            LensChild::Directive(node) => node.inner.borrow_mut().shared.dirty = false,
            LensChild::Comment(node) => node.inner.borrow_mut().shared.dirty = false,
        }
    }
}

impl LensBlockNode {
    /// Creates the root block of a new tree with full migration coverage.
    pub fn root(name: &str, parameters: &[&str]) -> Self {
        Self::root_with_coverage(name, parameters, Coverage::full())
    }

    /// Creates a root whose tree simulates partial migration coverage.
    pub fn root_with_coverage(name: &str, parameters: &[&str], coverage: Coverage) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BlockData {
                shared: Shared {
                    ancestor: Weak::new(),
                    filepath: Attr::Unverified,
                    dirty: false,
                    enabled: Attr::Value(true),
                    coverage,
                },
                name: Attr::Value(name.to_string()),
                parameters: Attr::Value(to_params(parameters)),
                children: Vec::new(),
            })),
        }
    }

    /// Handle to the enclosing block, or `None` for the root.
    pub fn ancestor(&self) -> Option<LensBlockNode> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|inner| LensBlockNode { inner })
    }

    /// Snapshot of the child sequence, in file order.
    pub fn children(&self) -> Vec<LensChild> {
        self.inner.borrow().children.clone()
    }

    /// Overrides the enablement state. Stand-in for the editing engine's
    /// computed value (a block inside `<IfModule>` may be inactive).
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().shared.enabled = Attr::Value(enabled);
    }

    /// Marks enablement as not computable. Stand-in for the states the
    /// editing engine cannot resolve (e.g. a conditional block whose test
    /// depends on runtime server flags).
    pub fn clear_enabled(&self) {
        self.inner.borrow_mut().shared.enabled = Attr::Unverified;
    }

    fn coverage(&self) -> Coverage {
        self.inner.borrow().shared.coverage
    }

    fn insert_child(&self, child: LensChild, position: Option<usize>) {
        let mut data = self.inner.borrow_mut();
        let len = data.children.len();
        let at = position.unwrap_or(len).min(len);
        data.children.insert(at, child);
    }

    /// Sentinel block the search convention hands out while `find_*` is
    /// unimplemented.
    fn placeholder_block(&self) -> LensBlockNode {
        LensBlockNode {
            inner: Rc::new(RefCell::new(BlockData {
                shared: self.placeholder_shared(),
                name: Attr::Unverified,
                parameters: Attr::Unverified,
                children: Vec::new(),
            })),
        }
    }

    fn placeholder_directive(&self) -> LensDirectiveNode {
        LensDirectiveNode {
            inner: Rc::new(RefCell::new(DirectiveData {
                shared: self.placeholder_shared(),
                name: Attr::Unverified,
                parameters: Attr::Unverified,
            })),
        }
    }

    fn placeholder_comment(&self) -> LensCommentNode {
        LensCommentNode {
            inner: Rc::new(RefCell::new(CommentData {
                shared: self.placeholder_shared(),
                comment: Attr::Unverified,
            })),
        }
    }

    fn placeholder_shared(&self) -> Shared {
        Shared {
            ancestor: Rc::downgrade(&self.inner),
            filepath: Attr::Unverified,
            dirty: false,
            enabled: Attr::Unverified,
            coverage: self.coverage(),
        }
    }
}

impl LensDirectiveNode {
    pub fn ancestor(&self) -> Option<LensBlockNode> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|inner| LensBlockNode { inner })
    }

    /// See [`LensBlockNode::set_enabled`].
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().shared.enabled = Attr::Value(enabled);
    }

    /// See [`LensBlockNode::clear_enabled`].
    pub fn clear_enabled(&self) {
        self.inner.borrow_mut().shared.enabled = Attr::Unverified;
    }
}

impl LensCommentNode {
    pub fn ancestor(&self) -> Option<LensBlockNode> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|inner| LensBlockNode { inner })
    }

    /// See [`LensBlockNode::set_enabled`].
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().shared.enabled = Attr::Value(enabled);
    }

    /// See [`LensBlockNode::clear_enabled`].
    pub fn clear_enabled(&self) {
        self.inner.borrow_mut().shared.enabled = Attr::Unverified;
    }
}

// ============================================================================
// Node Model implementation
// ============================================================================

impl ParserNode for LensCommentNode {
    fn id(&self) -> NodeId {
        NodeId::from_raw(Rc::as_ptr(&self.inner) as usize)
    }

    fn ancestor_id(&self) -> Option<NodeId> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|rc| NodeId::from_raw(Rc::as_ptr(&rc) as usize))
    }

    fn filepath(&self) -> Attr<PathBuf> {
        self.inner.borrow().shared.filepath.clone()
    }

    fn dirty(&self) -> bool {
        self.inner.borrow().shared.dirty
    }

    fn enabled(&self) -> Attr<bool> {
        self.inner.borrow().shared.enabled.clone()
    }

    fn save(&mut self, message: &str) -> Result<()> {
        debug!("saving comment node: {}", message);
        self.inner.borrow_mut().shared.dirty = false;
        Ok(())
    }

    fn facts(&self) -> NodeFacts {
        let data = self.inner.borrow();
        NodeFacts::Comment {
            filepath: data.shared.filepath.clone(),
            dirty: data.shared.dirty,
            comment: data.comment.clone(),
        }
    }
}

impl CommentNode for LensCommentNode {
    fn comment(&self) -> Attr<String> {
        self.inner.borrow().comment.clone()
    }
}

impl ParserNode for LensDirectiveNode {
    fn id(&self) -> NodeId {
        NodeId::from_raw(Rc::as_ptr(&self.inner) as usize)
    }

    fn ancestor_id(&self) -> Option<NodeId> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|rc| NodeId::from_raw(Rc::as_ptr(&rc) as usize))
    }

    fn filepath(&self) -> Attr<PathBuf> {
        self.inner.borrow().shared.filepath.clone()
    }

    fn dirty(&self) -> bool {
        self.inner.borrow().shared.dirty
    }

    fn enabled(&self) -> Attr<bool> {
        self.inner.borrow().shared.enabled.clone()
    }

    fn save(&mut self, message: &str) -> Result<()> {
        debug!("saving directive node: {}", message);
        self.inner.borrow_mut().shared.dirty = false;
        Ok(())
    }

    fn facts(&self) -> NodeFacts {
        let data = self.inner.borrow();
        NodeFacts::Directive {
            filepath: data.shared.filepath.clone(),
            dirty: data.shared.dirty,
            name: data.name.clone(),
            parameters: data.parameters.clone(),
        }
    }
}

impl DirectiveNode for LensDirectiveNode {
    fn name(&self) -> Attr<String> {
        self.inner.borrow().name.clone()
    }

    fn parameters(&self) -> Attr<Vec<String>> {
        self.inner.borrow().parameters.clone()
    }

    fn set_parameters(&mut self, parameters: &[&str]) -> Result<()> {
        let covered = {
            let mut data = self.inner.borrow_mut();
            let covered = data.shared.coverage.parameters;
            data.parameters = if covered {
                Attr::Value(to_params(parameters))
            } else {
                Attr::Unverified
            };
            data.shared.dirty = true;
            covered
        };
        if !covered {
            debug!("set_parameters not migrated yet, storing sentinel");
        }
        if let Some(ancestor) = self.inner.borrow().shared.ancestor.upgrade() {
            mark_dirty_up(&ancestor);
        }
        Ok(())
    }
}

impl ParserNode for LensBlockNode {
    fn id(&self) -> NodeId {
        NodeId::from_raw(Rc::as_ptr(&self.inner) as usize)
    }

    fn ancestor_id(&self) -> Option<NodeId> {
        self.inner
            .borrow()
            .shared
            .ancestor
            .upgrade()
            .map(|rc| NodeId::from_raw(Rc::as_ptr(&rc) as usize))
    }

    fn filepath(&self) -> Attr<PathBuf> {
        self.inner.borrow().shared.filepath.clone()
    }

    fn dirty(&self) -> bool {
        self.inner.borrow().shared.dirty
    }

    fn enabled(&self) -> Attr<bool> {
        self.inner.borrow().shared.enabled.clone()
    }

    fn save(&mut self, message: &str) -> Result<()> {
        debug!("saving block subtree: {}", message);
        clear_dirty_down(&self.inner);
        Ok(())
    }

    fn facts(&self) -> NodeFacts {
        let data = self.inner.borrow();
        NodeFacts::Block {
            filepath: data.shared.filepath.clone(),
            dirty: data.shared.dirty,
            name: data.name.clone(),
            parameters: data.parameters.clone(),
        }
    }
}

impl DirectiveNode for LensBlockNode {
    fn name(&self) -> Attr<String> {
        self.inner.borrow().name.clone()
    }

    fn parameters(&self) -> Attr<Vec<String>> {
        self.inner.borrow().parameters.clone()
    }

    fn set_parameters(&mut self, parameters: &[&str]) -> Result<()> {
        {
            let mut data = self.inner.borrow_mut();
            data.parameters = if data.shared.coverage.parameters {
                Attr::Value(to_params(parameters))
            } else {
                Attr::Unverified
            };
        }
        mark_dirty_up(&self.inner);
        Ok(())
    }
}

impl BlockNode for LensBlockNode {
    type Comment = LensCommentNode;
    type Directive = LensDirectiveNode;

    fn add_child_block(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<Self> {
        debug!("adding child block {} at {:?}", name, position);
        let child = LensBlockNode {
            inner: Rc::new(RefCell::new(BlockData {
                shared: Shared::child_of(&self.inner, self.coverage()),
                name: Attr::Value(name.to_string()),
                parameters: Attr::Value(to_params(parameters)),
                children: Vec::new(),
            })),
        };
        self.insert_child(LensChild::Block(child.clone()), position);
        mark_dirty_up(&self.inner);
        Ok(child)
    }

    fn add_child_directive(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<Self::Directive> {
        debug!("adding child directive {} at {:?}", name, position);
        let child = LensDirectiveNode {
            inner: Rc::new(RefCell::new(DirectiveData {
                shared: Shared::child_of(&self.inner, self.coverage()),
                name: Attr::Value(name.to_string()),
                parameters: Attr::Value(to_params(parameters)),
            })),
        };
        self.insert_child(LensChild::Directive(child.clone()), position);
        mark_dirty_up(&self.inner);
        Ok(child)
    }

    fn add_child_comment(&mut self, comment: &str, position: Option<usize>) -> Result<Self::Comment> {
        debug!("adding child comment at {:?}", position);
        let child = LensCommentNode {
            inner: Rc::new(RefCell::new(CommentData {
                shared: Shared::child_of(&self.inner, self.coverage()),
                comment: Attr::Value(comment.to_string()),
            })),
        };
        self.insert_child(LensChild::Comment(child.clone()), position);
        mark_dirty_up(&self.inner);
        Ok(child)
    }

    fn find_blocks(&self, name: &str, exclude: bool) -> Vec<Self> {
        if !self.coverage().search {
            return vec![self.placeholder_block()];
        }
        let data = self.inner.borrow();
        data.children
            .iter()
            .filter_map(|child| match child {
                LensChild::Block(block) => Some(block),
                _ => None,
            })
            .filter(|block| {
                let child = block.inner.borrow();
                name_matches(&child.name, name)
                    && (!exclude || counts_as_enabled(&child.shared.enabled))
            })
            .cloned()
            .collect()
    }

    fn find_directives(&self, name: &str, exclude: bool) -> Vec<Self::Directive> {
        if !self.coverage().search {
            return vec![self.placeholder_directive()];
        }
        let data = self.inner.borrow();
        data.children
            .iter()
            .filter_map(|child| match child {
                LensChild::Directive(directive) => Some(directive),
                _ => None,
            })
            .filter(|directive| {
                let child = directive.inner.borrow();
                name_matches(&child.name, name)
                    && (!exclude || counts_as_enabled(&child.shared.enabled))
            })
            .cloned()
            .collect()
    }

    fn find_comments(&self, comment: &str, exact: bool) -> Vec<Self::Comment> {
        if !self.coverage().search {
            return vec![self.placeholder_comment()];
        }
        let data = self.inner.borrow();
        data.children
            .iter()
            .filter_map(|child| match child {
                LensChild::Comment(node) => Some(node),
                _ => None,
            })
            .filter(|node| match node.inner.borrow().comment.as_value() {
                Some(text) if exact => text == comment,
                Some(text) => text.contains(comment),
                None => false,
            })
            .cloned()
            .collect()
    }

    fn delete_child(&mut self, child: NodeId) -> Result<()> {
        {
            let mut data = self.inner.borrow_mut();
            let before = data.children.len();
            data.children.retain(|entry| entry.id() != child);
            if data.children.len() == before {
                return Err(DualConfError::UnknownChild(child));
            }
        }
        debug!("deleted child {:?}", child);
        mark_dirty_up(&self.inner);
        Ok(())
    }

    fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    fn unsaved_files(&self) -> Attr<Vec<PathBuf>> {
        // File tracking lives in the editing engine; unverified until the
        // integration lands.
        Attr::Unverified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> LensBlockNode {
        LensBlockNode::root("root", &[])
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = root();
        root.add_child_directive("ServerName", &["example.org"], None)
            .unwrap();
        root.add_child_comment("managed by dualconf", None).unwrap();
        root.add_child_block("VirtualHost", &["*:80"], None).unwrap();

        let kinds: Vec<NodeKind> = root.children().iter().map(LensChild::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Directive, NodeKind::Comment, NodeKind::Block]
        );
    }

    #[test]
    fn position_inserts_at_index_and_clamps() {
        let mut root = root();
        root.add_child_directive("Listen", &["80"], None).unwrap();
        root.add_child_directive("Listen", &["443"], None).unwrap();
        let first = root
            .add_child_directive("ServerRoot", &["/etc/httpd"], Some(0))
            .unwrap();
        let clamped = root
            .add_child_directive("Timeout", &["60"], Some(99))
            .unwrap();

        let children = root.children();
        assert_eq!(children[0].id(), first.id());
        assert_eq!(children[3].id(), clamped.id());
    }

    #[test]
    fn find_directives_matches_name_case_insensitively() {
        let mut root = root();
        root.add_child_directive("ServerName", &["example.org"], None)
            .unwrap();
        root.add_child_directive("Listen", &["80"], None).unwrap();

        let found = root.find_directives("servername", true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parameters(), Attr::Value(vec!["example.org".to_string()]));
    }

    #[test]
    fn find_excludes_disabled_nodes() {
        let mut root = root();
        let active = root.add_child_block("VirtualHost", &["*:80"], None).unwrap();
        let disabled = root
            .add_child_block("VirtualHost", &["*:443"], None)
            .unwrap();
        disabled.set_enabled(false);

        let found = root.find_blocks("VirtualHost", true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), active.id());

        let all = root.find_blocks("VirtualHost", false);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn find_exclude_keeps_nodes_with_unknown_enablement() {
        let mut root = root();
        root.add_child_directive("SSLEngine", &["on"], None).unwrap();
        let unknown = root.add_child_directive("SSLEngine", &["on"], None).unwrap();
        let disabled = root.add_child_directive("SSLEngine", &["off"], None).unwrap();
        unknown.clear_enabled();
        disabled.set_enabled(false);

        // Only a known-disabled node is excluded; unknown enablement is
        // treated as enabled.
        let found = root.find_directives("SSLEngine", true);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.id() != disabled.id()));
        assert!(found.iter().any(|d| d.id() == unknown.id()));

        assert_eq!(root.find_directives("SSLEngine", false).len(), 3);
    }

    #[test]
    fn find_comments_exact_and_substring() {
        let mut root = root();
        root.add_child_comment("managed by dualconf", None).unwrap();
        root.add_child_comment("unmanaged", None).unwrap();

        assert_eq!(root.find_comments("managed", false).len(), 2);
        assert_eq!(root.find_comments("managed by dualconf", true).len(), 1);
        assert!(root.find_comments("managed", true).is_empty());
    }

    #[test]
    fn pending_search_returns_single_placeholder() {
        let mut root =
            LensBlockNode::root_with_coverage("root", &[], Coverage::pending_search());
        root.add_child_block("VirtualHost", &["*:80"], None).unwrap();

        let found = root.find_blocks("VirtualHost", true);
        assert_eq!(found.len(), 1);
        assert!(found[0].name().is_unverified());

        let comments = root.find_comments("anything", false);
        assert_eq!(comments.len(), 1);
        assert!(comments[0].comment().is_unverified());
    }

    #[test]
    fn pending_parameters_stores_sentinel() {
        let mut root =
            LensBlockNode::root_with_coverage("root", &[], Coverage::pending_parameters());
        let mut directive = root
            .add_child_directive("SSLEngine", &["off"], None)
            .unwrap();
        directive.set_parameters(&["on"]).unwrap();
        assert!(directive.parameters().is_unverified());
    }

    #[test]
    fn delete_child_removes_exactly_one() {
        let mut root = root();
        let keep = root.add_child_directive("Listen", &["80"], None).unwrap();
        let drop = root.add_child_directive("Listen", &["443"], None).unwrap();

        root.delete_child(drop.id()).unwrap();
        let children = root.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), keep.id());

        let err = root.delete_child(drop.id()).unwrap_err();
        assert!(matches!(err, DualConfError::UnknownChild(_)));
    }

    #[test]
    fn mutations_mark_ancestors_dirty_and_save_clears() {
        let mut root = root();
        let mut vhost = root.add_child_block("VirtualHost", &["*:80"], None).unwrap();
        vhost
            .add_child_directive("ServerName", &["example.org"], None)
            .unwrap();

        assert!(root.dirty());
        assert!(vhost.dirty());

        root.save("enable example.org").unwrap();
        assert!(!root.dirty());
        assert!(!vhost.dirty());
    }

    #[test]
    fn ancestor_links_point_to_enclosing_block() {
        let mut root = root();
        let vhost = root.add_child_block("VirtualHost", &["*:80"], None).unwrap();
        assert_eq!(vhost.ancestor().unwrap().id(), root.id());
        assert_eq!(vhost.ancestor_id(), Some(root.id()));
        assert!(root.ancestor().is_none());
        assert!(root.ancestor_id().is_none());
    }

    #[test]
    fn filepath_and_unsaved_files_are_unverified() {
        let root = root();
        assert!(root.filepath().is_unverified());
        assert!(root.unsaved_files().is_unverified());
    }
}
