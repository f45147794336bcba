//! Dual nodes: run two backends side by side and verify every step
//!
//! A dual node holds exactly one `primary` and one `secondary` backend node
//! of the same logical variant. Every mutating or query operation is
//! executed against both, the two outputs go through the equivalence engine,
//! and the primary's values are what callers observe. Divergence surfaces
//! immediately as a hard error, which is the entire point: early detection
//! of implementation drift while migrating from one parsing backend to
//! another.
//!
//! Dual nodes are created only by wrapping a freshly produced pair of
//! backend nodes — `new` verifies the pair before wrapping, so a dual node
//! that exists is a pair that has already passed the strict check.
//!
//! # Search result pairing
//!
//! `find_*` results are paired index-by-index when both backends return the
//! same number of nodes. When lengths differ, one explanation is allowed: a
//! secondary backend whose search is unimplemented returns a single sentinel
//! placeholder, and every primary result is then paired with that
//! placeholder ("secondary can't run this query, trust primary"). Any other
//! length mismatch is a protocol violation and fails hard.

use crate::attr::Attr;
use crate::equivalence::{assert_nodes_equal, assert_simple, assert_simple_list, is_placeholder};
use crate::error::{DualConfError, Result};
use crate::node::{BlockNode, CommentNode, DirectiveNode, NodeId, ParserNode};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Capabilities common to every dual node variant: identifying the wrapped
/// pair so a parent dual block can forward `delete_child` to both backends.
pub trait DualNode {
    fn primary_id(&self) -> NodeId;
    fn secondary_id(&self) -> NodeId;

    /// True when the secondary side is a sentinel placeholder rather than a
    /// real node (the "trust primary" pairing outcome).
    fn secondary_is_placeholder(&self) -> bool;
}

// ============================================================================
// Comment
// ============================================================================

/// Dual implementation of the CommentNode contract.
#[derive(Debug, Clone)]
pub struct DualCommentNode<P: CommentNode, S: CommentNode> {
    primary: P,
    secondary: S,
}

impl<P: CommentNode, S: CommentNode> DualCommentNode<P, S> {
    /// Wraps a produced pair, verifying strict equality first.
    pub fn new(primary: P, secondary: S) -> Result<Self> {
        assert_nodes_equal(&primary.facts(), &secondary.facts())?;
        Ok(Self { primary, secondary })
    }

    pub fn comment(&self) -> Result<Attr<String>> {
        let first = self.primary.comment();
        assert_simple("comment", &first, &self.secondary.comment())?;
        Ok(first)
    }

    pub fn filepath(&self) -> Result<Attr<PathBuf>> {
        let first = self.primary.filepath();
        assert_simple("filepath", &first, &self.secondary.filepath())?;
        Ok(first)
    }

    pub fn dirty(&self) -> Result<bool> {
        let first = self.primary.dirty();
        assert_simple("dirty", &first, &self.secondary.dirty())?;
        Ok(first)
    }

    pub fn enabled(&self) -> Result<Attr<bool>> {
        let first = self.primary.enabled();
        assert_simple("enabled", &first, &self.secondary.enabled())?;
        Ok(first)
    }

    pub fn save(&mut self, message: &str) -> Result<()> {
        self.primary.save(message)?;
        self.secondary.save(message)
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

impl<P: CommentNode, S: CommentNode> DualNode for DualCommentNode<P, S> {
    fn primary_id(&self) -> NodeId {
        self.primary.id()
    }

    fn secondary_id(&self) -> NodeId {
        self.secondary.id()
    }

    fn secondary_is_placeholder(&self) -> bool {
        is_placeholder(&self.secondary.facts())
    }
}

// ============================================================================
// Directive
// ============================================================================

/// Dual implementation of the DirectiveNode contract.
#[derive(Debug, Clone)]
pub struct DualDirectiveNode<P: DirectiveNode, S: DirectiveNode> {
    primary: P,
    secondary: S,
}

impl<P: DirectiveNode, S: DirectiveNode> DualDirectiveNode<P, S> {
    /// Wraps a produced pair, verifying strict equality first.
    pub fn new(primary: P, secondary: S) -> Result<Self> {
        assert_nodes_equal(&primary.facts(), &secondary.facts())?;
        Ok(Self { primary, secondary })
    }

    pub fn name(&self) -> Result<Attr<String>> {
        let first = self.primary.name();
        assert_simple("name", &first, &self.secondary.name())?;
        Ok(first)
    }

    pub fn parameters(&self) -> Result<Attr<Vec<String>>> {
        let first = self.primary.parameters();
        assert_simple("parameters", &first, &self.secondary.parameters())?;
        Ok(first)
    }

    pub fn filepath(&self) -> Result<Attr<PathBuf>> {
        let first = self.primary.filepath();
        assert_simple("filepath", &first, &self.secondary.filepath())?;
        Ok(first)
    }

    pub fn dirty(&self) -> Result<bool> {
        let first = self.primary.dirty();
        assert_simple("dirty", &first, &self.secondary.dirty())?;
        Ok(first)
    }

    pub fn enabled(&self) -> Result<Attr<bool>> {
        let first = self.primary.enabled();
        assert_simple("enabled", &first, &self.secondary.enabled())?;
        Ok(first)
    }

    /// Sets the parameter sequence on both backends and verifies they agree
    /// on the result.
    pub fn set_parameters(&mut self, parameters: &[&str]) -> Result<()> {
        debug!("setting parameters on both backends: {:?}", parameters);
        self.primary.set_parameters(parameters)?;
        self.secondary.set_parameters(parameters)?;
        assert_nodes_equal(&self.primary.facts(), &self.secondary.facts())
    }

    pub fn save(&mut self, message: &str) -> Result<()> {
        self.primary.save(message)?;
        self.secondary.save(message)
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

impl<P: DirectiveNode, S: DirectiveNode> DualNode for DualDirectiveNode<P, S> {
    fn primary_id(&self) -> NodeId {
        self.primary.id()
    }

    fn secondary_id(&self) -> NodeId {
        self.secondary.id()
    }

    fn secondary_is_placeholder(&self) -> bool {
        is_placeholder(&self.secondary.facts())
    }
}

// ============================================================================
// Block
// ============================================================================

/// Dual implementation of the BlockNode contract.
#[derive(Debug, Clone)]
pub struct DualBlockNode<P: BlockNode, S: BlockNode> {
    primary: P,
    secondary: S,
}

impl<P: BlockNode, S: BlockNode> DualBlockNode<P, S> {
    /// Wraps a produced pair, verifying strict equality first.
    pub fn new(primary: P, secondary: S) -> Result<Self> {
        assert_nodes_equal(&primary.facts(), &secondary.facts())?;
        Ok(Self { primary, secondary })
    }

    pub fn name(&self) -> Result<Attr<String>> {
        let first = self.primary.name();
        assert_simple("name", &first, &self.secondary.name())?;
        Ok(first)
    }

    pub fn parameters(&self) -> Result<Attr<Vec<String>>> {
        let first = self.primary.parameters();
        assert_simple("parameters", &first, &self.secondary.parameters())?;
        Ok(first)
    }

    pub fn filepath(&self) -> Result<Attr<PathBuf>> {
        let first = self.primary.filepath();
        assert_simple("filepath", &first, &self.secondary.filepath())?;
        Ok(first)
    }

    pub fn dirty(&self) -> Result<bool> {
        let first = self.primary.dirty();
        assert_simple("dirty", &first, &self.secondary.dirty())?;
        Ok(first)
    }

    pub fn enabled(&self) -> Result<Attr<bool>> {
        let first = self.primary.enabled();
        assert_simple("enabled", &first, &self.secondary.enabled())?;
        Ok(first)
    }

    /// Child count as the primary reports it. Not verified: a secondary
    /// backend is not required to pre-populate its child sequence.
    pub fn child_count(&self) -> usize {
        self.primary.child_count()
    }

    /// Creates a child block on both backends and wraps the verified pair.
    pub fn add_child_block(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<DualBlockNode<P, S>> {
        debug!("add_child_block {} on both backends", name);
        let primary = self.primary.add_child_block(name, parameters, position)?;
        let secondary = self.secondary.add_child_block(name, parameters, position)?;
        DualBlockNode::new(primary, secondary)
    }

    /// Creates a child directive on both backends and wraps the verified pair.
    pub fn add_child_directive(
        &mut self,
        name: &str,
        parameters: &[&str],
        position: Option<usize>,
    ) -> Result<DualDirectiveNode<P::Directive, S::Directive>> {
        debug!("add_child_directive {} on both backends", name);
        let primary = self.primary.add_child_directive(name, parameters, position)?;
        let secondary = self.secondary.add_child_directive(name, parameters, position)?;
        DualDirectiveNode::new(primary, secondary)
    }

    /// Creates a child comment on both backends and wraps the verified pair.
    pub fn add_child_comment(
        &mut self,
        comment: &str,
        position: Option<usize>,
    ) -> Result<DualCommentNode<P::Comment, S::Comment>> {
        debug!("add_child_comment on both backends");
        let primary = self.primary.add_child_comment(comment, position)?;
        let secondary = self.secondary.add_child_comment(comment, position)?;
        DualCommentNode::new(primary, secondary)
    }

    /// Searches child blocks on both backends and pairs the results.
    pub fn find_blocks(&self, name: &str, exclude: bool) -> Result<Vec<DualBlockNode<P, S>>> {
        let primary = self.primary.find_blocks(name, exclude);
        let secondary = self.secondary.find_blocks(name, exclude);
        pair_results(primary, secondary, DualBlockNode::new)
    }

    /// Searches child directives on both backends and pairs the results.
    pub fn find_directives(
        &self,
        name: &str,
        exclude: bool,
    ) -> Result<Vec<DualDirectiveNode<P::Directive, S::Directive>>> {
        let primary = self.primary.find_directives(name, exclude);
        let secondary = self.secondary.find_directives(name, exclude);
        pair_results(primary, secondary, DualDirectiveNode::new)
    }

    /// Searches child comments on both backends and pairs the results.
    pub fn find_comments(
        &self,
        comment: &str,
        exact: bool,
    ) -> Result<Vec<DualCommentNode<P::Comment, S::Comment>>> {
        let primary = self.primary.find_comments(comment, exact);
        let secondary = self.secondary.find_comments(comment, exact);
        pair_results(primary, secondary, DualCommentNode::new)
    }

    /// Removes a child from both backends.
    ///
    /// When the child's secondary side is a sentinel placeholder there is
    /// nothing real to remove from the secondary tree, so only the primary
    /// is mutated.
    pub fn delete_child<D: DualNode>(&mut self, child: &D) -> Result<()> {
        self.primary.delete_child(child.primary_id())?;
        if child.secondary_is_placeholder() {
            trace!("secondary side is a placeholder, skipping delete");
            return Ok(());
        }
        self.secondary.delete_child(child.secondary_id())
    }

    /// Sets the parameter sequence on both backends and verifies they agree
    /// on the result.
    pub fn set_parameters(&mut self, parameters: &[&str]) -> Result<()> {
        debug!("setting parameters on both backends: {:?}", parameters);
        self.primary.set_parameters(parameters)?;
        self.secondary.set_parameters(parameters)?;
        assert_nodes_equal(&self.primary.facts(), &self.secondary.facts())
    }

    pub fn save(&mut self, message: &str) -> Result<()> {
        self.primary.save(message)?;
        self.secondary.save(message)
    }

    /// Unsaved file paths as the primary reports them, after a set-like
    /// comparison with the secondary (ordering across backends is not
    /// guaranteed).
    pub fn unsaved_files(&self) -> Result<Attr<Vec<PathBuf>>> {
        let first = self.primary.unsaved_files();
        assert_simple_list("unsaved_files", &first, &self.secondary.unsaved_files())?;
        Ok(first)
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

impl<P: BlockNode, S: BlockNode> DualNode for DualBlockNode<P, S> {
    fn primary_id(&self) -> NodeId {
        self.primary.id()
    }

    fn secondary_id(&self) -> NodeId {
        self.secondary.id()
    }

    fn secondary_is_placeholder(&self) -> bool {
        is_placeholder(&self.secondary.facts())
    }
}

// ============================================================================
// Search result pairing
// ============================================================================

/// Pairs the two backends' search results into dual nodes.
///
/// Equal lengths pair index-by-index; a length mismatch is accepted only
/// when the secondary's first element is a sentinel placeholder, in which
/// case every primary result is paired with a clone of that placeholder.
fn pair_results<N, M, D, F>(primary: Vec<N>, secondary: Vec<M>, wrap: F) -> Result<Vec<D>>
where
    N: ParserNode,
    M: ParserNode,
    F: Fn(N, M) -> Result<D>,
{
    if primary.len() == secondary.len() {
        return primary
            .into_iter()
            .zip(secondary)
            .map(|(first, second)| wrap(first, second))
            .collect();
    }

    match secondary.first() {
        Some(sentinel) if is_placeholder(&sentinel.facts()) => {
            trace!(
                "secondary search unimplemented, pairing {} primary result(s) with its placeholder",
                primary.len()
            );
            let sentinel = sentinel.clone();
            primary
                .into_iter()
                .map(|first| wrap(first, sentinel.clone()))
                .collect()
        }
        _ => Err(DualConfError::Protocol {
            primary_len: primary.len(),
            secondary_len: secondary.len(),
        }),
    }
}
