//! dualconf
//!
//! A structural model for Apache-style configuration trees, paired with a
//! verification harness that runs two independent parser backends side by
//! side and checks them for behavioral equivalence. Clients operate on dual
//! nodes; every operation is executed against both backends and compared,
//! with an `Unverified` sentinel letting a partially migrated backend pass
//! checks it cannot answer yet.

pub mod attr;
pub mod dual;
pub mod equivalence;
pub mod error;
pub mod lens;
pub mod node;

// Re-export main types for convenience
pub use attr::{Attr, Unverifiable, UNVERIFIED_MARKER};
pub use dual::{DualBlockNode, DualCommentNode, DualDirectiveNode, DualNode};
pub use equivalence::{assert_nodes_equal, assert_simple, assert_simple_list, is_placeholder};
pub use error::{DualConfError, Result};
pub use lens::{Coverage, LensBlockNode, LensChild, LensCommentNode, LensDirectiveNode};
pub use node::{
    BlockNode, CommentNode, DirectiveNode, NodeFacts, NodeId, NodeKind, ParserNode,
};
