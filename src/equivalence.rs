//! Equivalence engine: sentinel-aware comparisons between two backends
//!
//! Stateless free functions used by the dual nodes (and usable by a harness
//! directly) to decide whether two backend results are to be treated as
//! equal. Three comparison modes:
//!
//! - [`assert_simple`] — loose equality of scalars and sequences; an
//!   unverified sentinel on either side passes unconditionally
//! - [`assert_simple_list`] — set-like containment, for result lists whose
//!   ordering cannot be guaranteed identical across backends
//! - [`assert_nodes_equal`] — strict-field equality of two node snapshots,
//!   dispatched on the first argument's variant
//!
//! Strict checks deliberately skip `enabled` and child lists: one backend
//! class cannot report enablement or pre-populate children, so those fields
//! never appear in [`NodeFacts`]. `dirty` and `filepath` are compared only
//! when both sides actually track files; an unverified `filepath` on either
//! side disables both checks, because dirtiness is meaningless without file
//! tracking.
//!
//! A violation is a hard error. It means one implementation's behavior
//! diverged from the other's given the same input, and the calling operation
//! must halt.

use crate::attr::Unverifiable;
use crate::error::{DualConfError, Result};
use crate::node::NodeFacts;
use std::fmt;

/// Loose equality: pass when either side holds the sentinel, otherwise the
/// values must be equal. `what` names the compared field in the error.
pub fn assert_simple<T>(what: &'static str, first: &T, second: &T) -> Result<()>
where
    T: PartialEq + fmt::Debug + Unverifiable,
{
    if first.holds_unverified() || second.holds_unverified() {
        return Ok(());
    }
    if first == second {
        Ok(())
    } else {
        Err(DualConfError::equivalence(what, first, second))
    }
}

/// Set-like equality: every element of `first` must be found by value in
/// `second`. Used when two backends cannot guarantee identical ordering of
/// their result lists. Sentinel on either side passes unconditionally.
pub fn assert_simple_list<T>(what: &'static str, first: &T, second: &T) -> Result<()>
where
    T: SequenceLike + fmt::Debug + Unverifiable,
{
    if first.holds_unverified() || second.holds_unverified() {
        return Ok(());
    }
    if first.is_subset_of(second) {
        Ok(())
    } else {
        Err(DualConfError::equivalence(what, first, second))
    }
}

/// Containment view over the sequence shapes `assert_simple_list` accepts.
pub trait SequenceLike {
    fn is_subset_of(&self, other: &Self) -> bool;
}

impl<T: PartialEq> SequenceLike for Vec<T> {
    fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|item| other.contains(item))
    }
}

impl<T: SequenceLike> SequenceLike for crate::attr::Attr<T> {
    fn is_subset_of(&self, other: &Self) -> bool {
        match (self.as_value(), other.as_value()) {
            (Some(first), Some(second)) => first.is_subset_of(second),
            // Sentinels are filtered out before this is consulted.
            _ => true,
        }
    }
}

/// Strict-field equality of two node snapshots.
///
/// Dispatches on `first`'s variant and requires `second` to match it, then
/// compares the variant-specific fields and the common `filepath`/`dirty`
/// pair, every comparison sentinel-aware.
pub fn assert_nodes_equal(first: &NodeFacts, second: &NodeFacts) -> Result<()> {
    match (first, second) {
        (
            NodeFacts::Comment { comment: a, .. },
            NodeFacts::Comment { comment: b, .. },
        ) => {
            assert_simple("comment", a, b)?;
        }
        (
            NodeFacts::Directive {
                name: a_name,
                parameters: a_params,
                ..
            },
            NodeFacts::Directive {
                name: b_name,
                parameters: b_params,
                ..
            },
        )
        | (
            NodeFacts::Block {
                name: a_name,
                parameters: a_params,
                ..
            },
            NodeFacts::Block {
                name: b_name,
                parameters: b_params,
                ..
            },
        ) => {
            assert_simple("name", a_name, b_name)?;
            assert_simple("parameters", a_params, b_params)?;
        }
        _ => {
            return Err(DualConfError::VariantMismatch {
                expected: first.kind(),
                found: second.kind(),
            });
        }
    }

    // Without file tracking on both sides, dirtiness cannot be trusted
    // either, so the unverified filepath gates both checks.
    if !first.filepath().holds_unverified() && !second.filepath().holds_unverified() {
        assert_simple("dirty", &first.dirty(), &second.dirty())?;
        assert_simple("filepath", first.filepath(), second.filepath())?;
    }
    Ok(())
}

/// Detects the unimplemented-search convention: a backend whose `find_*` has
/// not been migrated returns a single node whose identifying field is the
/// sentinel.
pub fn is_placeholder(facts: &NodeFacts) -> bool {
    match facts {
        NodeFacts::Comment { comment, .. } => comment.is_unverified(),
        NodeFacts::Directive { name, .. } | NodeFacts::Block { name, .. } => name.is_unverified(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::node::NodeKind;
    use std::path::PathBuf;

    fn directive_facts(
        name: &str,
        parameters: &[&str],
        filepath: Attr<PathBuf>,
        dirty: bool,
    ) -> NodeFacts {
        NodeFacts::Directive {
            filepath,
            dirty,
            name: Attr::Value(name.to_string()),
            parameters: Attr::Value(parameters.iter().map(|p| (*p).to_string()).collect()),
        }
    }

    #[test]
    fn simple_equality_passes_on_equal_values() {
        let a = Attr::Value("on".to_string());
        let b = Attr::Value("on".to_string());
        assert!(assert_simple("value", &a, &b).is_ok());
    }

    #[test]
    fn simple_equality_fails_on_real_divergence() {
        let a = Attr::Value("on".to_string());
        let b = Attr::Value("off".to_string());
        let err = assert_simple("value", &a, &b).unwrap_err();
        assert!(matches!(err, DualConfError::Equivalence { what: "value", .. }));
    }

    #[test]
    fn sentinel_on_either_side_passes() {
        let real = Attr::Value("on".to_string());
        let sentinel: Attr<String> = Attr::Unverified;
        assert!(assert_simple("value", &real, &sentinel).is_ok());
        assert!(assert_simple("value", &sentinel, &real).is_ok());
        assert!(assert_simple("value", &sentinel, &sentinel).is_ok());
    }

    #[test]
    fn list_equality_ignores_ordering() {
        let a = Attr::Value(vec!["a.conf".to_string(), "b.conf".to_string()]);
        let b = Attr::Value(vec!["b.conf".to_string(), "a.conf".to_string()]);
        assert!(assert_simple_list("files", &a, &b).is_ok());

        let missing = Attr::Value(vec!["a.conf".to_string()]);
        assert!(assert_simple_list("files", &a, &missing).is_err());
        // Containment is one-way: first must be a subset of second.
        assert!(assert_simple_list("files", &missing, &a).is_ok());
    }

    #[test]
    fn strict_equality_passes_for_matching_directives() {
        let a = directive_facts("ServerName", &["example.org"], Attr::Unverified, true);
        let b = directive_facts("ServerName", &["example.org"], Attr::Unverified, false);
        // dirty differs but filepath is unverified, so the gate skips it
        assert!(assert_nodes_equal(&a, &b).is_ok());
    }

    #[test]
    fn strict_equality_compares_dirty_when_filepaths_are_real() {
        let path = Attr::Value(PathBuf::from("/etc/httpd/httpd.conf"));
        let a = directive_facts("ServerName", &["example.org"], path.clone(), true);
        let b = directive_facts("ServerName", &["example.org"], path, false);
        let err = assert_nodes_equal(&a, &b).unwrap_err();
        assert!(matches!(err, DualConfError::Equivalence { what: "dirty", .. }));
    }

    #[test]
    fn strict_equality_fails_on_name_divergence() {
        let a = directive_facts("ServerName", &[], Attr::Unverified, false);
        let b = directive_facts("ServerAlias", &[], Attr::Unverified, false);
        assert!(assert_nodes_equal(&a, &b).is_err());
    }

    #[test]
    fn variant_mismatch_is_detected() {
        let directive = directive_facts("ServerName", &[], Attr::Unverified, false);
        let comment = NodeFacts::Comment {
            filepath: Attr::Unverified,
            dirty: false,
            comment: Attr::Value("note".to_string()),
        };
        let err = assert_nodes_equal(&directive, &comment).unwrap_err();
        match err {
            DualConfError::VariantMismatch { expected, found } => {
                assert_eq!(expected, NodeKind::Directive);
                assert_eq!(found, NodeKind::Comment);
            }
            other => panic!("expected variant mismatch, got {other:?}"),
        }
    }

    #[test]
    fn placeholder_detection_keys_on_identifying_field() {
        let placeholder = NodeFacts::Block {
            filepath: Attr::Unverified,
            dirty: false,
            name: Attr::Unverified,
            parameters: Attr::Unverified,
        };
        assert!(is_placeholder(&placeholder));

        let real = directive_facts("ServerName", &[], Attr::Unverified, false);
        assert!(!is_placeholder(&real));
    }
}
