//! Sentinel-aware attribute values
//!
//! During a parser backend migration, a backend may not have implemented a
//! field or operation yet. Instead of inventing a magic string that could
//! collide with real configuration text, every such value is an [`Attr`]:
//! either a real value or the `Unverified` sentinel. Any comparison where
//! either side holds the sentinel passes unconditionally, so an unfinished
//! capability never shows up as a false divergence.

use std::fmt;
use std::path::PathBuf;

/// Rendered form of the sentinel, used for display and logging only.
/// Never stored as data; the sentinel is the `Attr::Unverified` variant.
pub const UNVERIFIED_MARKER: &str = "<UNVERIFIED>";

/// An attribute value that a backend either produced for real or has not
/// implemented yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attr<T> {
    /// A real value produced by the backend.
    Value(T),
    /// The backend has not implemented this field or operation yet.
    /// Compares as a universal pass.
    Unverified,
}

impl<T> Attr<T> {
    /// Returns the contained value, or `None` for the sentinel.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unverified => None,
        }
    }

    /// True when this attribute is the sentinel itself. For the deep
    /// containment rule (sentinel inside a sequence), see [`Unverifiable`].
    pub fn is_unverified(&self) -> bool {
        matches!(self, Self::Unverified)
    }

    /// Maps the contained value, leaving the sentinel untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Self::Value(value) => Attr::Value(f(value)),
            Self::Unverified => Attr::Unverified,
        }
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Unverified => f.write_str(UNVERIFIED_MARKER),
        }
    }
}

/// Detection rule for the sentinel: a value "holds" it if the value is the
/// sentinel itself, or is a sequence containing an element that holds it.
/// The equivalence engine applies this rule everywhere two values meet,
/// including inside values returned from mutating calls.
pub trait Unverifiable {
    fn holds_unverified(&self) -> bool;
}

impl<T: Unverifiable> Unverifiable for Attr<T> {
    fn holds_unverified(&self) -> bool {
        match self {
            Self::Value(value) => value.holds_unverified(),
            Self::Unverified => true,
        }
    }
}

impl<T: Unverifiable> Unverifiable for Vec<T> {
    fn holds_unverified(&self) -> bool {
        self.iter().any(Unverifiable::holds_unverified)
    }
}

impl<T: Unverifiable + ?Sized> Unverifiable for &T {
    fn holds_unverified(&self) -> bool {
        (**self).holds_unverified()
    }
}

// Plain scalars can never be the sentinel; only an `Attr` wrapper can.
macro_rules! never_unverified {
    ($($ty:ty),* $(,)?) => {
        $(impl Unverifiable for $ty {
            fn holds_unverified(&self) -> bool {
                false
            }
        })*
    };
}

never_unverified!(bool, usize, u64, i64, String, str, PathBuf);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_attr_is_not_unverified() {
        let attr = Attr::Value("ServerName".to_string());
        assert!(!attr.is_unverified());
        assert!(!attr.holds_unverified());
        assert_eq!(attr.as_value(), Some(&"ServerName".to_string()));
    }

    #[test]
    fn sentinel_attr_holds_unverified() {
        let attr: Attr<String> = Attr::Unverified;
        assert!(attr.is_unverified());
        assert!(attr.holds_unverified());
        assert_eq!(attr.as_value(), None);
    }

    #[test]
    fn sequence_containing_sentinel_holds_unverified() {
        let params: Vec<Attr<String>> =
            vec![Attr::Value("on".to_string()), Attr::Unverified];
        assert!(params.holds_unverified());

        let clean: Vec<Attr<String>> = vec![Attr::Value("on".to_string())];
        assert!(!clean.holds_unverified());
    }

    #[test]
    fn plain_string_sequence_never_holds_unverified() {
        let params = Attr::Value(vec!["ssl".to_string(), "on".to_string()]);
        assert!(!params.holds_unverified());
    }

    #[test]
    fn display_renders_marker_for_sentinel() {
        let attr: Attr<String> = Attr::Unverified;
        assert_eq!(attr.to_string(), UNVERIFIED_MARKER);
        assert_eq!(Attr::Value("mod_ssl".to_string()).to_string(), "mod_ssl");
    }

    #[test]
    fn map_preserves_sentinel() {
        let attr: Attr<usize> = Attr::Unverified;
        assert!(attr.map(|n| n + 1).is_unverified());
        assert_eq!(Attr::Value(1usize).map(|n| n + 1), Attr::Value(2));
    }
}
