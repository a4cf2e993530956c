//! Feature flag markers and change-request override blocks
//!
//! A marker is a `Feature-Flag: <name>` annotation anywhere in the text.
//! The label is matched case-insensitively; the name is one or more word
//! characters and is kept exactly as written.
//!
//! An override block is the region between `BEGIN_COMMIT_OVERRIDE` and the
//! next `END_COMMIT_OVERRIDE` in a change-request body. When present and
//! non-empty it replaces the commit message for flag evaluation.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for a feature flag marker
const MARKER_REGEX: &str = r"(?i)feature-flag:[ \t]*(\w+)";

pub const OVERRIDE_BEGIN: &str = "BEGIN_COMMIT_OVERRIDE";
pub const OVERRIDE_END: &str = "END_COMMIT_OVERRIDE";

// A pattern that fails to compile means no text carries a marker.
static MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(MARKER_REGEX).ok());

/// A `Feature-Flag: <name>` annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureMarker(String);

impl FeatureMarker {
    /// Find the first marker in the given text
    ///
    /// # Returns
    ///
    /// None if the text has no marker, or the label is not followed by a name
    pub fn find(text: &str) -> Option<Self> {
        let captures = MARKER.as_ref()?.captures(text)?;
        captures
            .get(1)
            .map(|name| FeatureMarker(name.as_str().to_string()))
    }

    pub fn flag(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the override block from a change-request body
///
/// Takes the first `BEGIN_COMMIT_OVERRIDE` and the first
/// `END_COMMIT_OVERRIDE` after it. The block is trimmed; a blank block or a
/// missing delimiter yields None.
pub fn override_block(text: &str) -> Option<&str> {
    let (_, after_begin) = text.split_once(OVERRIDE_BEGIN)?;
    let (block, _) = after_begin.split_once(OVERRIDE_END)?;
    let block = block.trim();

    if block.is_empty() { None } else { Some(block) }
}
