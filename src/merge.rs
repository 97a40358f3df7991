//! Merge options and key-path bookkeeping shared by object and sequence merges.
//!
//! Merging projects a raw mapping onto a typed tree:
//!
//! - Keys outside the fixed schema fail with [`PropsError::UnknownField`], or,
//!   in drop-unknown mode, are skipped and reported once each.
//! - Nested objects merge recursively and keep their identity.
//! - Sequences are replaced wholesale: old elements are discarded and every
//!   raw element is rebuilt from the element template.
//! - Scalars and enums are coerced or resolved, then assigned.
//!
//! Failures are not atomic: keys processed before the failing one stay applied.

use crate::error::PropsError;
use crate::settings::Settings;

type DropFn<'a> = Box<dyn FnMut(&str) + 'a>;

/// How a merge treats keys that are not part of the schema.
pub struct MergeOptions<'a> {
    drop_unknown: bool,
    on_drop: Option<DropFn<'a>>,
    path: Vec<String>,
}

impl<'a> MergeOptions<'a> {
    /// Unknown keys are an error.
    pub fn strict() -> Self {
        MergeOptions {
            drop_unknown: false,
            on_drop: None,
            path: Vec::new(),
        }
    }

    /// Unknown keys are skipped.
    pub fn drop_unknown() -> Self {
        MergeOptions {
            drop_unknown: true,
            ..MergeOptions::strict()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        if settings.drop_unknown {
            MergeOptions::drop_unknown()
        } else {
            MergeOptions::strict()
        }
    }

    /// Call `f` once for every dropped key.
    ///
    /// `f` receives the key's full dotted path from the merge root
    /// (`attribute.value.typo`, `blocks.1.typo`), not the bare key, so drops
    /// at different depths stay distinguishable. A key dropped at the root is
    /// passed as is.
    pub fn on_drop(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }

    pub fn drops_unknown(&self) -> bool {
        self.drop_unknown
    }

    /// Start paths at `prefix` instead of the root.
    pub(crate) fn at(mut self, prefix: &str) -> Self {
        self.path = prefix.split('.').map(str::to_string).collect();
        self
    }

    /// Dotted path of the node currently being merged.
    pub(crate) fn current(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }

    pub(crate) fn descend<T>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment.to_string());
        let out = f(self);
        self.path.pop();
        out
    }

    /// Handle a key the current object does not declare.
    pub(crate) fn unknown(&mut self, key: &str) -> Result<(), PropsError> {
        let dotted = join(&self.path.join("."), key);
        if !self.drop_unknown {
            return Err(PropsError::UnknownField(dotted));
        }
        tracing::debug!(key = %dotted, "dropping unknown config key");
        if let Some(f) = self.on_drop.as_mut() {
            f(&dotted);
        }
        Ok(())
    }
}

/// Append `segment` to a dotted path; an empty prefix is the root.
pub(crate) fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

impl Default for MergeOptions<'_> {
    fn default() -> Self {
        MergeOptions::strict()
    }
}

impl std::fmt::Debug for MergeOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeOptions")
            .field("drop_unknown", &self.drop_unknown)
            .field("on_drop", &self.on_drop.is_some())
            .field("path", &self.path)
            .finish()
    }
}
