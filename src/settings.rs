//! Process-level knobs for compiling and merging, loaded through confique.
//!
//! Both knobs have compiled defaults, so [`Settings::default()`] never touches
//! the environment. [`Settings::from_env()`] layers the `TYPEDPROPS_*`
//! variables on top of those defaults.

use confique::Config;

use crate::error::PropsError;

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Convert assigned scalars to the declared kind instead of rejecting
    /// values of a different kind.
    #[config(default = true, env = "TYPEDPROPS_CONVERT")]
    pub convert: bool,

    /// Drop and report unknown keys during merge instead of failing.
    #[config(default = false, env = "TYPEDPROPS_DROP_UNKNOWN")]
    pub drop_unknown: bool,
}

impl Settings {
    /// Load settings from `TYPEDPROPS_CONVERT` and `TYPEDPROPS_DROP_UNKNOWN`,
    /// falling back to the compiled defaults.
    pub fn from_env() -> Result<Self, PropsError> {
        Ok(Settings::builder().env().load()?)
    }

    /// Settings with conversion disabled: scalars must already have the
    /// declared kind.
    pub fn strict_types() -> Self {
        Settings {
            convert: false,
            ..Settings::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            convert: true,
            drop_unknown: false,
        }
    }
}
