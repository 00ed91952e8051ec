//! Implementation identities and run configuration.
//!
//! Results in the combined document are attributed to an implementation by
//! the prefix of their `method` name. The two implementations are a closed
//! set; which prefix belongs to which is supplied here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CrosscheckError, Result};

/// One of the two implementations under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    A,
    B,
}

impl Implementation {
    /// The implementation on the other side of the comparison.
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Display name and method prefix of one implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationTag {
    /// Short name used in labels, e.g. `Rust`.
    pub name: String,
    /// Prefix of every `method` this implementation reports, e.g. `Rust_`.
    pub prefix: String,
}

impl ImplementationTag {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    /// Whether a result's method name belongs to this implementation.
    pub fn claims(&self, method: &str) -> bool {
        method.starts_with(&self.prefix)
    }
}

/// Both implementations plus the one treated as the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationSet {
    a: ImplementationTag,
    b: ImplementationTag,
    baseline: Implementation,
}

impl Default for ImplementationSet {
    fn default() -> Self {
        Self {
            a: ImplementationTag::new("Rust", "Rust_"),
            b: ImplementationTag::new("CPP", "CPP_"),
            baseline: Implementation::B,
        }
    }
}

impl ImplementationSet {
    /// Builds a set, rejecting prefixes that would attribute one result to
    /// both implementations.
    pub fn new(
        a: ImplementationTag,
        b: ImplementationTag,
        baseline: Implementation,
    ) -> Result<Self> {
        if a.prefix.is_empty() || b.prefix.is_empty() {
            return Err(CrosscheckError::Config(
                "implementation prefixes must not be empty".to_string(),
            ));
        }
        if a.prefix.starts_with(&b.prefix) || b.prefix.starts_with(&a.prefix) {
            return Err(CrosscheckError::Config(format!(
                "prefixes `{}` and `{}` overlap",
                a.prefix, b.prefix
            )));
        }
        Ok(Self { a, b, baseline })
    }

    pub const fn tag(&self, implementation: Implementation) -> &ImplementationTag {
        match implementation {
            Implementation::A => &self.a,
            Implementation::B => &self.b,
        }
    }

    pub fn prefix(&self, implementation: Implementation) -> &str {
        &self.tag(implementation).prefix
    }

    pub const fn baseline(&self) -> Implementation {
        self.baseline
    }

    /// The implementation being checked against the baseline.
    pub const fn subject(&self) -> Implementation {
        self.baseline.other()
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: Implementation) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub implementations: ImplementationsSection,
    pub baseline: Option<Implementation>,
}

/// `implementations` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImplementationsSection {
    pub a: Option<ImplementationTag>,
    pub b: Option<ImplementationTag>,
}

impl ConfigFile {
    /// Resolves the file against the defaults.
    pub fn into_implementations(self) -> Result<ImplementationSet> {
        let defaults = ImplementationSet::default();
        ImplementationSet::new(
            self.implementations.a.unwrap_or(defaults.a),
            self.implementations.b.unwrap_or(defaults.b),
            self.baseline.unwrap_or(defaults.baseline),
        )
    }
}

/// Parses implementation settings from YAML.
pub fn parse_config(content: &str) -> Result<ImplementationSet> {
    let file: ConfigFile = serde_yaml_ng::from_str(content)
        .map_err(|e| CrosscheckError::Config(e.to_string()))?;
    file.into_implementations()
}

/// Loads implementation settings from a YAML file.
pub fn load_config(path: &Path) -> Result<ImplementationSet> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CrosscheckError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_config(&content)
}
