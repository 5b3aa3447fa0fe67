use serde::{Deserialize, Serialize};

/// Default limit on nested blocks, loops and calls.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default limit on the size of ranges, sequences, lists, permutation sets
/// and the variation output.
pub const DEFAULT_MAX_ITEMS: usize = 100_000;

/// Tunable limits and resolution policy for a compile.
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes:
///
/// ```
/// use mtl::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(config.max_depth, 8);
/// assert_eq!(config.max_items, 100_000);
/// assert!(config.symbol_atoms);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum nesting of blocks and expressions while parsing, and of loops
    /// and calls while evaluating.
    pub max_depth:    usize,
    /// Largest number of items any single range, `sequence`, list or
    /// `permutations` result may hold, and the largest number of variations
    /// one compile may emit.
    pub max_items:    usize,
    /// Whether unbound identifiers in tuples and tile-group arguments stand
    /// for themselves (`(b, c, d)`, `pair(F)`) instead of failing.
    pub symbol_atoms: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_depth:    DEFAULT_MAX_DEPTH,
               max_items:    DEFAULT_MAX_ITEMS,
               symbol_atoms: true, }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON, filling omitted keys with defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Returns a copy with a different depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns a copy with a different size limit.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Returns a copy with symbol atoms enabled or disabled.
    #[must_use]
    pub const fn with_symbol_atoms(mut self, symbol_atoms: bool) -> Self {
        self.symbol_atoms = symbol_atoms;
        self
    }
}
