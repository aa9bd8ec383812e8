//! Registry of symbols known to be unpriceable by the market data source.

use crate::core::price::Symbol;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Bitpanda-ecosystem tokens Yahoo Finance does not list.
const BUILTIN_EXCLUSIONS: &[&str] = &["BEST", "PAN"];

/// Immutable set of symbols that are never sent to the network: a built-in
/// list merged with an optional override file, loaded once at construction.
/// Re-reading the file requires constructing a new registry.
pub struct ExclusionRegistry {
    builtin: BTreeSet<Symbol>,
    from_file: BTreeSet<Symbol>,
}

impl ExclusionRegistry {
    /// Loads the registry, merging built-ins with the override file at
    /// `path` if one exists. An unreadable file is logged and tolerated;
    /// the registry then runs with degraded coverage, never fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let from_file = if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => parse_exclusion_lines(&contents),
                Err(e) => {
                    warn!(
                        "Could not read exclusion file {}: {e}. Using built-in list only.",
                        path.display()
                    );
                    BTreeSet::new()
                }
            }
        } else {
            debug!(
                "No exclusion file at {}. Using built-in list only.",
                path.display()
            );
            BTreeSet::new()
        };

        Self {
            builtin: builtin_set(),
            from_file,
        }
    }

    /// Registry with only the given symbols on top of the built-ins.
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            builtin: builtin_set(),
            from_file: symbols.into_iter().map(|s| Symbol::new(s.as_ref())).collect(),
        }
    }

    pub fn is_excluded(&self, symbol: &Symbol) -> bool {
        self.builtin.contains(symbol) || self.from_file.contains(symbol)
    }

    /// The full effective set, built-ins and file entries merged.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.builtin.iter().chain(
            self.from_file
                .iter()
                .filter(|s| !self.builtin.contains(*s)),
        )
    }

    pub fn builtin(&self) -> &BTreeSet<Symbol> {
        &self.builtin
    }

    pub fn from_file(&self) -> &BTreeSet<Symbol> {
        &self.from_file
    }
}

fn builtin_set() -> BTreeSet<Symbol> {
    BUILTIN_EXCLUSIONS.iter().map(|s| Symbol::new(s)).collect()
}

/// One symbol per line, `#` comments and blank lines ignored,
/// case-insensitive.
fn parse_exclusion_lines(contents: &str) -> BTreeSet<Symbol> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Symbol::new)
        .collect()
}
