//! Railway code → line name lookup.

use std::collections::HashMap;

/// Lookup from railway code (e.g. `TokyoMetro.Chiyoda`) to a line name.
///
/// Unknown codes resolve to themselves, so a new line appearing in the API
/// degrades to showing its raw code rather than failing.
#[derive(Debug, Clone, Default)]
pub struct RailwayNames {
    names: HashMap<String, String>,
}

impl RailwayNames {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code → name mapping, replacing any previous one.
    pub fn add(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    /// Resolve a code to its line name, falling back to the code itself.
    pub fn resolve(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Number of known railways.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The Tokyo Metro lines the application knows about.
pub fn tokyo_metro_names() -> RailwayNames {
    let mut names = RailwayNames::new();
    names.add("TokyoMetro.Chiyoda", "Tokyo Metro Chiyoda Line");
    names.add("TokyoMetro.Ginza", "Tokyo Metro Ginza Line");
    names.add("TokyoMetro.Hanzomon", "Tokyo Metro Hanzomon Line");
    names.add("TokyoMetro.Hibiya", "Tokyo Metro Hibiya Line");
    names.add("TokyoMetro.Marunouchi", "Tokyo Metro Marunouchi Line");
    names.add("TokyoMetro.Namboku", "Tokyo Metro Namboku Line");
    names.add("TokyoMetro.Tozai", "Tokyo Metro Tozai Line");
    names.add("TokyoMetro.Yurakucho", "Tokyo Metro Yurakucho Line");
    names.add("TokyoMetro.Fukutoshin", "Tokyo Metro Fukutoshin Line");
    names.add("TokyoMetro.HibiyaBranch", "Tokyo Metro Hibiya Line branch");
    names.add(
        "TokyoMetro.MarunouchiBranch",
        "Tokyo Metro Marunouchi Line branch",
    );
    names
}
