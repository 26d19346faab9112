//! Screen-name normalization.
//!
//! A free-text screen label is turned into a Dart class name, a source file
//! name and a route path. Normalization is total: labels that contain nothing
//! usable fall back to [`FALLBACK_BASE`].

/// Marker word prefixed to every generated screen class.
pub const CLASS_PREFIX: &str = "Screen";

/// Prefix of every generated screen file.
pub const FILE_PREFIX: &str = "screen_";

/// Extension of generated screen files.
pub const FILE_EXTENSION: &str = "dart";

/// Base identifier used when a label has no identifier characters.
pub const FALLBACK_BASE: &str = "Untitled";

/// Identifiers derived from a screen label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenName {
    base: String,
    pub class_name: String,
    pub file_name: String,
    pub route_path: String,
}

impl ScreenName {
    /// Normalize a free-text label.
    ///
    /// Whitespace-delimited words keep only ASCII alphanumerics and `_`, get
    /// their first character upper-cased, and are concatenated.
    pub fn normalize(label: &str) -> Self {
        let base: String = label
            .split_whitespace()
            .map(|word| {
                let cleaned: String = word
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .collect();
                capitalize(&cleaned)
            })
            .collect();

        if base.is_empty() {
            Self::from_base(FALLBACK_BASE)
        } else {
            Self::from_base(&base)
        }
    }

    fn from_base(base: &str) -> Self {
        Self {
            base: base.to_string(),
            class_name: format!("{}{}", CLASS_PREFIX, base),
            file_name: format!("{}{}.{}", FILE_PREFIX, base.to_lowercase(), FILE_EXTENSION),
            route_path: format!("/{}", base),
        }
    }

    /// The same name with a numeric suffix appended to its base.
    pub fn with_suffix(&self, n: usize) -> Self {
        Self::from_base(&format!("{}{}", self.base, n))
    }

    /// The PascalCase identifier every other name is built from.
    pub fn base(&self) -> &str {
        &self.base
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
