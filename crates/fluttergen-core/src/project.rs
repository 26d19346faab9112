//! Screens and projects.

use crate::ast::NodeTree;
use crate::errors::ParseError;
use crate::naming::ScreenName;

/// One named design document.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// The label as supplied by the caller.
    pub label: String,
    pub tree: NodeTree,
}

impl Screen {
    pub fn new(label: impl Into<String>, tree: NodeTree) -> Self {
        Self {
            label: label.into(),
            tree,
        }
    }

    /// Parse a screen from its serialized document.
    pub fn parse(label: &str, source: &str) -> Result<Self, ParseError> {
        let tree = NodeTree::parse(source).map_err(|source| ParseError::InvalidDocument {
            screen: label.to_string(),
            source,
        })?;
        Ok(Self::new(label, tree))
    }

    /// Identifiers derived from the label.
    pub fn name(&self) -> ScreenName {
        ScreenName::normalize(&self.label)
    }
}

/// An ordered set of screens; the first one is the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    screens: Vec<Screen>,
}

impl Project {
    pub fn new(screens: Vec<Screen>) -> Self {
        Self { screens }
    }

    /// Parse every screen, failing on the first invalid document.
    pub fn parse_all<'a, I>(sources: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let screens = sources
            .into_iter()
            .map(|(label, source)| Screen::parse(label, source))
            .collect::<Result<Vec<_>, _>>()?;
        Self::non_empty(screens)
    }

    /// Parse every screen, setting invalid documents aside.
    ///
    /// Returns the project built from the valid screens together with the
    /// errors of the skipped ones.
    pub fn parse_lenient<'a, I>(sources: I) -> Result<(Self, Vec<ParseError>), ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut screens = Vec::new();
        let mut skipped = Vec::new();
        for (label, source) in sources {
            match Screen::parse(label, source) {
                Ok(screen) => screens.push(screen),
                Err(err) => skipped.push(err),
            }
        }
        Ok((Self::non_empty(screens)?, skipped))
    }

    fn non_empty(screens: Vec<Screen>) -> Result<Self, ParseError> {
        if screens.is_empty() {
            return Err(ParseError::NoScreens);
        }
        Ok(Self { screens })
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// The screen the app opens on.
    pub fn home(&self) -> Option<&Screen> {
        self.screens.first()
    }

    /// Screen labels in input order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.screens.iter().map(|s| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
