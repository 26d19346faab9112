//! Route table shared by the widget compiler and the entry point.

use std::collections::HashSet;

use fluttergen_core::{Project, ScreenName};
use tracing::warn;

/// A screen whose normalized name collided with an earlier screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub label: String,
    pub original: ScreenName,
    pub renamed: ScreenName,
}

/// Resolved names of every screen in a project, in input order.
///
/// Names are unique: a screen whose file or class name is already taken gets
/// the smallest numeric suffix that frees both, and the rename is recorded.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(String, ScreenName)>,
    renames: Vec<Rename>,
}

impl RouteTable {
    /// Resolve names for labels in order.
    pub fn resolve<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        let mut files = HashSet::new();
        let mut classes = HashSet::new();

        for label in labels {
            let original = ScreenName::normalize(label);
            let mut name = original.clone();
            let mut suffix = 2;
            while files.contains(&name.file_name) || classes.contains(&name.class_name) {
                name = original.with_suffix(suffix);
                suffix += 1;
            }

            if name != original {
                warn!(
                    label,
                    from = %original.file_name,
                    to = %name.file_name,
                    "screen name collides with an earlier screen, renamed"
                );
                table.renames.push(Rename {
                    label: label.to_string(),
                    original,
                    renamed: name.clone(),
                });
            }

            files.insert(name.file_name.clone());
            classes.insert(name.class_name.clone());
            table.entries.push((label.to_string(), name));
        }

        table
    }

    /// Resolve names for every screen of a project.
    pub fn for_project(project: &Project) -> Self {
        Self::resolve(project.labels())
    }

    /// Route path of the first screen with this label.
    pub fn route_for(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, name)| name.route_path.as_str())
    }

    /// Resolved name of the screen at `index` in input order.
    pub fn name_at(&self, index: usize) -> Option<&ScreenName> {
        self.entries.get(index).map(|(_, name)| name)
    }

    /// The screen the app opens on.
    pub fn home(&self) -> Option<&ScreenName> {
        self.name_at(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ScreenName)> {
        self.entries.iter().map(|(label, name)| (label.as_str(), name))
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
