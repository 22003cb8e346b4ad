//! Snapshot comparison of two keymaps
//!
//! Both sides are flattened to `(context, key) → canonical action JSON`, so
//! structured actions compare equal regardless of object key order.

use std::collections::BTreeMap;
use std::fmt;

use super::keymap::{ContextName, GroupedKeymap};

/// Flattened keymap, ordered by context then key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatKeymap(BTreeMap<(ContextName, String), String>);

impl FlatKeymap {
    pub fn from_keymap(keymap: &GroupedKeymap) -> Self {
        Self(
            keymap
                .iter()
                .map(|(context, key, action)| {
                    (
                        (context.map(str::to_string), key.to_string()),
                        action.canonical_json(),
                    )
                })
                .collect(),
        )
    }

    pub fn get(&self, context: Option<&str>, key: &str) -> Option<&str> {
        self.0
            .get(&(context.map(str::to_string), key.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&GroupedKeymap> for FlatKeymap {
    fn from(keymap: &GroupedKeymap) -> Self {
        Self::from_keymap(keymap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

impl ChangeKind {
    pub const fn symbol(self) -> char {
        match self {
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
            ChangeKind::Changed => '~',
        }
    }
}

/// One differing (context, key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: ChangeKind,
    pub context: ContextName,
    pub key: String,
    /// Canonical action JSON before, if bound
    pub before: Option<String>,
    /// Canonical action JSON after, if bound
    pub after: Option<String>,
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = self.context.as_deref().unwrap_or("(global)");
        write!(f, "{} [{}] {}", self.kind.symbol(), context, self.key)?;
        match (&self.before, &self.after) {
            (Some(before), Some(after)) => write!(f, ": {} -> {}", before, after),
            (Some(before), None) => write!(f, ": {}", before),
            (None, Some(after)) => write!(f, ": {}", after),
            (None, None) => Ok(()),
        }
    }
}

/// Result of comparing two keymaps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeymapDiff {
    /// Keys bound only after
    pub added: usize,
    /// Keys bound only before
    pub removed: usize,
    /// Keys bound on both sides to different actions
    pub changed: usize,
    /// Keys bound on both sides to the same action
    pub unchanged: usize,
    /// Differing keys ordered by context, then key
    pub entries: Vec<DiffEntry>,
}

impl KeymapDiff {
    /// True when both sides bind exactly the same keys to the same actions
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

impl fmt::Display for KeymapDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added={}, removed={}, changed={}",
            self.added, self.removed, self.changed
        )
    }
}

/// Compare two keymaps
pub fn diff_keymaps(before: &GroupedKeymap, after: &GroupedKeymap) -> KeymapDiff {
    diff_flat(&FlatKeymap::from(before), &FlatKeymap::from(after))
}

pub fn diff_flat(before: &FlatKeymap, after: &FlatKeymap) -> KeymapDiff {
    let mut diff = KeymapDiff::default();

    for ((context, key), old) in &before.0 {
        let entry = |kind, new: Option<&String>| DiffEntry {
            kind,
            context: context.clone(),
            key: key.clone(),
            before: Some(old.clone()),
            after: new.cloned(),
        };
        match after.0.get(&(context.clone(), key.clone())) {
            None => {
                diff.removed += 1;
                diff.entries.push(entry(ChangeKind::Removed, None));
            }
            Some(new) if new != old => {
                diff.changed += 1;
                diff.entries.push(entry(ChangeKind::Changed, Some(new)));
            }
            Some(_) => diff.unchanged += 1,
        }
    }

    for ((context, key), new) in &after.0 {
        if !before.0.contains_key(&(context.clone(), key.clone())) {
            diff.added += 1;
            diff.entries.push(DiffEntry {
                kind: ChangeKind::Added,
                context: context.clone(),
                key: key.clone(),
                before: None,
                after: Some(new.clone()),
            });
        }
    }

    diff.entries
        .sort_by(|a, b| (&a.context, &a.key).cmp(&(&b.context, &b.key)));
    diff
}
