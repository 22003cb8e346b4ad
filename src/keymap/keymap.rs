//! Grouped keymap: context → canonical chord → action
//!
//! Every layer (compatibility base, auto baseline, manual overrides, final
//! output, live capture) uses this one representation, so any layer can be
//! fed into any stage.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::action::Action;

/// Context of a group; `None` is Zed's global (context-free) group
pub type ContextName = Option<String>;

/// Contexts emitted first, in this order, when present
pub const PREFERRED_CONTEXTS: &[Option<&str>] = &[
    None,
    Some("Workspace"),
    Some("Editor"),
    Some("Editor && mode == full"),
    Some("Terminal"),
    Some("ProjectPanel && not_editing"),
    Some("menu"),
];

/// One entry of a Zed keymap file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeymapEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub bindings: IndexMap<String, Action>,
}

/// Bindings grouped by context
///
/// Within a context each chord maps to exactly one action; inserting an
/// existing chord replaces its action. Contexts keep first-insertion order
/// and a context is only stored once it holds a binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedKeymap {
    contexts: IndexMap<ContextName, IndexMap<String, Action>>,
}

impl GroupedKeymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, returning the action it replaced
    pub fn insert(
        &mut self,
        context: ContextName,
        key: impl Into<String>,
        action: Action,
    ) -> Option<Action> {
        self.contexts
            .entry(context)
            .or_default()
            .insert(key.into(), action)
    }

    /// Look up the action bound to `key` in `context`
    pub fn get(&self, context: Option<&str>, key: &str) -> Option<&Action> {
        self.contexts
            .get(&context.map(str::to_string))
            .and_then(|bindings| bindings.get(key))
    }

    /// Bindings of one context, in insertion order
    pub fn bindings(&self, context: Option<&str>) -> Option<&IndexMap<String, Action>> {
        self.contexts.get(&context.map(str::to_string))
    }

    /// Contexts in first-insertion order
    pub fn context_order(&self) -> Vec<ContextName> {
        self.contexts.keys().cloned().collect()
    }

    /// Iterate over contexts and their bindings in insertion order
    pub fn contexts(&self) -> impl Iterator<Item = (&ContextName, &IndexMap<String, Action>)> {
        self.contexts.iter()
    }

    /// Iterate over every (context, key, action) triple
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &str, &Action)> {
        self.contexts.iter().flat_map(|(context, bindings)| {
            bindings
                .iter()
                .map(move |(key, action)| (context.as_deref(), key.as_str(), action))
        })
    }

    /// Total number of bindings across all contexts
    pub fn len(&self) -> usize {
        self.contexts.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a keymap from file entries; later entries override earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = KeymapEntry>) -> Self {
        let mut keymap = Self::new();
        for entry in entries {
            let context = entry.context.filter(|c| !c.is_empty());
            for (key, action) in entry.bindings {
                if !key.is_empty() {
                    keymap.insert(context.clone(), key, action);
                }
            }
        }
        keymap
    }

    /// Render file entries in deterministic order
    ///
    /// Contexts follow `preferred` first, then [`PREFERRED_CONTEXTS`], then
    /// the rest alphabetically. Keys within a context are sorted.
    pub fn to_entries(&self, preferred: &[ContextName]) -> Vec<KeymapEntry> {
        ordered_contexts(self.contexts.keys(), preferred)
            .into_iter()
            .filter_map(|context| {
                let bindings = self.contexts.get(&context)?;
                let mut keys: Vec<&String> = bindings.keys().collect();
                keys.sort();
                let bindings = keys
                    .into_iter()
                    .map(|key| (key.clone(), bindings[key].clone()))
                    .collect();
                Some(KeymapEntry { context, bindings })
            })
            .collect()
    }
}

impl FromIterator<(ContextName, String, Action)> for GroupedKeymap {
    fn from_iter<T: IntoIterator<Item = (ContextName, String, Action)>>(iter: T) -> Self {
        let mut keymap = Self::new();
        for (context, key, action) in iter {
            keymap.insert(context, key, action);
        }
        keymap
    }
}

/// Stable context ordering for output files
pub fn ordered_contexts<'a>(
    contexts: impl IntoIterator<Item = &'a ContextName>,
    preferred: &[ContextName],
) -> Vec<ContextName> {
    let present: Vec<&ContextName> = contexts.into_iter().collect();
    let builtin = PREFERRED_CONTEXTS.iter().map(|c| c.map(str::to_string));

    let mut ordered: Vec<ContextName> = Vec::with_capacity(present.len());
    for context in preferred.iter().cloned().chain(builtin) {
        if present.contains(&&context) && !ordered.contains(&context) {
            ordered.push(context);
        }
    }

    let mut rest: Vec<ContextName> = present
        .into_iter()
        .filter(|context| !ordered.contains(*context))
        .cloned()
        .collect();
    rest.sort();
    ordered.extend(rest);
    ordered
}
