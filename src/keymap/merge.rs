//! Layered merge of grouped keymaps
//!
//! Layers are applied lowest priority first. For every (context, key) the
//! last layer that binds it wins; contexts are unioned, never replaced
//! wholesale. The result keeps the first layer's context order and appends
//! contexts first seen in later layers.

use super::keymap::GroupedKeymap;

impl GroupedKeymap {
    /// Overlay `other` onto `self` in place
    pub fn merge_from(&mut self, other: &GroupedKeymap) {
        for (context, key, action) in other.iter() {
            self.insert(context.map(str::to_string), key, action.clone());
        }
    }

    /// Return `self` with `other` overlaid
    pub fn merged_with(&self, other: &GroupedKeymap) -> GroupedKeymap {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }
}

/// Merge layers given lowest priority first
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a GroupedKeymap>) -> GroupedKeymap {
    let mut merged = GroupedKeymap::new();
    for layer in layers {
        merged.merge_from(layer);
    }
    merged
}
