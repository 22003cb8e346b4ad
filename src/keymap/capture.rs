//! Promote live keymap edits into a manual override layer
//!
//! The override layer holds exactly the (context, key) pairs whose captured
//! action differs from the auto baseline. A baseline key that was deleted in
//! the live keymap produces nothing: removal by omission cannot be expressed
//! as an override.

use super::diff::{diff_keymaps, KeymapDiff};
use super::keymap::GroupedKeymap;

/// Printed after every capture
pub const OMISSION_WARNING: &str =
    "Explicit key overrides are captured. Removing an auto-generated key by omission is not represented.";

/// Bindings in `captured` that are absent from or differ in `auto`
///
/// Contexts appear in the order their first override was found.
pub fn compute_manual_overrides(auto: &GroupedKeymap, captured: &GroupedKeymap) -> GroupedKeymap {
    captured
        .iter()
        .filter(|(context, key, action)| auto.get(*context, key) != Some(*action))
        .map(|(context, key, action)| (context.map(str::to_string), key.to_string(), action.clone()))
        .collect()
}

/// Result of a capture
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// New manual override layer, replacing the previous one in full
    pub manual: GroupedKeymap,
    /// `auto` with `manual` overlaid
    pub final_keymap: GroupedKeymap,
    /// Previous manual layer compared with the new one
    pub manual_diff: KeymapDiff,
    pub override_count: usize,
}

/// Derive the override layer and the resulting final keymap
pub fn capture(
    auto: &GroupedKeymap,
    captured: &GroupedKeymap,
    previous_manual: &GroupedKeymap,
) -> CaptureOutcome {
    let manual = compute_manual_overrides(auto, captured);
    let final_keymap = auto.merged_with(&manual);
    let manual_diff = diff_keymaps(previous_manual, &manual);
    let override_count = manual.len();

    tracing::debug!(
        "Captured {} overrides from {} live bindings ({})",
        override_count,
        captured.len(),
        manual_diff
    );

    CaptureOutcome {
        manual,
        final_keymap,
        manual_diff,
        override_count,
    }
}
