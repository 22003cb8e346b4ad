//! File-level orchestration of the convert, capture and diff runs
//!
//! Everything here is glue: load layers, call into [`crate::keymap`], write
//! results. Missing optional layers become empty keymaps; anything else that
//! goes wrong aborts the run with context.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{CaptureConfig, ConvertConfig, DiffConfig};
use crate::keymap::{
    capture, diff_keymaps, load_live_keymap, load_optional_keymap, load_source_bindings,
    write_keymap_file, write_text, ContextName, ConversionRecord, ConversionReport, Converter,
    EntryPolicy, GroupedKeymap, KeymapDiff,
};

/// What a `convert` run produced
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub record: ConversionRecord,
    pub manual_loaded: bool,
    /// Previous final keymap compared with the new one
    pub final_changes: KeymapDiff,
    pub final_bindings: usize,
}

/// What a `capture` run produced
#[derive(Debug, Clone)]
pub struct CaptureSummary {
    pub override_count: usize,
    /// Previous manual layer compared with the new one
    pub manual_diff: KeymapDiff,
    pub auto_loaded: bool,
}

/// Load an optional layer, treating a missing file as empty
fn load_layer(path: &Path, policy: EntryPolicy, what: &str) -> Result<Option<GroupedKeymap>> {
    let layer = load_optional_keymap(path, policy)
        .with_context(|| format!("Failed to load {} from {}", what, path.display()))?;
    if layer.is_none() {
        tracing::warn!("{} not found at {}, using empty layer", what, path.display());
    }
    Ok(layer)
}

/// Caller-preferred contexts followed by the context order of each layer
fn preferred_order(configured: &[ContextName], layers: &[&GroupedKeymap]) -> Vec<ContextName> {
    let mut order = configured.to_vec();
    for layer in layers {
        order.extend(layer.context_order());
    }
    order
}

/// Convert VS Code keybindings and rebuild the auto and final keymaps
pub fn run_convert(config: &ConvertConfig) -> Result<ConvertSummary> {
    let records = load_source_bindings(&config.input).with_context(|| {
        format!(
            "Failed to load VS Code keybindings from {}",
            config.input.display()
        )
    })?;
    tracing::info!(
        "Loaded {} source bindings from {}",
        records.len(),
        config.input.display()
    );

    let base = match &config.compat_base {
        Some(path) => load_layer(path, EntryPolicy::Skip, "Compatibility base")?,
        None => None,
    }
    .unwrap_or_default();

    let manual = match &config.manual_overrides {
        Some(path) => load_layer(path, EntryPolicy::Skip, "Manual overrides")?,
        None => None,
    };
    let manual_loaded = manual.is_some();
    let manual = manual.unwrap_or_default();

    // The previous final keymap only feeds the report
    let previous = match load_optional_keymap(&config.output, EntryPolicy::Skip) {
        Ok(previous) => previous.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable previous final keymap: {}", e);
            GroupedKeymap::new()
        }
    };

    // All inputs are loaded; nothing below reads from disk
    let base_order = preferred_order(&config.preferred_contexts, &[&base]);
    let conversion = Converter::new(base).convert(&records);
    let auto = conversion.keymap;

    let final_keymap = auto.merged_with(&manual);
    let final_order = preferred_order(&base_order, &[&manual]);
    let final_changes = diff_keymaps(&previous, &final_keymap);

    write_keymap_file(&config.auto_output, &auto, &base_order)
        .context("Failed to write auto keymap")?;
    write_keymap_file(&config.output, &final_keymap, &final_order)
        .context("Failed to write final keymap")?;

    let report = ConversionReport {
        generated: chrono::Utc::now(),
        source: &config.input,
        auto_output: &config.auto_output,
        final_output: &config.output,
        compat_base: config.compat_base.as_deref(),
        manual_overrides: config.manual_overrides.as_deref(),
        manual_loaded,
        record: &conversion.record,
        final_changes: &final_changes,
    }
    .render();
    write_text(&config.report, &report).context("Failed to write conversion report")?;

    tracing::info!(
        "Conversion done: {} converted, {} unbound, {} skipped, {} collisions",
        conversion.record.converted,
        conversion.record.unbound,
        conversion.record.skipped.len(),
        conversion.record.collisions.len()
    );

    Ok(ConvertSummary {
        record: conversion.record,
        manual_loaded,
        final_changes,
        final_bindings: final_keymap.len(),
    })
}

/// Capture a live Zed keymap as manual overrides and rebuild the final keymap
pub fn run_capture(config: &CaptureConfig) -> Result<CaptureSummary> {
    let captured = load_live_keymap(&config.input, EntryPolicy::Reject).with_context(|| {
        format!("Failed to load Zed keymap from {}", config.input.display())
    })?;

    let auto = load_layer(&config.auto_input, EntryPolicy::Reject, "Auto keymap")?;
    let auto_loaded = auto.is_some();
    let auto = auto.unwrap_or_default();

    let previous_manual = match load_optional_keymap(&config.manual_output, EntryPolicy::Skip) {
        Ok(previous) => previous.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable previous manual overrides: {}", e);
            GroupedKeymap::new()
        }
    };

    let outcome = capture(&auto, &captured, &previous_manual);

    let manual_order = preferred_order(&config.preferred_contexts, &[&outcome.manual]);
    write_keymap_file(&config.manual_output, &outcome.manual, &manual_order)
        .context("Failed to write manual overrides")?;

    let final_order = preferred_order(&config.preferred_contexts, &[&auto, &outcome.manual]);
    write_keymap_file(&config.final_output, &outcome.final_keymap, &final_order)
        .context("Failed to write final keymap")?;

    Ok(CaptureSummary {
        override_count: outcome.override_count,
        manual_diff: outcome.manual_diff,
        auto_loaded,
    })
}

/// Compare two keymap files
pub fn run_diff(config: &DiffConfig) -> Result<KeymapDiff> {
    let load = |path: &Path| {
        load_live_keymap(path, EntryPolicy::Skip)
            .with_context(|| format!("Failed to load keymap from {}", path.display()))
    };
    let before = load(&config.before)?;
    let after = load(&config.after)?;
    Ok(diff_keymaps(&before, &after))
}
