//! Conversion driver: source binding records → grouped Zed keymap
//!
//! Records are processed in order. Each one is validated, its chord
//! normalized, its context classified and its command mapped; the result is
//! inserted into an accumulator seeded with the compatibility base. Failures
//! never abort the pass: they are collected into a [`ConversionRecord`].

use serde_json::Value;

use super::action::Action;
use super::binding::{raw_field, SkipReason, SourceBinding};
use super::command::map_command;
use super::context::KeyContext;
use super::keymap::{ContextName, GroupedKeymap};

/// A source record that produced no binding
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBinding {
    /// 1-based position in the source list
    pub index: usize,
    /// Raw `key` field text
    pub key: String,
    /// Raw `command` field text
    pub command: String,
    pub reason: SkipReason,
}

/// A binding that replaced a different action already bound to the same key
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub context: ContextName,
    pub key: String,
    pub previous: Action,
    pub current: Action,
    /// 1-based position of the winning source record
    pub source_index: usize,
}

/// Diagnostics for one conversion pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionRecord {
    /// Number of source records seen
    pub total: usize,
    /// Records mapped to a command (unbinds excluded)
    pub converted: usize,
    /// Records mapped to an explicit unbind
    pub unbound: usize,
    pub skipped: Vec<SkippedBinding>,
    pub collisions: Vec<Collision>,
}

impl ConversionRecord {
    /// Records that reached the keymap
    pub fn accepted(&self) -> usize {
        self.converted + self.unbound
    }
}

/// Output of a conversion pass
#[derive(Debug, Clone)]
pub struct Conversion {
    pub keymap: GroupedKeymap,
    pub record: ConversionRecord,
}

/// Accumulating converter
#[derive(Debug, Default)]
pub struct Converter {
    keymap: GroupedKeymap,
    record: ConversionRecord,
}

impl Converter {
    /// Start from `base`; its bindings take part in collision detection
    pub fn new(base: GroupedKeymap) -> Self {
        Self {
            keymap: base,
            record: ConversionRecord::default(),
        }
    }

    /// Convert every record, in order
    pub fn convert(mut self, records: &[Value]) -> Conversion {
        for record in records {
            self.push(record);
        }
        self.finish()
    }

    /// Convert one record
    pub fn push(&mut self, record: &Value) {
        self.record.total += 1;
        let index = self.record.total;

        match Self::translate(record) {
            Ok((context, key, action)) => self.insert(index, context, key, action),
            Err(reason) => {
                tracing::debug!("Skipping binding #{}: {}", index, reason);
                self.record.skipped.push(SkippedBinding {
                    index,
                    key: raw_field(record, "key"),
                    command: raw_field(record, "command"),
                    reason,
                });
            }
        }
    }

    pub fn finish(self) -> Conversion {
        tracing::debug!(
            "Converted {} of {} bindings ({} unbound, {} skipped, {} collisions)",
            self.record.converted,
            self.record.total,
            self.record.unbound,
            self.record.skipped.len(),
            self.record.collisions.len()
        );
        Conversion {
            keymap: self.keymap,
            record: self.record,
        }
    }

    fn translate(record: &Value) -> Result<(KeyContext, String, Action), SkipReason> {
        let binding = SourceBinding::from_value(record)?;
        let context = KeyContext::infer(binding.when, binding.command);
        let action = map_command(binding.command, binding.args)?;
        Ok((context, binding.key(), action))
    }

    fn insert(&mut self, index: usize, context: KeyContext, key: String, action: Action) {
        let context: ContextName = Some(context.as_str().to_string());

        if action.is_unbound() {
            self.record.unbound += 1;
        } else {
            self.record.converted += 1;
        }

        if let Some(previous) = self.keymap.insert(context.clone(), key.clone(), action.clone()) {
            if previous != action {
                tracing::debug!(
                    "Binding #{} overrides {} in {:?}: {} -> {}",
                    index,
                    key,
                    context,
                    previous,
                    action
                );
                self.record.collisions.push(Collision {
                    context,
                    key,
                    previous,
                    current: action,
                    source_index: index,
                });
            }
        }
    }
}

/// Convert `records` on top of `base`
pub fn convert_bindings(records: &[Value], base: GroupedKeymap) -> Conversion {
    Converter::new(base).convert(records)
}
