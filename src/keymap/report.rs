//! Markdown conversion report

use std::fmt;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use super::convert::ConversionRecord;
use super::diff::KeymapDiff;

/// Everything a conversion run reports on
#[derive(Debug, Clone)]
pub struct ConversionReport<'a> {
    pub generated: DateTime<Utc>,
    pub source: &'a Path,
    pub auto_output: &'a Path,
    pub final_output: &'a Path,
    pub compat_base: Option<&'a Path>,
    pub manual_overrides: Option<&'a Path>,
    pub manual_loaded: bool,
    pub record: &'a ConversionRecord,
    /// Previous final keymap compared with the new one
    pub final_changes: &'a KeymapDiff,
}

fn path_field(path: Option<&Path>) -> String {
    path.map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl ConversionReport<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConversionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;

        writeln!(f, "# Zed Keymap Conversion Report")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Generated: `{}`",
            self.generated.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f, "- Source: `{}`", self.source.display())?;
        writeln!(f, "- Auto output: `{}`", self.auto_output.display())?;
        writeln!(f, "- Final output: `{}`", self.final_output.display())?;
        writeln!(f, "- Compatibility base: `{}`", path_field(self.compat_base))?;
        writeln!(f, "- Manual overrides: `{}`", path_field(self.manual_overrides))?;
        writeln!(f, "- Manual overrides loaded: `{}`", self.manual_loaded)?;
        writeln!(f, "- Total bindings: `{}`", record.total)?;
        writeln!(f, "- Converted bindings: `{}`", record.converted)?;
        writeln!(f, "- Unbound bindings: `{}`", record.unbound)?;
        writeln!(f, "- Skipped bindings: `{}`", record.skipped.len())?;
        writeln!(f, "- Key collisions: `{}`", record.collisions.len())?;
        writeln!(f)?;

        let changes = self.final_changes;
        writeln!(f, "## Final Keymap Changes")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Added: `{}`, removed: `{}`, changed: `{}`, unchanged: `{}`",
            changes.added, changes.removed, changes.changed, changes.unchanged
        )?;
        for entry in &changes.entries {
            writeln!(f, "- `{}`", entry)?;
        }
        writeln!(f)?;

        writeln!(f, "## Skipped Bindings")?;
        writeln!(f)?;
        if record.skipped.is_empty() {
            writeln!(f, "- None")?;
        }
        for item in &record.skipped {
            writeln!(
                f,
                "- #{}: key=`{}` command=`{}` reason=`{}`",
                item.index, item.key, item.command, item.reason
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Key Collisions")?;
        writeln!(f)?;
        if record.collisions.is_empty() {
            writeln!(f, "- None")?;
        }
        for item in &record.collisions {
            writeln!(
                f,
                "- #{}: context=`{}` key=`{}` previous=`{}` current=`{}`",
                item.source_index,
                item.context.as_deref().unwrap_or("(global)"),
                item.key,
                item.previous.to_value(),
                item.current.to_value()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::action::Action;
    use crate::keymap::binding::SkipReason;
    use crate::keymap::convert::{Collision, SkippedBinding};
    use chrono::TimeZone;
    use serde_json::json;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_sections_say_none() {
        let record = ConversionRecord::default();
        let diff = KeymapDiff::default();
        let report = ConversionReport {
            generated: timestamp(),
            source: Path::new("keybindings.json"),
            auto_output: Path::new("auto.json"),
            final_output: Path::new("final.json"),
            compat_base: None,
            manual_overrides: None,
            manual_loaded: false,
            record: &record,
            final_changes: &diff,
        }
        .render();

        assert!(report.starts_with("# Zed Keymap Conversion Report\n\n"));
        assert!(report.contains("- Generated: `2026-03-01T12:00:00Z`"));
        assert!(report.contains("- Compatibility base: `none`"));
        assert!(report.contains("## Skipped Bindings\n\n- None\n"));
        assert!(report.contains("## Key Collisions\n\n- None\n"));
    }

    #[test]
    fn test_lists_skips_and_collisions() {
        let record = ConversionRecord {
            total: 3,
            converted: 2,
            unbound: 0,
            skipped: vec![SkippedBinding {
                index: 3,
                key: "ctrl+j".into(),
                command: "unknown.command.xyz".into(),
                reason: SkipReason::Unmapped(crate::keymap::command::MapError::UnsupportedCommand(
                    "unknown.command.xyz".into(),
                )),
            }],
            collisions: vec![Collision {
                context: Some("Workspace".into()),
                key: "ctrl-f".into(),
                previous: Action::command("buffer_search::Deploy"),
                current: Action::from(json!(["pane::ActivateItem", 0])),
                source_index: 2,
            }],
        };
        let diff = KeymapDiff::default();
        let report = ConversionReport {
            generated: timestamp(),
            source: Path::new("keybindings.json"),
            auto_output: Path::new("auto.json"),
            final_output: Path::new("final.json"),
            compat_base: Some(Path::new("base.json")),
            manual_overrides: Some(Path::new("manual.json")),
            manual_loaded: true,
            record: &record,
            final_changes: &diff,
        }
        .render();

        assert!(report.contains(
            "- #3: key=`ctrl+j` command=`unknown.command.xyz` reason=`unsupported command: unknown.command.xyz`"
        ));
        assert!(report.contains(
            "- #2: context=`Workspace` key=`ctrl-f` previous=`\"buffer_search::Deploy\"` current=`[\"pane::ActivateItem\",0]`"
        ));
        assert!(report.contains("- Manual overrides loaded: `true`"));
    }

    #[test]
    fn test_display_matches_render() {
        let record = ConversionRecord::default();
        let diff = KeymapDiff::default();
        let report = ConversionReport {
            generated: timestamp(),
            source: Path::new("keybindings.json"),
            auto_output: Path::new("auto.json"),
            final_output: Path::new("final.json"),
            compat_base: Some(Path::new("base.json")),
            manual_overrides: None,
            manual_loaded: false,
            record: &record,
            final_changes: &diff,
        };
        assert_eq!(format!("{report}"), report.render());
        assert!(report.render().ends_with("## Key Collisions\n\n- None\n"));
    }
}
