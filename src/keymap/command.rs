//! VS Code command identifiers mapped onto Zed actions
//!
//! The mapping is pure data: a one-to-one table for zero-argument commands
//! plus a small table of `runCommands` aggregates. Anything not listed is
//! reported as unsupported rather than guessed.

use serde_json::Value;

use super::action::Action;

/// VS Code's "run several commands" meta command
pub const RUN_COMMANDS: &str = "runCommands";

/// Prefix VS Code uses to remove a default binding (`-editor.action.foo`)
pub const REMOVE_PREFIX: char = '-';

/// Source command identifier → Zed action
pub const COMMAND_MAP: &[(&str, &str)] = &[
    // ========================================================================
    // Search
    // ========================================================================
    ("actions.find", "buffer_search::Deploy"),
    ("actions.findWithSelection", "buffer_search::Deploy"),
    ("closeFindWidget", "buffer_search::Dismiss"),
    ("editor.action.nextMatchFindAction", "search::SelectNextMatch"),
    ("editor.action.previousMatchFindAction", "search::SelectPreviousMatch"),
    ("editor.action.startFindReplaceAction", "buffer_search::DeployReplace"),
    ("editor.action.webvieweditor.hideFind", "buffer_search::Dismiss"),
    ("list.find", "search::FocusSearch"),
    ("workbench.action.findInFiles", "pane::DeploySearch"),
    // ========================================================================
    // Cancel / dismiss
    // ========================================================================
    ("cancelLinkedEditingInput", "editor::Cancel"),
    ("cancelRenameInput", "editor::Cancel"),
    ("cancelSelection", "editor::Cancel"),
    ("closeAccessibilityHelp", "editor::Cancel"),
    ("closeReferenceSearch", "editor::Cancel"),
    ("closeReplaceInFilesWidget", "editor::Cancel"),
    ("commentsClearFilterText", "editor::Cancel"),
    ("editor.action.inlineSuggest.hide", "editor::Cancel"),
    ("editor.cancelOperation", "editor::Cancel"),
    ("editor.closeCallHierarchy", "editor::Cancel"),
    ("hideCodeActionWidget", "editor::Cancel"),
    ("hideSuggestWidget", "editor::Cancel"),
    ("inlineChat.arrowOutUp", "editor::Cancel"),
    ("interactive.input.clear", "editor::Cancel"),
    ("keybindings.editor.clearSearchResults", "editor::Cancel"),
    ("leaveEditorMessage", "editor::Cancel"),
    ("leaveSnippet", "editor::Cancel"),
    ("settings.action.focusLevelUp", "editor::Cancel"),
    ("workbench.action.hideComment", "editor::Cancel"),
    ("workbench.action.hideInterfaceOverview", "editor::Cancel"),
    ("workbench.banner.focusBanner", "editor::Cancel"),
    ("workbench.statusBar.clearFocus", "editor::Cancel"),
    // ========================================================================
    // Editing
    // ========================================================================
    ("cursorDown", "editor::MoveDown"),
    ("cursorLeft", "editor::MoveLeft"),
    ("cursorRight", "editor::MoveRight"),
    ("cursorUp", "editor::MoveUp"),
    ("deleteLeft", "editor::Backspace"),
    ("deleteRight", "editor::Delete"),
    ("deleteWordLeft", "editor::DeleteToPreviousWordStart"),
    ("deleteWordPartLeft", "editor::DeleteToPreviousSubwordStart"),
    ("deleteWordPartRight", "editor::DeleteToNextSubwordEnd"),
    ("deleteWordRight", "editor::DeleteToNextWordEnd"),
    ("editor.action.clipboardCopyAction", "editor::Copy"),
    ("editor.action.clipboardCutAction", "editor::Cut"),
    ("editor.action.clipboardPasteAction", "editor::Paste"),
    ("editor.action.commentLine", "editor::ToggleComments"),
    ("editor.action.deleteLines", "editor::DeleteLine"),
    ("editor.action.outdentLines", "editor::Outdent"),
    ("editor.action.quickFix", "editor::ToggleCodeActions"),
    ("editor.action.rename", "editor::Rename"),
    ("editor.action.revealDefinition", "editor::GoToDefinition"),
    ("editor.action.selectAll", "editor::SelectAll"),
    ("editor.action.triggerSuggest", "editor::ShowCompletions"),
    ("editor.debug.action.toggleBreakpoint", "editor::ToggleBreakpoint"),
    ("go-to-next-change.go-to-next-scm-change", "editor::GoToNextChange"),
    ("go-to-next-change.go-to-previous-scm-change", "editor::GoToPreviousChange"),
    ("redo", "editor::Redo"),
    ("showPrevParameterHint", "editor::SignatureHelpPrevious"),
    ("undo", "editor::Undo"),
    // ========================================================================
    // Folding
    // ========================================================================
    ("editor.fold", "editor::Fold"),
    ("editor.foldLevel1", "editor::FoldAtLevel_1"),
    ("editor.foldLevel2", "editor::FoldAtLevel_2"),
    ("editor.foldLevel3", "editor::FoldAtLevel_3"),
    ("editor.foldLevel4", "editor::FoldAtLevel_4"),
    ("editor.foldLevel5", "editor::FoldAtLevel_5"),
    ("editor.foldLevel6", "editor::FoldAtLevel_6"),
    ("editor.foldLevel7", "editor::FoldAtLevel_7"),
    ("editor.unfold", "editor::UnfoldLines"),
    // ========================================================================
    // Emacs (emacs-mcx extension)
    // ========================================================================
    ("emacs-mcx.backwardWord", "editor::MoveToPreviousWordStart"),
    ("emacs-mcx.cancel", "editor::Cancel"),
    ("emacs-mcx.deleteBackwardChar", "editor::Backspace"),
    ("emacs-mcx.forwardWord", "editor::MoveToNextWordEnd"),
    ("emacs-mcx.isearchExit", "editor::Cancel"),
    ("emacs-mcx.paredit.pareditKill", "editor::KillRingCut"),
    ("emacs-mcx.scrollDownCommand", "editor::MovePageDown"),
    ("emacs-mcx.setMarkCommand", "editor::SetMark"),
    ("emacs-mcx.yank", "editor::Paste"),
    // ========================================================================
    // Project panel
    // ========================================================================
    ("explorer.newFile", "project_panel::NewFile"),
    ("explorer.openToSide", "project_panel::Open"),
    ("filesExplorer.copy", "project_panel::Copy"),
    ("filesExplorer.cut", "project_panel::Cut"),
    ("filesExplorer.paste", "project_panel::Paste"),
    ("renameFile", "project_panel::Rename"),
    ("workbench.files.action.createFolderFromExplorer", "project_panel::NewDirectory"),
    ("workbench.view.explorer", "project_panel::ToggleFocus"),
    // ========================================================================
    // Lists and pickers
    // ========================================================================
    ("list.collapse", "menu::SelectParent"),
    ("list.expand", "menu::SelectChild"),
    ("list.focusDown", "menu::SelectNext"),
    ("list.focusPageDown", "menu::SelectLast"),
    ("list.focusPageUp", "menu::SelectFirst"),
    ("list.focusUp", "menu::SelectPrevious"),
    ("workbench.action.closeQuickOpen", "menu::Cancel"),
    ("workbench.action.quickOpenNavigateNextInFilePicker", "menu::SelectNext"),
    ("workbench.action.quickOpenNavigateNextInViewPicker", "menu::SelectNext"),
    // ========================================================================
    // Panes and tabs
    // ========================================================================
    ("history.showPrevious", "pane::GoBack"),
    ("welcome.goBack", "pane::GoBack"),
    ("workbench.action.closeActiveEditor", "pane::CloseActiveItem"),
    ("workbench.action.closeAllEditors", "pane::CloseAllItems"),
    ("workbench.action.closeEditorInAllGroups", "pane::CloseActiveItem"),
    ("workbench.action.closeEditorsAndGroup", "workspace::CloseAllItemsAndPanes"),
    ("workbench.action.closeEditorsInGroup", "pane::CloseAllItems"),
    ("workbench.action.focusActiveEditorGroup", "pane::ActivateItem"),
    ("workbench.action.lastEditorInGroup", "pane::ActivateLastItem"),
    ("workbench.action.navigateBack", "pane::GoBack"),
    ("workbench.action.nextEditor", "pane::ActivateNextItem"),
    ("workbench.action.nextEditorInGroup", "pane::ActivateNextItem"),
    ("workbench.action.previousEditor", "pane::ActivatePreviousItem"),
    ("workbench.action.showAllEditorsByMostRecentlyUsed", "tab_switcher::Toggle"),
    // ========================================================================
    // Workspace
    // ========================================================================
    ("keybindings.editor.searchKeybindings", "zed::OpenKeymap"),
    ("welcome.showNewFileEntries", "workspace::NewFile"),
    ("workbench.action.closeWindow", "workspace::CloseWindow"),
    ("workbench.action.files.newUntitledFile", "workspace::NewFile"),
    ("workbench.action.files.save", "workspace::Save"),
    ("workbench.action.files.saveAll", "workspace::SaveAll"),
    ("workbench.action.gotoLine", "go_to_line::Toggle"),
    ("workbench.action.newWindow", "workspace::NewWindow"),
    ("workbench.action.openGlobalKeybindings", "zed::OpenKeymap"),
    ("workbench.action.openRecent", "projects::OpenRecent"),
    ("workbench.action.quickOpen", "file_finder::Toggle"),
    ("workbench.action.quickOpenView", "file_finder::Toggle"),
    ("workbench.action.quit", "zed::Quit"),
    ("workbench.action.showCommands", "command_palette::Toggle"),
    ("workbench.action.switchWindow", "workspace::SwitchProject"),
    ("workbench.action.togglePanel", "workspace::ToggleBottomDock"),
    ("workbench.action.toggleSidebarVisibility", "workspace::ToggleLeftDock"),
    ("workbench.action.zoomIn", "zed::IncreaseUiFontSize"),
    ("workbench.action.zoomOut", "zed::DecreaseUiFontSize"),
    // ========================================================================
    // Terminal
    // ========================================================================
    ("workbench.action.terminal.focus", "terminal_panel::Toggle"),
    ("workbench.action.terminal.pasteSelection", "terminal::Paste"),
    ("workbench.action.terminal.toggleTerminal", "terminal_panel::Toggle"),
    // ========================================================================
    // Debugging and tests
    // ========================================================================
    ("testing.debugAtCursor", "debugger::Start"),
    ("testing.runAtCursor", "repl::Run"),
    ("workbench.action.debug.continue", "debugger::Continue"),
    ("workbench.action.debug.stepInto", "debugger::StepInto"),
    ("workbench.action.debug.stepOut", "debugger::StepOut"),
    ("workbench.action.debug.stepOver", "debugger::StepOver"),
    // ========================================================================
    // Assistant
    // ========================================================================
    ("aichat.newchataction", "agent::NewTextThread"),
    ("aipopup.action.modal.generate", "assistant::InlineAssist"),
    ("composer.newAgentChat", "agent::NewThread"),
    ("github.copilot.chat.attachSelection", "agent::AddSelectionToThread"),
    ("workbench.action.chat.attachFile", "agent::OpenAddContextMenu"),
    ("workbench.action.chat.attachSelection", "agent::AddSelectionToThread"),
    ("workbench.action.chat.history", "agent::OpenHistory"),
    ("workbench.action.chat.openAgent", "agent::Chat"),
    ("workbench.action.chat.openInSidebar", "agent::Chat"),
    ("workbench.action.chat.switchToNextModel", "agent::CycleFavoriteModels"),
    // ========================================================================
    // Git
    // ========================================================================
    ("gitlens.toggleFileBlame", "git::Blame"),
];

/// `runCommands` sequences with a single Zed equivalent
pub const RUN_COMMANDS_MAP: &[(&[&str], &str)] = &[
    (
        &["actions.findWithSelection", "actions.find"],
        "buffer_search::Deploy",
    ),
    (
        &["workbench.view.explorer", "workbench.files.action.focusFilesExplorer"],
        "project_panel::ToggleFocus",
    ),
];

/// Why a command could not be mapped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("unsupported aggregate command")]
    UnsupportedAggregate,
    #[error("arguments not supported")]
    ArgumentsNotSupported,
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),
}

/// Look up a zero-argument command in the static table
pub fn lookup_command(command: &str) -> Option<&'static str> {
    COMMAND_MAP
        .iter()
        .find(|(source, _)| *source == command)
        .map(|(_, target)| *target)
}

/// Look up a `runCommands` argument list in the aggregate table
fn lookup_run_commands(args: Option<&Value>) -> Option<&'static str> {
    let commands = args?.get("commands")?.as_array()?;
    let names = commands
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<&str>>>()?;

    RUN_COMMANDS_MAP
        .iter()
        .find(|(sequence, _)| *sequence == names.as_slice())
        .map(|(_, target)| *target)
}

/// Map a source command (plus optional arguments) to a Zed action
///
/// Rules, first match wins:
/// 1. empty or `-`-prefixed identifier → explicit unbind
/// 2. `runCommands` → aggregate table
/// 3. any other command with arguments → unsupported
/// 4. static table lookup
pub fn map_command(command: &str, args: Option<&Value>) -> Result<Action, MapError> {
    let args = args.filter(|value| !value.is_null());

    if command.is_empty() || command.starts_with(REMOVE_PREFIX) {
        return Ok(Action::Unbound);
    }

    if command == RUN_COMMANDS {
        return lookup_run_commands(args)
            .map(Action::command)
            .ok_or(MapError::UnsupportedAggregate);
    }

    if args.is_some() {
        return Err(MapError::ArgumentsNotSupported);
    }

    lookup_command(command)
        .map(Action::command)
        .ok_or_else(|| MapError::UnsupportedCommand(command.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_no_duplicate_sources() {
        let mut seen = HashSet::new();
        for (source, _) in COMMAND_MAP {
            assert!(seen.insert(*source), "duplicate entry for {source}");
        }
    }

    #[test]
    fn test_table_targets_are_namespaced() {
        for (source, target) in COMMAND_MAP {
            assert!(target.contains("::"), "{source} maps to bare {target}");
        }
    }

    #[test]
    fn test_map_simple_command() {
        assert_eq!(
            map_command("workbench.action.showCommands", None),
            Ok(Action::command("command_palette::Toggle"))
        );
    }

    #[test]
    fn test_unbind_forms() {
        assert_eq!(map_command("", None), Ok(Action::Unbound));
        assert_eq!(
            map_command("-editor.action.rename", None),
            Ok(Action::Unbound)
        );
        // Removal wins even when arguments are present
        assert_eq!(
            map_command("-workbench.action.quickOpen", Some(&json!({"x": 1}))),
            Ok(Action::Unbound)
        );
    }

    #[test]
    fn test_run_commands_known_sequence() {
        let args = json!({"commands": ["actions.findWithSelection", "actions.find"]});
        assert_eq!(
            map_command(RUN_COMMANDS, Some(&args)),
            Ok(Action::command("buffer_search::Deploy"))
        );
    }

    #[test]
    fn test_run_commands_unknown_sequence() {
        let args = json!({"commands": ["actions.find", "actions.findWithSelection"]});
        assert_eq!(
            map_command(RUN_COMMANDS, Some(&args)),
            Err(MapError::UnsupportedAggregate)
        );
        assert_eq!(
            map_command(RUN_COMMANDS, None),
            Err(MapError::UnsupportedAggregate)
        );
        let nested = json!({"commands": [{"command": "actions.find"}]});
        assert_eq!(
            map_command(RUN_COMMANDS, Some(&nested)),
            Err(MapError::UnsupportedAggregate)
        );
    }

    #[test]
    fn test_arguments_not_supported() {
        let args = json!({"text": "hello"});
        assert_eq!(
            map_command("type", Some(&args)),
            Err(MapError::ArgumentsNotSupported)
        );
    }

    #[test]
    fn test_null_arguments_are_ignored() {
        assert_eq!(
            map_command("workbench.action.quickOpen", Some(&Value::Null)),
            Ok(Action::command("file_finder::Toggle"))
        );
    }

    #[test]
    fn test_unsupported_command_reason() {
        let err = map_command("unknown.command.xyz", None).unwrap_err();
        assert_eq!(err.to_string(), "unsupported command: unknown.command.xyz");
    }
}
