//! Zed context inference for converted bindings
//!
//! VS Code scopes bindings with free-form `when` expressions; Zed groups
//! them under context predicates. The classifier is a fixed, ordered cascade
//! of substring tests: the first matching rule wins and boolean structure
//! (`&&`, `||`, `!`) is never inspected.

use std::fmt;

/// `when` tokens indicating a terminal binding
const TERMINAL_WHEN_TOKENS: &[&str] = &["terminalfocus"];

/// `when` tokens indicating the file explorer
const PROJECT_WHEN_TOKENS: &[&str] = &[
    "explorerviewlet",
    "explorerviewletfocus",
    "explorerresource",
    "filesexplorerfocus",
];

/// `when` tokens indicating a list or quick-open picker
const MENU_WHEN_TOKENS: &[&str] = &["listfocus", "inquickopen"];

/// `when` tokens indicating a focused text editor
const EDITOR_WHEN_TOKENS: &[&str] = &[
    "editorfocus",
    "editortextfocus",
    "editorhasselection",
    "editorhasmultipleselections",
    "findwidgetvisible",
    "inputfocus",
    "inreferencesearcheditor",
    "parameterhintsvisible",
    "renameinputvisible",
    "suggestwidgetvisible",
    "textinputfocus",
];

const TERMINAL_COMMAND_PREFIXES: &[&str] = &["workbench.action.terminal", "terminal."];
const PROJECT_COMMAND_PREFIXES: &[&str] =
    &["explorer.", "filesExplorer.", "workbench.files.action"];
const MENU_COMMAND_PREFIXES: &[&str] = &["list."];
const EDITOR_COMMAND_PREFIXES: &[&str] =
    &["editor.", "actions.find", "delete", "cursor", "emacs-mcx."];

/// Zed context a converted binding is placed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Terminal,
    /// Project panel, not currently editing a file name
    ProjectPanel,
    /// Lists, pickers and other menus
    Menu,
    /// Editor, full mode (not single-line inputs)
    Editor,
    Workspace,
}

impl KeyContext {
    /// All contexts in classification priority order
    pub const ALL: [KeyContext; 5] = [
        KeyContext::Terminal,
        KeyContext::ProjectPanel,
        KeyContext::Menu,
        KeyContext::Editor,
        KeyContext::Workspace,
    ];

    /// Zed context expression
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyContext::Terminal => "Terminal",
            KeyContext::ProjectPanel => "ProjectPanel && not_editing",
            KeyContext::Menu => "menu",
            KeyContext::Editor => "Editor && mode == full",
            KeyContext::Workspace => "Workspace",
        }
    }

    /// Human-readable description for reports
    pub const fn label(self) -> &'static str {
        match self {
            KeyContext::Terminal => "Terminal",
            KeyContext::ProjectPanel => "Project panel, not currently editing",
            KeyContext::Menu => "menu",
            KeyContext::Editor => "Editor, full mode",
            KeyContext::Workspace => "Workspace",
        }
    }

    /// Classify a binding from its `when` expression and command identifier
    pub fn infer(when: Option<&str>, command: &str) -> KeyContext {
        let when = when.unwrap_or_default().to_lowercase();
        let command = command.trim_start_matches('-');

        let when_has = |tokens: &[&str]| tokens.iter().any(|token| when.contains(token));
        let command_has = |prefixes: &[&str]| prefixes.iter().any(|p| command.starts_with(p));

        if when_has(TERMINAL_WHEN_TOKENS) || command_has(TERMINAL_COMMAND_PREFIXES) {
            return KeyContext::Terminal;
        }

        if when_has(PROJECT_WHEN_TOKENS)
            || command_has(PROJECT_COMMAND_PREFIXES)
            || command == "renameFile"
        {
            return KeyContext::ProjectPanel;
        }

        if when_has(MENU_WHEN_TOKENS) || command_has(MENU_COMMAND_PREFIXES) {
            return KeyContext::Menu;
        }

        if when_has(EDITOR_WHEN_TOKENS) || command_has(EDITOR_COMMAND_PREFIXES) {
            return KeyContext::Editor;
        }

        KeyContext::Workspace
    }
}

impl fmt::Display for KeyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
