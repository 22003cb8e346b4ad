//! Core chord types: Modifiers, Keystroke, KeyChord
//!
//! Raw VS Code chords (`ctrl+shift+p`, `cmd+k cmd+s`, `shift+[Equal]`) are
//! parsed into these types and rendered back in Zed's canonical form
//! (`ctrl-shift-p`, `cmd-k cmd-s`, `shift-=`).

use std::fmt;
use std::str::FromStr;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b00001);
    pub const ALT: Modifiers = Modifiers(0b00010);
    pub const SHIFT: Modifiers = Modifiers(0b00100);
    pub const CMD: Modifiers = Modifiers(0b01000);
    pub const SUPER: Modifiers = Modifiers(0b10000);

    /// Canonical serialization order
    pub const ORDER: [(Modifiers, &'static str); 5] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::CMD, "cmd"),
        (Modifiers::SUPER, "super"),
    ];

    /// Resolve a modifier token through the alias table
    ///
    /// Returns `None` for tokens outside the vocabulary.
    pub fn from_token(token: &str) -> Option<Modifiers> {
        match token {
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "alt" | "option" => Some(Modifiers::ALT),
            "shift" => Some(Modifiers::SHIFT),
            "cmd" | "command" | "meta" => Some(Modifiers::CMD),
            "win" | "windows" | "super" => Some(Modifiers::SUPER),
            _ => None,
        }
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Canonical names of the held modifiers, in serialization order
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::ORDER
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "{}", names.join("-"))
    }
}

/// Why a chord string could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key expression")]
    Empty,
    #[error("unknown modifier `{modifier}` in `{stroke}`")]
    UnknownModifier { stroke: String, modifier: String },
    #[error("missing key in `{0}`")]
    MissingKey(String),
}

/// Resolve a key token through the alias table
fn resolve_key_alias(token: &str) -> &str {
    match token {
        "esc" => "escape",
        "return" => "enter",
        "del" => "delete",
        "pgup" => "pageup",
        "pgdn" => "pagedown",
        "spacebar" => "space",
        "ins" => "insert",
        "equal" => "=",
        "minus" => "-",
        "semicolon" => ";",
        "quote" => "'",
        "backquote" => "`",
        "slash" => "/",
        "backslash" | "intlbackslash" | "intlyen" => "\\",
        "comma" => ",",
        "period" => ".",
        "bracketleft" => "[",
        "bracketright" => "]",
        other => other,
    }
}

/// Resolve the inner name of a bracketed physical key (`[KeyA]`, `[Equal]`)
fn resolve_physical_key(inner: &str) -> String {
    let inner = inner.trim().to_lowercase();
    for prefix in ["key", "digit"] {
        if let Some(rest) = inner.strip_prefix(prefix) {
            if rest.len() == 1 && rest.chars().all(|c| c.is_ascii_alphanumeric()) {
                return rest.to_string();
            }
        }
    }
    resolve_key_alias(&inner).to_string()
}

/// Peel leading `ctrl-`/`alt-`/... prefixes of an already-canonical stroke
fn strip_canonical_modifiers(stroke: &str) -> (Modifiers, &str) {
    let mut mods = Modifiers::NONE;
    let mut rest = stroke;
    'peel: loop {
        for (flag, name) in Modifiers::ORDER {
            if let Some(after) = rest.strip_prefix(name).and_then(|r| r.strip_prefix('-')) {
                if !after.is_empty() {
                    mods |= flag;
                    rest = after;
                    continue 'peel;
                }
            }
        }
        return (mods, rest);
    }
}

/// A single keystroke: one key with modifiers
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub mods: Modifiers,
    /// Lower-cased, alias-resolved key name; never empty
    pub key: String,
}

impl Keystroke {
    /// Parse one stroke such as `ctrl+shift+p` or `shift+[Equal]`
    ///
    /// The last `+`-separated token is the key; an empty last token is the
    /// literal `+` key. Unknown modifiers reject the whole stroke. Strokes
    /// already in canonical form (`ctrl-shift-p`) parse to themselves.
    pub fn parse(stroke: &str) -> Result<Keystroke, KeyParseError> {
        let stroke = stroke.trim();
        if stroke.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let lowered = stroke.to_lowercase();
        let (mut mods, rest) = strip_canonical_modifiers(&lowered);

        let tokens: Vec<String> = rest
            .split('+')
            .map(|token| token.trim().to_string())
            .collect();
        let (key_token, modifier_tokens) = match tokens.split_last() {
            Some((key, modifiers)) => (key.as_str(), modifiers),
            None => return Err(KeyParseError::Empty),
        };
        // Dash-joined prefixes can also trail a `+` list (`shift+ctrl-a`)
        let (key_mods, key_token) = strip_canonical_modifiers(key_token);
        mods |= key_mods;
        let key_token = if key_token.is_empty() { "+" } else { key_token };

        for token in modifier_tokens.iter().filter(|t| !t.is_empty()) {
            match Modifiers::from_token(token) {
                Some(modifier) => mods |= modifier,
                None => {
                    return Err(KeyParseError::UnknownModifier {
                        stroke: stroke.to_string(),
                        modifier: token.clone(),
                    })
                }
            }
        }

        let mut key = resolve_key_alias(key_token).to_string();
        if key.len() > 2 && key.starts_with('[') && key.ends_with(']') {
            key = resolve_physical_key(&key[1..key.len() - 1]);
        }
        if key.is_empty() {
            return Err(KeyParseError::MissingKey(stroke.to_string()));
        }

        Ok(Keystroke { mods, key })
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.mods.names() {
            write!(f, "{}-", name)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Keystroke {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keystroke::parse(s)
    }
}

/// An ordered sequence of keystrokes (usually 1, sometimes 2 for chords)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord(Vec<Keystroke>);

impl KeyChord {
    /// Parse a whitespace-separated chord; every stroke must normalize
    pub fn parse(chord: &str) -> Result<KeyChord, KeyParseError> {
        let strokes = chord
            .split_whitespace()
            .map(Keystroke::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if strokes.is_empty() {
            return Err(KeyParseError::Empty);
        }
        Ok(KeyChord(strokes))
    }

    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.0
    }

    /// Check if this is a multi-keystroke sequence
    pub fn is_sequence(&self) -> bool {
        self.0.len() > 1
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stroke) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", stroke)?;
        }
        Ok(())
    }
}

impl FromStr for KeyChord {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyChord::parse(s)
    }
}

/// Normalize a raw chord string into its canonical form
pub fn normalize_chord(raw: &str) -> Result<String, KeyParseError> {
    KeyChord::parse(raw).map(|chord| chord.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert_eq!(mods.names().count(), 0);
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
        assert_eq!(mods.to_string(), "ctrl-shift");
    }

    #[test]
    fn test_modifier_aliases() {
        assert_eq!(Modifiers::from_token("control"), Some(Modifiers::CTRL));
        assert_eq!(Modifiers::from_token("option"), Some(Modifiers::ALT));
        assert_eq!(Modifiers::from_token("meta"), Some(Modifiers::CMD));
        assert_eq!(Modifiers::from_token("windows"), Some(Modifiers::SUPER));
        assert_eq!(Modifiers::from_token("hyper"), None);
    }

    #[test]
    fn test_parse_simple_key() {
        let stroke = Keystroke::parse("a").unwrap();
        assert_eq!(stroke.key, "a");
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = Keystroke::parse("Ctrl+Shift+P").unwrap();
        assert_eq!(stroke.key, "p");
        assert_eq!(stroke.to_string(), "ctrl-shift-p");
    }

    #[test]
    fn test_modifier_order_is_canonical() {
        assert_eq!(normalize_chord("shift+ctrl+p").unwrap(), "ctrl-shift-p");
        assert_eq!(normalize_chord("cmd+alt+ctrl+k").unwrap(), "ctrl-alt-cmd-k");
        assert_eq!(
            normalize_chord("super+shift+alt+ctrl+cmd+x").unwrap(),
            "ctrl-alt-shift-cmd-super-x"
        );
    }

    #[test]
    fn test_duplicate_modifiers_collapse() {
        assert_eq!(normalize_chord("ctrl+control+s").unwrap(), "ctrl-s");
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(normalize_chord("esc").unwrap(), "escape");
        assert_eq!(normalize_chord("ctrl+pgdn").unwrap(), "ctrl-pagedown");
        assert_eq!(normalize_chord("alt+Return").unwrap(), "alt-enter");
        assert_eq!(normalize_chord("ctrl+minus").unwrap(), "ctrl--");
    }

    #[test]
    fn test_trailing_plus_is_plus_key() {
        assert_eq!(normalize_chord("ctrl++").unwrap(), "ctrl-+");
        assert_eq!(normalize_chord("+").unwrap(), "+");
    }

    #[test]
    fn test_bracketed_physical_keys() {
        assert_eq!(normalize_chord("shift+[Equal]").unwrap(), "shift-=");
        assert_eq!(normalize_chord("ctrl+[Backquote]").unwrap(), "ctrl-`");
        assert_eq!(normalize_chord("alt+[KeyA]").unwrap(), "alt-a");
        assert_eq!(normalize_chord("[Digit7]").unwrap(), "7");
        assert_eq!(normalize_chord("[F13]").unwrap(), "f13");
    }

    #[test]
    fn test_single_bracket_is_literal() {
        assert_eq!(normalize_chord("ctrl+[").unwrap(), "ctrl-[");
        assert_eq!(normalize_chord("ctrl+]").unwrap(), "ctrl-]");
    }

    #[test]
    fn test_unknown_modifier_fails_closed() {
        let err = normalize_chord("hyper+k").unwrap_err();
        assert!(matches!(err, KeyParseError::UnknownModifier { .. }));
    }

    #[test]
    fn test_multi_stroke_chord() {
        let chord = KeyChord::parse("cmd+k  cmd+s").unwrap();
        assert!(chord.is_sequence());
        assert_eq!(chord.to_string(), "cmd-k cmd-s");
    }

    #[test]
    fn test_dash_joined_key_token_is_reordered() {
        assert_eq!(normalize_chord("shift+ctrl-a").unwrap(), "ctrl-shift-a");
        let chord = KeyChord::parse("alt+shift-cmd-k ctrl-x").unwrap();
        let strokes = chord.keystrokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].mods, Modifiers::ALT | Modifiers::SHIFT | Modifiers::CMD);
        assert_eq!(strokes[0].key, "k");
        assert_eq!(strokes[1].to_string(), "ctrl-x");
    }

    #[test]
    fn test_multi_stroke_rejected_as_a_whole() {
        assert!(normalize_chord("ctrl+k foo+s").is_err());
    }

    #[test]
    fn test_empty_chord_rejected() {
        assert_eq!(normalize_chord("   "), Err(KeyParseError::Empty));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in [
            "ctrl+shift+p",
            "cmd+k cmd+s",
            "shift+[Equal]",
            "ctrl++",
            "alt+minus",
            "f5",
            "shift+ctrl-a",
            "alt+shift-cmd-k ctrl-x",
        ] {
            let once = normalize_chord(raw).unwrap();
            let twice = normalize_chord(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }
}
