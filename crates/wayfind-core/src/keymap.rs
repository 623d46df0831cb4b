//! Key bindings that map raw key events onto the five navigation inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{Direction, NavInput};

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code.
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create a key combination with an explicit set of modifier keys.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

/// One or more key combinations that produce the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

impl Binding {
    /// Create a binding from a list of key combinations.
    pub fn new(keys: Vec<KeyCombination>) -> Self {
        Self {
            keys,
            enabled: true,
        }
    }

    /// Create a binding for plain key codes with no modifiers.
    pub fn codes(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(codes.into_iter().map(KeyCombination::new).collect())
    }

    /// Add another key combination to this binding.
    pub fn with_key(mut self, key: KeyCombination) -> Self {
        self.keys.push(key);
        self
    }

    /// Return whether the given key event matches any of this binding's key
    /// combinations. Always `false` when the binding is disabled.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys
            .iter()
            .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    /// Whether the binding can ever match.
    pub fn is_bound(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }
}

/// Bindings for the four directions and activation.
///
/// The default keymap is what remote controls, game-pad d-pads and keyboards
/// have in common: arrow keys and Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavKeyMap {
    pub up: Binding,
    pub down: Binding,
    pub left: Binding,
    pub right: Binding,
    pub activate: Binding,
}

impl Default for NavKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::codes([KeyCode::Up]),
            down: Binding::codes([KeyCode::Down]),
            left: Binding::codes([KeyCode::Left]),
            right: Binding::codes([KeyCode::Right]),
            activate: Binding::codes([KeyCode::Enter]),
        }
    }
}

impl NavKeyMap {
    /// Default bindings plus `h`/`j`/`k`/`l`.
    pub fn with_vim_keys() -> Self {
        let base = Self::default();
        Self {
            up: base.up.with_key(KeyCombination::new(KeyCode::Char('k'))),
            down: base.down.with_key(KeyCombination::new(KeyCode::Char('j'))),
            left: base.left.with_key(KeyCombination::new(KeyCode::Char('h'))),
            right: base.right.with_key(KeyCombination::new(KeyCode::Char('l'))),
            activate: base.activate,
        }
    }

    /// The binding for a direction.
    pub fn direction(&self, direction: Direction) -> &Binding {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Map a raw key event onto a navigation input.
    ///
    /// Returns `None` for every key outside the five bindings and for
    /// key-release events, which some terminals report separately.
    pub fn classify(&self, event: &KeyEvent) -> Option<NavInput> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if self.activate.matches(event) {
            return Some(NavInput::Activate);
        }
        Direction::ALL
            .into_iter()
            .find(|d| self.direction(*d).matches(event))
            .map(NavInput::Move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_enter_by_default() {
        let map = NavKeyMap::default();
        assert_eq!(map.classify(&key(KeyCode::Up)), Some(NavInput::Move(Direction::Up)));
        assert_eq!(map.classify(&key(KeyCode::Down)), Some(NavInput::Move(Direction::Down)));
        assert_eq!(map.classify(&key(KeyCode::Left)), Some(NavInput::Move(Direction::Left)));
        assert_eq!(map.classify(&key(KeyCode::Right)), Some(NavInput::Move(Direction::Right)));
        assert_eq!(map.classify(&key(KeyCode::Enter)), Some(NavInput::Activate));
    }

    #[test]
    fn other_keys_are_not_classified() {
        let map = NavKeyMap::default();
        assert_eq!(map.classify(&key(KeyCode::Char('j'))), None);
        assert_eq!(map.classify(&key(KeyCode::Tab)), None);
        assert_eq!(map.classify(&key(KeyCode::Esc)), None);
    }

    #[test]
    fn vim_keys_extend_defaults() {
        let map = NavKeyMap::with_vim_keys();
        assert_eq!(map.classify(&key(KeyCode::Char('j'))), Some(NavInput::Move(Direction::Down)));
        assert_eq!(map.classify(&key(KeyCode::Char('l'))), Some(NavInput::Move(Direction::Right)));
        assert_eq!(map.classify(&key(KeyCode::Down)), Some(NavInput::Move(Direction::Down)));
    }

    #[test]
    fn release_events_are_ignored() {
        let map = NavKeyMap::default();
        let mut event = key(KeyCode::Down);
        event.kind = KeyEventKind::Release;
        assert_eq!(map.classify(&event), None);
    }

    #[test]
    fn disabled_binding_never_matches() {
        let mut map = NavKeyMap::default();
        map.activate.enabled = false;
        assert_eq!(map.classify(&key(KeyCode::Enter)), None);
        assert!(!map.activate.is_bound());
    }

    #[test]
    fn modifiers_must_be_held() {
        let binding = Binding::new(vec![KeyCombination::with_modifiers(
            KeyCode::Char('n'),
            KeyModifiers::CONTROL,
        )]);
        assert!(!binding.matches(&key(KeyCode::Char('n'))));
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)));
    }
}
