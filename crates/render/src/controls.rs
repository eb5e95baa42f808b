//! # Navigation controls
//!
//! Keyboard state reduced to two direction vectors, one for translation and
//! one for rotation, both in the observer's own frame. The frame update
//! reads only those vectors, never key events.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::error::ConfigError;

/// The twelve navigation actions, with their historical codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TranslateXPos = 0,
    TranslateXNeg = 1,
    TranslateZPos = 2,
    TranslateYPos = 3,
    TranslateYNeg = 4,
    TranslateZNeg = 5,
    RotateXPos = 6,
    RotateXNeg = 7,
    RotateYPos = 8,
    RotateYNeg = 9,
    RotateZPos = 10,
    RotateZNeg = 11,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::TranslateXPos,
        Action::TranslateXNeg,
        Action::TranslateZPos,
        Action::TranslateYPos,
        Action::TranslateYNeg,
        Action::TranslateZNeg,
        Action::RotateXPos,
        Action::RotateXNeg,
        Action::RotateYPos,
        Action::RotateYNeg,
        Action::RotateZPos,
        Action::RotateZNeg,
    ];

    #[must_use]
    pub fn code(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::TranslateXPos => "translate-x-pos",
            Action::TranslateXNeg => "translate-x-neg",
            Action::TranslateZPos => "translate-z-pos",
            Action::TranslateYPos => "translate-y-pos",
            Action::TranslateYNeg => "translate-y-neg",
            Action::TranslateZNeg => "translate-z-neg",
            Action::RotateXPos => "rotate-x-pos",
            Action::RotateXNeg => "rotate-x-neg",
            Action::RotateYPos => "rotate-y-pos",
            Action::RotateYNeg => "rotate-y-neg",
            Action::RotateZPos => "rotate-z-pos",
            Action::RotateZNeg => "rotate-z-neg",
        }
    }

    /// Whether this action translates (as opposed to rotates), and the
    /// signed unit axis it pushes along.
    fn axis(self) -> (bool, DVec3) {
        match self {
            Action::TranslateXPos => (true, DVec3::X),
            Action::TranslateXNeg => (true, DVec3::NEG_X),
            Action::TranslateYPos => (true, DVec3::Y),
            Action::TranslateYNeg => (true, DVec3::NEG_Y),
            Action::TranslateZPos => (true, DVec3::Z),
            Action::TranslateZNeg => (true, DVec3::NEG_Z),
            Action::RotateXPos => (false, DVec3::X),
            Action::RotateXNeg => (false, DVec3::NEG_X),
            Action::RotateYPos => (false, DVec3::Y),
            Action::RotateYNeg => (false, DVec3::NEG_Y),
            Action::RotateZPos => (false, DVec3::Z),
            Action::RotateZNeg => (false, DVec3::NEG_Z),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Action::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

/// Key code to action table for one keyboard layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    layout: &'static str,
    keys: HashMap<u32, Action>,
}

impl KeyBindings {
    /// American layout: `wasd`/`qe` rotate, arrows translate in the view
    /// plane and forwards, `'` and `/` move up and down.
    #[must_use]
    pub fn us() -> Self {
        Self::from_table(
            "us",
            &[
                (65, Action::RotateYPos),
                (68, Action::RotateYNeg),
                (87, Action::RotateXPos),
                (83, Action::RotateXNeg),
                (81, Action::RotateZPos),
                (69, Action::RotateZNeg),
                (38, Action::TranslateZNeg),
                (40, Action::TranslateZPos),
                (37, Action::TranslateXNeg),
                (39, Action::TranslateXPos),
                (222, Action::TranslateYPos),
                (191, Action::TranslateYNeg),
            ],
        )
    }

    /// French (AZERTY) layout.
    #[must_use]
    pub fn fr() -> Self {
        Self::from_table(
            "fr",
            &[
                (81, Action::RotateYPos),
                (68, Action::RotateYNeg),
                (90, Action::RotateXPos),
                (83, Action::RotateXNeg),
                (65, Action::RotateZPos),
                (69, Action::RotateZNeg),
                (38, Action::TranslateZNeg),
                (40, Action::TranslateZPos),
                (37, Action::TranslateXNeg),
                (39, Action::TranslateXPos),
                (165, Action::TranslateYPos),
                (61, Action::TranslateYNeg),
            ],
        )
    }

    /// # Errors
    ///
    /// [`ConfigError::UnknownKeyboard`] for anything but `us` or `fr`.
    pub fn for_layout(name: &str) -> Result<Self, ConfigError> {
        match name {
            "us" => Ok(Self::us()),
            "fr" => Ok(Self::fr()),
            other => Err(ConfigError::UnknownKeyboard(other.to_string())),
        }
    }

    fn from_table(layout: &'static str, table: &[(u32, Action)]) -> Self {
        Self {
            layout,
            keys: table.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &'static str {
        self.layout
    }

    #[must_use]
    pub fn action(&self, key_code: u32) -> Option<Action> {
        self.keys.get(&key_code).copied()
    }
}

/// Active actions and the direction vectors they add up to.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    bindings: KeyBindings,
    active: [bool; 12],
    translation: DVec3,
    rotation: DVec3,
}

impl Controls {
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            active: [false; 12],
            translation: DVec3::ZERO,
            rotation: DVec3::ZERO,
        }
    }

    /// Start `action`. Returns false if it was already active.
    pub fn press(&mut self, action: Action) -> bool {
        self.set(action, true)
    }

    /// Stop `action`. Returns false if it was not active.
    pub fn release(&mut self, action: Action) -> bool {
        self.set(action, false)
    }

    fn set(&mut self, action: Action, on: bool) -> bool {
        let slot = &mut self.active[action.code()];
        if *slot == on {
            return false;
        }
        *slot = on;
        let sign = if on { 1.0 } else { -1.0 };
        let (translate, axis) = action.axis();
        if translate {
            self.translation += sign * axis;
        } else {
            self.rotation += sign * axis;
        }
        true
    }

    /// Key press by code. Auto-repeat and unbound keys are ignored.
    pub fn key_down(&mut self, key_code: u32) -> bool {
        self.bindings.action(key_code).is_some_and(|a| self.press(a))
    }

    pub fn key_up(&mut self, key_code: u32) -> bool {
        self.bindings.action(key_code).is_some_and(|a| self.release(a))
    }

    #[must_use]
    pub fn is_active(&self, action: Action) -> bool {
        self.active[action.code()]
    }

    #[must_use]
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    #[must_use]
    pub fn rotation(&self) -> DVec3 {
        self.rotation
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(KeyBindings::us())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_historical_order() {
        for (code, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code(), code);
        }
        assert_eq!(Action::TranslateZPos.code(), 2);
        assert_eq!(Action::TranslateYPos.code(), 3);
    }

    #[test]
    fn test_parse_accepts_both_separators() {
        assert_eq!("translate-z-neg".parse::<Action>(), Ok(Action::TranslateZNeg));
        assert_eq!("ROTATE_Y_POS".parse::<Action>(), Ok(Action::RotateYPos));
        assert!("jump".parse::<Action>().is_err());
    }

    #[test]
    fn test_key_repeat_is_ignored() {
        let mut controls = Controls::default();
        assert!(controls.key_down(38));
        assert!(!controls.key_down(38));
        assert_eq!(controls.translation(), DVec3::NEG_Z);
        assert!(controls.key_up(38));
        assert!(!controls.key_up(38));
        assert_eq!(controls.translation(), DVec3::ZERO);
    }

    #[test]
    fn test_opposite_actions_cancel() {
        let mut controls = Controls::new(KeyBindings::fr());
        controls.key_down(90);
        controls.key_down(83);
        assert_eq!(controls.rotation(), DVec3::ZERO);
        assert!(controls.is_active(Action::RotateXPos) && controls.is_active(Action::RotateXNeg));
        assert!(!controls.key_down(12345));
    }
}
