use super::events::GameAction;
use crate::models::engine::Direction;
use std::collections::HashMap;

/// Resolves raw input tokens (one word typed on the console, or a key name
/// forwarded by a host) into game actions.
pub struct InputManager {
    bindings: HashMap<String, GameAction>,
}

impl InputManager {
    pub fn new() -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
        };
        manager.load_default_bindings();
        manager
    }

    /// Returns `None` for unbound tokens; they are ignored upstream.
    pub fn process(&self, token: &str) -> Option<GameAction> {
        let key = token.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(action) = self.bindings.get(&key) {
            return Some(*action);
        }

        // "p3" / "push3": push coming from NPC #3
        let digits = key
            .strip_prefix("push")
            .or_else(|| key.strip_prefix('p'))?;
        digits
            .parse::<u32>()
            .ok()
            .map(|source_id| GameAction::Push { source_id })
    }

    /// Binds `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: &str, action: GameAction) {
        self.bindings.insert(key.to_ascii_lowercase(), action);
    }

    fn load_default_bindings(&mut self) {
        // Arrows: names, WASD and vim keys
        for dir in Direction::ALL {
            self.bind(&dir.to_string(), GameAction::Arrow(dir));
        }
        self.bind("a", GameAction::Arrow(Direction::Left));
        self.bind("w", GameAction::Arrow(Direction::Up));
        self.bind("s", GameAction::Arrow(Direction::Down));
        self.bind("d", GameAction::Arrow(Direction::Right));
        self.bind("h", GameAction::Arrow(Direction::Left));
        self.bind("k", GameAction::Arrow(Direction::Up));
        self.bind("j", GameAction::Arrow(Direction::Down));
        self.bind("l", GameAction::Arrow(Direction::Right));

        self.bind("p", GameAction::Push { source_id: 0 });
        self.bind("push", GameAction::Push { source_id: 0 });

        self.bind("x", GameAction::AbortFight);
        self.bind("abort", GameAction::AbortFight);
        self.bind("q", GameAction::Quit);
        self.bind("quit", GameAction::Quit);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_bindings() {
        let input = InputManager::new();
        assert_eq!(input.process("W"), Some(GameAction::Arrow(Direction::Up)));
        assert_eq!(input.process("left"), Some(GameAction::Arrow(Direction::Left)));
        assert_eq!(input.process("j"), Some(GameAction::Arrow(Direction::Down)));
        assert_eq!(input.process("q"), Some(GameAction::Quit));
    }

    #[test]
    fn push_carries_source_id() {
        let input = InputManager::new();
        assert_eq!(input.process("p"), Some(GameAction::Push { source_id: 0 }));
        assert_eq!(input.process("p7"), Some(GameAction::Push { source_id: 7 }));
        assert_eq!(input.process("push12"), Some(GameAction::Push { source_id: 12 }));
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let input = InputManager::new();
        assert_eq!(input.process("diagonal"), None);
        assert_eq!(input.process("pz"), None);
        assert_eq!(input.process("   "), None);
    }

    #[test]
    fn rebinding_overrides_default() {
        let mut input = InputManager::new();
        input.bind("w", GameAction::Arrow(Direction::Right));
        assert_eq!(input.process("w"), Some(GameAction::Arrow(Direction::Right)));
    }
}
