//! Device permissions needed by the shell
//!
//! | Capability | Default | Used by     |
//! | Camera     | Ask     | QR scanner  |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionType {
    Camera,
}

impl PermissionType {
    pub fn default_state(&self) -> PermissionState {
        match self {
            PermissionType::Camera => PermissionState::Ask,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    /// Prompt user when requested
    Ask,
    Allow,
    Deny,
}

/// The operating system's permission dialog
pub trait PermissionPrompt {
    fn request(&mut self, permission_type: PermissionType) -> PermissionState;
}

#[derive(Debug, Default)]
pub struct PermissionManager {
    states: HashMap<PermissionType, PermissionState>,
}

impl PermissionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_permission(&self, permission_type: PermissionType) -> PermissionState {
        self.states
            .get(&permission_type)
            .copied()
            .unwrap_or_else(|| permission_type.default_state())
    }

    pub fn set_permission(&mut self, permission_type: PermissionType, state: PermissionState) {
        self.states.insert(permission_type, state);
    }

    /// Returns whether the permission is granted, asking the user when it is
    /// not. The OS decides whether a previously denied permission can be
    /// asked again, so the prompt is consulted every time.
    pub fn ensure(&mut self, permission_type: PermissionType, prompt: &mut dyn PermissionPrompt) -> bool {
        if self.get_permission(permission_type) == PermissionState::Allow {
            return true;
        }

        let state = prompt.request(permission_type);
        self.set_permission(permission_type, state);

        if state != PermissionState::Allow {
            tracing::info!(?permission_type, ?state, "Permission not granted");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedPrompt {
        answer: PermissionState,
        asked: usize,
    }

    impl PermissionPrompt for ScriptedPrompt {
        fn request(&mut self, _permission_type: PermissionType) -> PermissionState {
            self.asked += 1;
            self.answer
        }
    }

    #[test]
    fn test_default_asks() {
        let manager = PermissionManager::new();
        assert_eq!(manager.get_permission(PermissionType::Camera), PermissionState::Ask);
    }

    #[test]
    fn test_grant_is_remembered() {
        let mut manager = PermissionManager::new();
        let mut prompt = ScriptedPrompt {
            answer: PermissionState::Allow,
            asked: 0,
        };
        assert!(manager.ensure(PermissionType::Camera, &mut prompt));
        assert!(manager.ensure(PermissionType::Camera, &mut prompt));
        assert_eq!(prompt.asked, 1);
    }

    #[test]
    fn test_denial_returns_false_and_asks_again_next_time() {
        let mut manager = PermissionManager::new();
        let mut prompt = ScriptedPrompt {
            answer: PermissionState::Deny,
            asked: 0,
        };
        assert!(!manager.ensure(PermissionType::Camera, &mut prompt));
        assert_eq!(manager.get_permission(PermissionType::Camera), PermissionState::Deny);

        prompt.answer = PermissionState::Allow;
        assert!(manager.ensure(PermissionType::Camera, &mut prompt));
        assert_eq!(prompt.asked, 2);
    }
}
