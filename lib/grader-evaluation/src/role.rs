use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
    #[default]
    Other,
}

impl Role {
    /// Roles that leave their lane to help elsewhere
    pub fn is_roamer(self) -> bool {
        matches!(self, Role::Mid | Role::Support)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "support",
            Role::Other => "other",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        // Match to values from Riot API
        match value.trim().to_lowercase().as_str() {
            "top" => Role::Top,
            "jungle" => Role::Jungle,
            "middle" | "mid" => Role::Mid,
            "bottom" | "bot" | "adc" => Role::Bot,
            "utility" | "support" => Role::Support,
            _ => Role::Other,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
