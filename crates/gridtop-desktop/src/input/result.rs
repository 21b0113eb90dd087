//! Input result type

use serde::Serialize;

use crate::item::ItemId;

/// Result of input handling
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was handled internally
    Handled,
    /// Input was not handled (pass through)
    Unhandled,
    /// A tap on an app or folder; the host should open it
    Launch {
        /// Item that was tapped
        item_id: ItemId,
    },
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled | InputResult::Launch { .. })
    }

    /// Item to open, if this is a launch
    #[inline]
    pub fn launched(&self) -> Option<&str> {
        match self {
            InputResult::Launch { item_id } => Some(item_id.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(InputResult::Launch { item_id: "finder".into() }).unwrap();
        assert_eq!(json["type"], "launch");
        assert_eq!(json["item_id"], "finder");
        assert_eq!(serde_json::to_value(InputResult::Unhandled).unwrap()["type"], "unhandled");
    }

    #[test]
    fn test_predicates() {
        assert!(InputResult::Handled.is_handled());
        assert!(!InputResult::Unhandled.is_handled());
        let launch = InputResult::Launch { item_id: "notes".into() };
        assert!(launch.is_handled());
        assert_eq!(launch.launched(), Some("notes"));
    }
}
