//! Facing-direction heuristics for camera labels.
//!
//! Platforms expose no capability query for which way a camera points,
//! so the only signal is the free-text label. Matching is case-sensitive
//! substring search against vendor conventions such as
//! `"camera2 0, facing back"` or `"Front Camera"`. Labels are not
//! guaranteed to carry any of these tokens.

use serde::{Deserialize, Serialize};

/// Tokens that mark a user-facing camera.
pub const FRONT_TOKENS: [&str; 4] = ["front", "facing", "user", "0"];

/// Tokens that mark an environment-facing camera.
pub const BACK_TOKENS: [&str; 4] = ["back", "rear", "environment", "1"];

/// Facing classification derived from a label.
///
/// Both flags may be set for labels such as `"camera 01"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    /// Label contains a front token.
    pub is_front: bool,
    /// Label contains a back token.
    pub is_back: bool,
}

impl Facing {
    /// True when the label matched neither token set.
    pub fn is_unclassified(&self) -> bool {
        !self.is_front && !self.is_back
    }
}

/// Classifies a camera label by facing direction.
pub fn classify_label(label: &str) -> Facing {
    Facing {
        is_front: FRONT_TOKENS.iter().any(|token| label.contains(token)),
        is_back: BACK_TOKENS.iter().any(|token| label.contains(token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_front_and_back_pair() {
        let front = classify_label("Front Camera 0");
        let back = classify_label("Back Camera 1");

        assert_eq!(front, Facing { is_front: true, is_back: false });
        assert_eq!(back, Facing { is_front: false, is_back: true });
    }

    #[test]
    fn test_bare_index_labels() {
        assert!(classify_label("0").is_front);
        assert!(classify_label("1").is_back);
    }

    #[test]
    fn test_keyword_labels() {
        assert!(classify_label("facing user").is_front);
        assert!(classify_label("rear wide").is_back);
        assert!(classify_label("environment").is_back);
    }

    #[test]
    fn test_unclassified_label() {
        let facing = classify_label("HD Webcam C920");
        assert!(facing.is_unclassified());
        assert!(classify_label("").is_unclassified());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(classify_label("FRONT").is_unclassified());
    }

    proptest! {
        #[test]
        fn prop_back_token_sets_back(prefix in "[a-z ]{0,8}", suffix in "[a-z ]{0,8}", idx in 0usize..4) {
            let label = format!("{}{}{}", prefix, BACK_TOKENS[idx], suffix);
            prop_assert!(classify_label(&label).is_back);
        }

        #[test]
        fn prop_front_token_sets_front(prefix in "[a-z ]{0,8}", suffix in "[a-z ]{0,8}", idx in 0usize..4) {
            let label = format!("{}{}{}", prefix, FRONT_TOKENS[idx], suffix);
            prop_assert!(classify_label(&label).is_front);
        }

        #[test]
        fn prop_flags_follow_token_presence(label in "[A-Za-z0-9 ]{0,24}") {
            let facing = classify_label(&label);
            let has_front = FRONT_TOKENS.iter().any(|t| label.contains(t));
            let has_back = BACK_TOKENS.iter().any(|t| label.contains(t));
            prop_assert_eq!(facing.is_front, has_front);
            prop_assert_eq!(facing.is_back, has_back);
        }
    }
}
