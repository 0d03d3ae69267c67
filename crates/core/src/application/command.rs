// Command interface of an annotation session

use crate::domain::{FeatureId, FeatureLabel, SenseId};
use serde::{Deserialize, Serialize};

/// One mutating operation on a lemma under annotation.
///
/// Serializable so sessions can be driven from scripts or a remote UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LemmaCommand {
    NewGhostSense,
    DeleteGhostSense {
        sense: SenseId,
    },
    Split {
        sense: SenseId,
    },
    Merge {
        sense: SenseId,
    },
    /// Label as text (`core`, `metaphorical`, `associated`, ...)
    SetLabel {
        sense: SenseId,
        label: String,
    },
    SetResembles {
        sense: SenseId,
        #[serde(default)]
        target: Option<SenseId>,
    },
    SetSubcore {
        sense: SenseId,
        value: bool,
    },
    SetSystematic {
        sense: SenseId,
        #[serde(default)]
        value: Option<bool>,
    },
    SetKnown {
        sense: SenseId,
        known: bool,
    },
    SetWordKnown {
        known: bool,
    },
    SetDefinition {
        sense: SenseId,
        text: String,
    },
    AddFeature {
        sense: SenseId,
    },
    SetFeatureText {
        sense: SenseId,
        feature: FeatureId,
        text: String,
    },
    DeleteFeature {
        sense: SenseId,
        feature: FeatureId,
    },
    SetFeatureLabel {
        sense: SenseId,
        feature: FeatureId,
        #[serde(default)]
        label: Option<FeatureLabel>,
    },
    SetTransformation {
        sense: SenseId,
        feature: FeatureId,
        text: String,
    },
    SetComments {
        text: String,
    },
}

/// Result of a successfully applied command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    SenseCreated(SenseId),
    SenseSplit { literal: SenseId, metaphorical: SenseId },
    SenseMerged(SenseId),
    FeatureAdded(FeatureId),
}

/// Notification sent to subscribers after every successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LemmaChange {
    SenseAdded(SenseId),
    SenseRemoved(SenseId),
    SenseSplit {
        base: SenseId,
        literal: SenseId,
        metaphorical: SenseId,
    },
    SensesMerged {
        base: SenseId,
    },
    /// Any per-sense edit; derived state of other senses may have changed too
    SenseUpdated(SenseId),
    /// Lemma-wide fields (word known, comments)
    SessionUpdated,
}

/// Subscriber for lemma changes (e.g. a renderer)
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, change: &LemmaChange);
}

impl<F> ChangeListener for F
where
    F: Fn(&LemmaChange) + Send + Sync,
{
    fn on_change(&self, change: &LemmaChange) {
        self(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_json_shape() {
        let command: LemmaCommand = serde_json::from_value(json!({
            "op": "set_resembles",
            "sense": "2",
            "target": "1"
        }))
        .unwrap();
        assert_eq!(
            command,
            LemmaCommand::SetResembles {
                sense: "2".to_string(),
                target: Some("1".to_string())
            }
        );

        let command: LemmaCommand =
            serde_json::from_value(json!({"op": "set_feature_label", "sense": "2", "feature": "1:0", "label": "kept"}))
                .unwrap();
        assert!(matches!(
            command,
            LemmaCommand::SetFeatureLabel { label: Some(FeatureLabel::Kept), .. }
        ));
    }

    #[test]
    fn test_missing_target_clears_resemblance() {
        let command: LemmaCommand =
            serde_json::from_value(json!({"op": "set_resembles", "sense": "2"})).unwrap();
        assert_eq!(
            command,
            LemmaCommand::SetResembles {
                sense: "2".to_string(),
                target: None
            }
        );
    }
}
