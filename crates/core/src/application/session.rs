// Annotation Session - one lemma being annotated by one user
//
// Owns the lemma plus the lemma-wide fields persisted alongside it, routes
// every mutation through `apply`, and records the activity log.

use super::activity_log::{actions, ActivityLog};
use super::command::{ChangeListener, CommandOutcome, LemmaChange, LemmaCommand};
use crate::domain::{split_lemma_key, ActivityEntry, Lemma, Submission};
use crate::error::{AppError, Result};
use crate::port::{LexicalResource, TimeProvider};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AnnotationSession {
    lemma: Lemma,
    word_known: bool,
    annotator_comments: String,
    activity: ActivityLog,
    listeners: Vec<Arc<dyn ChangeListener>>,
}

impl AnnotationSession {
    /// Opens a `word:pos` lemma from the lexical resource
    pub fn open(
        resource: &dyn LexicalResource,
        lemma_key: &str,
        clock: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let senses = resource.senses_for_lemma(lemma_key)?;
        let (word, pos) = split_lemma_key(lemma_key);
        Ok(Self::new(Lemma::new(word, pos, senses), clock))
    }

    pub fn new(lemma: Lemma, clock: Arc<dyn TimeProvider>) -> Self {
        let mut activity = ActivityLog::new(clock);
        activity.log(actions::LEMMA_INITIALISED, "", "");
        Self {
            lemma,
            word_known: true,
            annotator_comments: String::new(),
            activity,
            listeners: Vec::new(),
        }
    }

    pub fn lemma(&self) -> &Lemma {
        &self.lemma
    }

    /// Mutable access for reads that recompute derived state.
    ///
    /// Mutations made through this handle are neither logged nor broadcast.
    pub fn lemma_mut(&mut self) -> &mut Lemma {
        &mut self.lemma
    }

    pub fn lemma_key(&self) -> String {
        self.lemma.lemma_key()
    }

    pub fn word_known(&self) -> bool {
        self.word_known
    }

    pub fn annotator_comments(&self) -> &str {
        &self.annotator_comments
    }

    pub fn activity_log(&self) -> &[ActivityEntry] {
        self.activity.entries()
    }

    /// Feature strings this lemma adds to the annotator's frequency counts
    pub fn feature_list(&mut self) -> Vec<String> {
        self.lemma.get_feature_list()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    fn backend_id(&self, sense_id: &str) -> String {
        self.lemma
            .get_sense(sense_id)
            .map(|sense| sense.get_backend_sense_id())
            .unwrap_or_default()
    }

    fn notify(&self, change: &LemmaChange) {
        for listener in &self.listeners {
            listener.on_change(change);
        }
    }

    /// Applies one command; on error nothing changes and nobody is notified
    pub fn apply(&mut self, command: LemmaCommand) -> Result<CommandOutcome> {
        let (outcome, change) = match command {
            LemmaCommand::NewGhostSense => {
                let sense_id = self.lemma.new_ghost_sense();
                self.activity.log(actions::NEW_GHOST_SENSE, "", "");
                (
                    CommandOutcome::SenseCreated(sense_id.clone()),
                    LemmaChange::SenseAdded(sense_id),
                )
            }
            LemmaCommand::DeleteGhostSense { sense } => {
                let backend_id = self.backend_id(&sense);
                self.lemma.delete_ghost_sense(&sense)?;
                self.activity.log(actions::DELETE_VIRTUAL_SENSE, backend_id, "");
                (CommandOutcome::Done, LemmaChange::SenseRemoved(sense))
            }
            LemmaCommand::Split { sense } => {
                let backend_id = self.backend_id(&sense);
                let (literal, metaphorical) = self.lemma.split_mixed_sense(&sense)?;
                self.activity.log(actions::SPLIT, backend_id, "");
                (
                    CommandOutcome::SenseSplit {
                        literal: literal.clone(),
                        metaphorical: metaphorical.clone(),
                    },
                    LemmaChange::SenseSplit {
                        base: sense,
                        literal,
                        metaphorical,
                    },
                )
            }
            LemmaCommand::Merge { sense } => {
                let backend_id = self.backend_id(&sense);
                let base = self.lemma.merge_mixed_sense(&sense)?;
                self.activity.log(actions::REMERGE, backend_id, "");
                (
                    CommandOutcome::SenseMerged(base.clone()),
                    LemmaChange::SensesMerged { base },
                )
            }
            LemmaCommand::SetLabel { sense, label } => {
                self.lemma.set_label_str(&sense, &label)?;
                if let Some(kind) = self.lemma.get_sense(&sense).and_then(|s| s.kind()) {
                    let backend_id = self.backend_id(&sense);
                    self.activity
                        .log(kind.display_name().to_lowercase(), backend_id, "");
                }
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetResembles { sense, target } => {
                self.lemma.set_resembles(&sense, target.as_deref())?;
                if let Some(target_id) = target.as_deref() {
                    let object = self.backend_id(target_id);
                    let backend_id = self.backend_id(&sense);
                    self.activity.log(actions::CONNECT, backend_id, object);
                }
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetSubcore { sense, value } => {
                self.lemma.set_subcore(&sense, value)?;
                let action = if value {
                    actions::PROMOTE_TO_SECONDARY_CORE
                } else {
                    actions::DEMOTE_FROM_SECONDARY_CORE
                };
                let backend_id = self.backend_id(&sense);
                self.activity.log(action, backend_id, "");
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetSystematic { sense, value } => {
                self.lemma.set_systematic(&sense, value)?;
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetKnown { sense, known } => {
                self.lemma.set_known(&sense, known)?;
                if self.lemma.any_known() {
                    self.word_known = true;
                }
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetWordKnown { known } => {
                self.word_known = known;
                if !known {
                    self.lemma.make_all_senses_unknown();
                }
                (CommandOutcome::Done, LemmaChange::SessionUpdated)
            }
            LemmaCommand::SetDefinition { sense, text } => {
                self.lemma.set_definition_text(&sense, text)?;
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::AddFeature { sense } => {
                let feature_id = self.lemma.add_feature(&sense)?;
                let backend_id = self.backend_id(&sense);
                self.activity.log(actions::NEW_FEATURE, backend_id, "");
                (
                    CommandOutcome::FeatureAdded(feature_id),
                    LemmaChange::SenseUpdated(sense),
                )
            }
            LemmaCommand::SetFeatureText {
                sense,
                feature,
                text,
            } => {
                self.lemma.set_feature_text(&sense, &feature, text)?;
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::DeleteFeature { sense, feature } => {
                self.lemma.delete_feature(&sense, &feature)?;
                let backend_id = self.backend_id(&sense);
                self.activity
                    .log(actions::DELETE_FEATURE, backend_id, format!("feature_{}", feature));
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetFeatureLabel {
                sense,
                feature,
                label,
            } => {
                self.lemma.set_feature_label(&sense, &feature, label)?;
                if let Some(label) = label {
                    let backend_id = self.backend_id(&sense);
                    self.activity.log(
                        format!("label_feature_{}", label.as_str()),
                        backend_id,
                        format!("feature_{}", feature),
                    );
                }
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetTransformation {
                sense,
                feature,
                text,
            } => {
                self.lemma.set_transformation(&sense, &feature, text)?;
                (CommandOutcome::Done, LemmaChange::SenseUpdated(sense))
            }
            LemmaCommand::SetComments { text } => {
                self.annotator_comments = text;
                (CommandOutcome::Done, LemmaChange::SessionUpdated)
            }
        };

        self.notify(&change);
        Ok(outcome)
    }

    /// Validates the lemma and builds the record to persist.
    ///
    /// # Errors
    /// `IncompleteAnnotation` with every outstanding issue when the
    /// annotation is not complete; nothing is produced in that case.
    pub fn prepare_submission(&mut self) -> Result<Submission> {
        self.activity.log(actions::SUBMIT, "", "");

        let issues = self.lemma.issues();
        if issues.is_failed() {
            warn!(
                lemma = %self.lemma.lemma_key(),
                issues = issues.len(),
                "Submission blocked by incomplete annotation"
            );
            return Err(AppError::IncompleteAnnotation(issues));
        }

        let submission = Submission {
            word_known: self.word_known,
            senses: self.lemma.get_data(),
            annotator_comments: self.annotator_comments.clone(),
        };
        info!(
            lemma = %self.lemma.lemma_key(),
            senses = submission.senses.len(),
            "Submission prepared"
        );
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::{DictionarySense, Gloss, SenseInfo};
    use crate::domain::{FeatureLabel, SenseKind};
    use crate::port::time_provider::mocks::SteppingClock;
    use std::sync::Mutex;

    fn dictionary_sense(legacy_id: &str, gloss: &str) -> DictionarySense {
        DictionarySense {
            legacy_id: legacy_id.to_string(),
            info: SenseInfo {
                word: "bank".to_string(),
                concept_id: legacy_id.to_string(),
                synonyms: Vec::new(),
                examples: Vec::new(),
            },
            gloss: Gloss {
                string: gloss.to_string(),
                annotations: Vec::new(),
            },
        }
    }

    fn session() -> AnnotationSession {
        let lemma = Lemma::new(
            "bank",
            "noun",
            vec![
                dictionary_sense("bank%1:17:01::", "sloping land beside a body of water"),
                dictionary_sense("bank%1:14:00::", "a financial institution"),
            ],
        );
        AnnotationSession::new(lemma, Arc::new(SteppingClock::starting_at(0)))
    }

    fn label(sense: &str, label: &str) -> LemmaCommand {
        LemmaCommand::SetLabel {
            sense: sense.to_string(),
            label: label.to_string(),
        }
    }

    fn complete(session: &mut AnnotationSession) -> String {
        session.apply(label("1", "core")).unwrap();
        let CommandOutcome::FeatureAdded(feature) = session
            .apply(LemmaCommand::AddFeature {
                sense: "1".to_string(),
            })
            .unwrap()
        else {
            panic!("expected a feature id");
        };
        session
            .apply(LemmaCommand::SetFeatureText {
                sense: "1".to_string(),
                feature: feature.clone(),
                text: "holds things".to_string(),
            })
            .unwrap();
        session.apply(label("2", "metaphorical")).unwrap();
        session
            .apply(LemmaCommand::SetResembles {
                sense: "2".to_string(),
                target: Some("1".to_string()),
            })
            .unwrap();
        session
            .apply(LemmaCommand::SetFeatureLabel {
                sense: "2".to_string(),
                feature: feature.clone(),
                label: Some(FeatureLabel::Modified),
            })
            .unwrap();
        session
            .apply(LemmaCommand::SetTransformation {
                sense: "2".to_string(),
                feature: feature.clone(),
                text: "holds money".to_string(),
            })
            .unwrap();
        feature
    }

    #[test]
    fn test_actions_are_logged_with_backend_ids() {
        let mut session = session();
        complete(&mut session);

        let actions: Vec<&str> = session
            .activity_log()
            .iter()
            .map(|entry| entry.action.as_str())
            .collect();
        assert_eq!(
            actions,
            vec![
                "lemma_initialised",
                "core",
                "new_feature",
                "metaphorical",
                "connect",
                "label_feature_modified"
            ]
        );
        let connect = &session.activity_log()[4];
        assert_eq!(connect.subject, "wordnet:bank%1:14:00::");
        assert_eq!(connect.object, "wordnet:bank%1:17:01::");
    }

    #[test]
    fn test_clearing_resemblance_is_not_logged() {
        let mut session = session();
        complete(&mut session);
        let before = session.activity_log().len();

        session
            .apply(LemmaCommand::SetResembles {
                sense: "2".to_string(),
                target: None,
            })
            .unwrap();

        assert_eq!(session.activity_log().len(), before);
        assert_eq!(session.lemma_mut().resembles("2").unwrap(), None);
    }

    #[test]
    fn test_listeners_see_successful_changes_only() {
        let mut session = session();
        let seen: Arc<Mutex<Vec<LemmaChange>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(Arc::new(move |change: &LemmaChange| {
            sink.lock().unwrap().push(change.clone());
        }));

        session.apply(LemmaCommand::NewGhostSense).unwrap();
        assert!(session.apply(label("1", "banana")).is_err());
        session
            .apply(LemmaCommand::Split {
                sense: "1".to_string(),
            })
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], LemmaChange::SenseAdded("3".to_string()));
        assert!(matches!(&seen[1], LemmaChange::SenseSplit { base, .. } if base == "1"));
    }

    #[test]
    fn test_word_known_follows_senses() {
        let mut session = session();
        session
            .apply(LemmaCommand::SetWordKnown { known: false })
            .unwrap();
        assert!(!session.word_known());
        assert!(!session.lemma().any_known());

        session
            .apply(LemmaCommand::SetKnown {
                sense: "2".to_string(),
                known: true,
            })
            .unwrap();
        assert!(session.word_known());
    }

    #[test]
    fn test_incomplete_annotation_blocks_submission() {
        let mut session = session();
        session.apply(label("1", "core")).unwrap();

        match session.prepare_submission() {
            Err(AppError::IncompleteAnnotation(issues)) => {
                assert!(issues.mentions("bank(2) is unlabelled."));
            }
            other => panic!("expected incomplete annotation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_complete_submission() {
        let mut session = session();
        let feature = complete(&mut session);
        session
            .apply(LemmaCommand::SetComments {
                text: "tricky one".to_string(),
            })
            .unwrap();

        let submission = session.prepare_submission().unwrap();
        assert!(submission.word_known);
        assert_eq!(submission.annotator_comments, "tricky one");
        let metaphor = &submission.senses["wordnet:bank%1:14:00::"];
        assert_eq!(
            metaphor.features.get(&format!("{}(M)", feature)).map(String::as_str),
            Some("holds money")
        );
        assert_eq!(session.feature_list(), vec!["holds things", "holds money"]);
        assert_eq!(session.activity_log().last().unwrap().action, "submit");
    }

    #[test]
    fn test_set_label_kind_names() {
        let mut session = session();
        session.apply(label("1", "associated")).unwrap();
        assert_eq!(
            session.lemma().get_sense("1").unwrap().kind(),
            Some(SenseKind::Related)
        );
        assert_eq!(session.activity_log().last().unwrap().action, "associated");
    }
}
