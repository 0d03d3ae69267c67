// Activity Log - timestamped record of user-visible actions

use crate::domain::ActivityEntry;
use crate::port::TimeProvider;
use std::sync::Arc;
use tracing::debug;

/// Action names written to the log
pub mod actions {
    pub const LEMMA_INITIALISED: &str = "lemma_initialised";
    pub const NEW_GHOST_SENSE: &str = "new_ghost_sense";
    pub const DELETE_VIRTUAL_SENSE: &str = "delete_virtual_sense";
    pub const SPLIT: &str = "split";
    pub const REMERGE: &str = "remerge";
    pub const PROMOTE_TO_SECONDARY_CORE: &str = "promote_to_secondary_core";
    pub const DEMOTE_FROM_SECONDARY_CORE: &str = "demote_from_secondary_core";
    pub const CONNECT: &str = "connect";
    pub const NEW_FEATURE: &str = "new_feature";
    pub const DELETE_FEATURE: &str = "delete_feature";
    pub const SUBMIT: &str = "submit";
}

pub struct ActivityLog {
    clock: Arc<dyn TimeProvider>,
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    pub fn log(&mut self, action: impl Into<String>, subject: impl Into<String>, object: impl Into<String>) {
        let entry = ActivityEntry::new(self.clock.now_millis(), action, subject, object);
        debug!(action = %entry.action, subject = %entry.subject, object = %entry.object, "Activity");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
