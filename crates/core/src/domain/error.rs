// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Sense not found: {0}")]
    SenseNotFound(String),

    #[error("Sense {0} is not a virtual sense and cannot be deleted")]
    NotAGhost(String),

    #[error("Sense {0} is already split")]
    AlreadyMixed(String),

    #[error("Virtual sense {0} cannot be split")]
    GhostNotSplittable(String),

    #[error("Sense {0} is not part of a split pair")]
    NotMixed(String),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Label {label} is not offered for sense {sense_id}")]
    LabelNotOffered { sense_id: String, label: String },

    #[error("Sense {0} does not connect to other senses")]
    NotConnectable(String),

    #[error("Sense {0} is not an associated sense")]
    NotRelated(String),

    #[error("Sense {0} has a fixed connection")]
    FixedConnection(String),

    #[error("Sense {0} cannot be a conduit")]
    SubcoreNotApplicable(String),

    #[error("Definition of sense {0} is not editable")]
    DefinitionNotEditable(String),

    #[error("Feature {feature_id} not found on sense {sense_id}")]
    FeatureNotFound { sense_id: String, feature_id: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
