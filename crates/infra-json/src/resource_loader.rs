// Lexical resource loader (three JSON files in one directory)

use crate::fs::read_json_opt;
use chainnet_core::domain::ResourceBundle;
use chainnet_core::error::{AppError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub const LEMMAS_FILE: &str = "lemmas_to_senses.json";
pub const SENSES_FILE: &str = "senses_to_info.json";
pub const CONCEPTS_FILE: &str = "concepts_to_definitions.json";
pub const QUEUES_FILE: &str = "queues.json";

async fn read_required<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    read_json_opt(&path)
        .await?
        .ok_or_else(|| AppError::Resource(format!("missing resource file {}", path.display())))
}

/// Loads `lemmas_to_senses.json`, `senses_to_info.json` and
/// `concepts_to_definitions.json` from `dir`
pub async fn load_resource_bundle(dir: &Path) -> Result<ResourceBundle> {
    let bundle = ResourceBundle {
        lemmas_to_senses: read_required(dir, LEMMAS_FILE).await?,
        senses_to_info: read_required(dir, SENSES_FILE).await?,
        concepts_to_definitions: read_required(dir, CONCEPTS_FILE).await?,
    };

    info!(
        dir = %dir.display(),
        lemmas = bundle.lemmas_to_senses.len(),
        senses = bundle.senses_to_info.len(),
        concepts = bundle.concepts_to_definitions.len(),
        "Lexical resource loaded"
    );
    Ok(bundle)
}

/// Loads `queues.json` (queue id -> ordered lemma keys); empty if absent
pub async fn load_queues(dir: &Path) -> Result<HashMap<String, Vec<String>>> {
    Ok(read_json_opt(&dir.join(QUEUES_FILE)).await?.unwrap_or_default())
}
