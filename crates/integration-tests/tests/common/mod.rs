//! Shared fixtures: a small `bank:noun` / `run:verb` lexical resource

#![allow(dead_code)]

use chainnet_core::domain::{Gloss, Lemma, ResourceBundle, SenseInfo, Synonym};
use chainnet_core::port::LexicalResource;
use serde_json::json;
use std::path::Path;

pub const BANK: &str = "bank:noun";
pub const RUN: &str = "run:verb";

fn info(word: &str, concept_id: &str, sense_id: &str, examples: &[&str]) -> SenseInfo {
    SenseInfo {
        word: word.to_string(),
        concept_id: concept_id.to_string(),
        synonyms: vec![Synonym {
            string: word.to_string(),
            sense_id: sense_id.to_string(),
        }],
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

fn gloss(text: &str) -> Gloss {
    Gloss {
        string: text.to_string(),
        annotations: Vec::new(),
    }
}

pub fn bundle() -> ResourceBundle {
    let mut bundle = ResourceBundle::default();
    bundle.lemmas_to_senses.insert(
        BANK.to_string(),
        vec!["bank%1:17:01::".to_string(), "bank%1:14:00::".to_string()],
    );
    bundle
        .lemmas_to_senses
        .insert(RUN.to_string(), vec!["run%2:38:00::".to_string()]);

    bundle.senses_to_info.insert(
        "bank%1:17:01::".to_string(),
        info("bank", "09213565-n", "bank%1:17:01::", &["they pulled the canoe up on the bank"]),
    );
    bundle.senses_to_info.insert(
        "bank%1:14:00::".to_string(),
        info("depository_financial_institution", "08420278-n", "bank%1:14:00::", &[]),
    );
    bundle.senses_to_info.insert(
        "run%2:38:00::".to_string(),
        info("run", "01926311-v", "run%2:38:00::", &["Don't run--you'll be out of breath"]),
    );

    bundle
        .concepts_to_definitions
        .insert("09213565-n".to_string(), gloss("sloping land beside a body of water"));
    bundle.concepts_to_definitions.insert(
        "08420278-n".to_string(),
        gloss("a financial institution that accepts deposits"),
    );
    bundle
        .concepts_to_definitions
        .insert("01926311-v".to_string(), gloss("move fast by using one's feet"));
    bundle
}

pub fn bank() -> Lemma {
    let senses = bundle().senses_for_lemma(BANK).unwrap();
    Lemma::new("bank", "noun", senses)
}

/// Writes the fixture resource (plus a queue file) as JSON into `dir`
pub fn write_resource_dir(dir: &Path) {
    let bundle = bundle();
    let files = [
        ("lemmas_to_senses.json", serde_json::to_value(&bundle.lemmas_to_senses).unwrap()),
        ("senses_to_info.json", serde_json::to_value(&bundle.senses_to_info).unwrap()),
        (
            "concepts_to_definitions.json",
            serde_json::to_value(&bundle.concepts_to_definitions).unwrap(),
        ),
        ("queues.json", json!({"pilot": [BANK, RUN]})),
        ("default_features.json", json!({"is liquid": 1, "is alive": 4})),
    ];
    for (name, value) in files {
        std::fs::write(dir.join(name), value.to_string()).unwrap();
    }
}

/// Every display id in the order has exactly one sense, and nothing else does
pub fn assert_structurally_sound(lemma: &Lemma) {
    assert_eq!(lemma.all_senses().len(), lemma.order().len());
    let mut ids: Vec<&String> = lemma.order().iter().collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), lemma.order().len(), "duplicate ids in {:?}", lemma.order());
    for id in lemma.order() {
        assert!(lemma.contains(id));
        assert_eq!(lemma.get_sense(id).unwrap().display_id(), id);
    }
}
