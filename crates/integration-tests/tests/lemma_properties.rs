//! Lemma invariants and annotation scenarios across the public core API

mod common;

use chainnet_core::domain::{FeatureLabel, SenseKind};
use common::{assert_structurally_sound, bank};

/// Order and map stay in lockstep through a long mixed edit sequence
#[test]
fn test_order_and_map_stay_consistent() {
    let mut lemma = bank();
    assert_structurally_sound(&lemma);

    let ghost = lemma.new_ghost_sense();
    assert_structurally_sound(&lemma);
    lemma.split_mixed_sense("1").unwrap();
    assert_structurally_sound(&lemma);
    let second_ghost = lemma.new_ghost_sense();
    lemma.split_mixed_sense("2").unwrap();
    assert_structurally_sound(&lemma);
    lemma.delete_ghost_sense(&ghost).unwrap();
    assert_structurally_sound(&lemma);
    lemma.merge_mixed_sense("2A").unwrap();
    assert_structurally_sound(&lemma);
    lemma.merge_mixed_sense("1B").unwrap();
    assert_structurally_sound(&lemma);

    // Rejected operations leave the structure alone
    assert!(lemma.delete_ghost_sense("1").is_err());
    assert!(lemma.merge_mixed_sense("1").is_err());
    assert!(lemma.split_mixed_sense(&second_ghost).is_err());
    assert_structurally_sound(&lemma);

    assert_eq!(lemma.order(), &["1", "2", second_ghost.as_str()].map(String::from));
}

#[test]
fn test_sanify_twice_is_stable() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let feature = lemma.add_feature("1").unwrap();
    lemma.set_feature_text("1", &feature, "is sloped").unwrap();
    lemma.set_label("2", SenseKind::Metaphorical).unwrap();
    lemma.set_resembles("2", Some("1")).unwrap();
    lemma
        .set_feature_label("2", &feature, Some(FeatureLabel::Modified))
        .unwrap();

    lemma.sanify();
    let first = (lemma.get_data(), lemma.issues());
    lemma.sanify();
    let second = (lemma.get_data(), lemma.issues());
    assert_eq!(first, second);
}

#[test]
fn test_split_merge_round_trip_keeps_position() {
    let mut lemma = bank();
    lemma.new_ghost_sense();
    let before = lemma.order().to_vec();

    lemma.split_mixed_sense("2").unwrap();
    let merged = lemma.merge_mixed_sense("2A").unwrap();

    assert_eq!(merged, "2");
    assert_eq!(lemma.order(), before.as_slice());
    assert_eq!(lemma.get_sense("2").unwrap().kind(), None);
}

#[test]
fn test_deleting_resembled_ghost_heals_connection() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let conduit = lemma.new_ghost_sense();
    lemma.set_resembles(&conduit, Some("1")).unwrap();
    lemma.set_subcore(&conduit, true).unwrap();
    let feature = lemma.add_feature(&conduit).unwrap();
    lemma.set_feature_text(&conduit, &feature, "is shared").unwrap();

    lemma.set_label("2", SenseKind::Related).unwrap();
    lemma.set_resembles("2", Some(&conduit)).unwrap();
    assert_eq!(lemma.resembles("2").unwrap().as_deref(), Some(conduit.as_str()));
    assert!(lemma.feature_labels("2").unwrap().contains_key(&feature));

    lemma.delete_ghost_sense(&conduit).unwrap();
    lemma.sanify();

    assert_eq!(lemma.resembles("2").unwrap(), None);
    assert!(lemma.feature_labels("2").unwrap().is_empty());
}

#[test]
fn test_reclassifying_target_heals_connection() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let feature = lemma.add_feature("1").unwrap();
    lemma.set_label("2", SenseKind::Metaphorical).unwrap();
    lemma.set_resembles("2", Some("1")).unwrap();
    lemma
        .set_feature_label("2", &feature, Some(FeatureLabel::Lost))
        .unwrap();

    lemma.set_label("1", SenseKind::Metaphorical).unwrap();
    lemma.sanify();

    assert_eq!(lemma.resembles("2").unwrap(), None);
    assert!(lemma.feature_labels("2").unwrap().is_empty());
}

/// "not connected" iff no edge; "insufficient" iff neither kept+lost nor modified
#[test]
fn test_metaphor_validation_matches_labels() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let features: Vec<String> = (0..3)
        .map(|i| {
            let id = lemma.add_feature("1").unwrap();
            lemma.set_feature_text("1", &id, format!("trait {}", i)).unwrap();
            id
        })
        .collect();
    lemma.set_label("2", SenseKind::Metaphorical).unwrap();

    let not_connected = |issues: &chainnet_core::domain::Issues| issues.mentions("not connected");
    let insufficient =
        |issues: &chainnet_core::domain::Issues| issues.mentions("insufficient feature transformation");

    let issues = lemma.sense_issues("2").unwrap();
    assert!(not_connected(&issues) && insufficient(&issues));

    lemma.set_resembles("2", Some("1")).unwrap();
    let cases = [
        ([Some(FeatureLabel::Kept), Some(FeatureLabel::Kept), Some(FeatureLabel::Kept)], true),
        ([Some(FeatureLabel::Kept), Some(FeatureLabel::Lost), None], false),
        ([Some(FeatureLabel::Lost), Some(FeatureLabel::Lost), Some(FeatureLabel::Lost)], true),
        ([Some(FeatureLabel::Modified), None, None], false),
        ([None, None, None], true),
    ];
    for (labels, expect_insufficient) in cases {
        for (feature, label) in features.iter().zip(labels) {
            lemma.set_feature_label("2", feature, label).unwrap();
        }
        let issues = lemma.sense_issues("2").unwrap();
        assert!(!not_connected(&issues));
        assert_eq!(insufficient(&issues), expect_insufficient, "labels {:?}", labels);
    }
}

#[test]
fn test_modified_feature_view() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let f1 = lemma.add_feature("1").unwrap();
    lemma.set_feature_text("1", &f1, "is red").unwrap();
    lemma.set_label("2", SenseKind::Metaphorical).unwrap();
    lemma.set_resembles("2", Some("1")).unwrap();
    lemma
        .set_feature_label("2", &f1, Some(FeatureLabel::Modified))
        .unwrap();
    lemma.set_transformation("2", &f1, "is blue").unwrap();

    let features = lemma.features("2").unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[&format!("{}(M)", f1)], "is blue");
}

#[test]
fn test_bank_split_scenario() {
    let mut lemma = bank();
    lemma.split_mixed_sense("1").unwrap();

    assert_eq!(&lemma.order()[..2], &["1A".to_string(), "1B".to_string()]);
    assert_eq!(lemma.resembles("1B").unwrap().as_deref(), Some("1A"));
    assert_eq!(
        lemma.get_sense("1B").unwrap().label_options(),
        &[SenseKind::Metaphorical]
    );
    assert!(lemma.features("1B").unwrap().is_empty());

    let issues = lemma.issues();
    assert!(issues.mentions("bank(1B) has an insufficient feature transformation"));
    assert!(issues.mentions("bank(1A)'s definition is unmodified after split."));
    assert!(issues.mentions("depository_financial_institution(2) is unlabelled."));
}

#[test]
fn test_ghost_scenario() {
    let mut lemma = bank();
    let original = lemma.order().to_vec();

    let ghost = lemma.new_ghost_sense();
    assert_eq!(lemma.order(), &["1", "2", "3"].map(String::from));
    let sense = lemma.get_sense(&ghost).unwrap();
    assert!(sense.is_ghost());
    assert_eq!(sense.label_options(), &[SenseKind::Related]);
    assert_eq!(lemma.resembles(&ghost).unwrap(), None);

    lemma.delete_ghost_sense(&ghost).unwrap();
    assert_eq!(lemma.order(), original.as_slice());
}

#[test]
fn test_feature_list_counts_only_modifications_of_metaphors() {
    let mut lemma = bank();
    lemma.set_label("1", SenseKind::Literal).unwrap();
    let f1 = lemma.add_feature("1").unwrap();
    lemma.set_feature_text("1", &f1, "is sloped").unwrap();
    let f2 = lemma.add_feature("1").unwrap();
    lemma.set_feature_text("1", &f2, "holds water").unwrap();

    lemma.set_label("2", SenseKind::Metaphorical).unwrap();
    lemma.set_resembles("2", Some("1")).unwrap();
    lemma.set_feature_label("2", &f1, Some(FeatureLabel::Kept)).unwrap();
    lemma
        .set_feature_label("2", &f2, Some(FeatureLabel::Modified))
        .unwrap();
    lemma.set_transformation("2", &f2, "holds money").unwrap();

    // Kept features are in the view but not in the frequency list
    assert!(lemma.features("2").unwrap().contains_key(&f1));
    assert_eq!(
        lemma.get_feature_list(),
        vec!["is sloped", "holds water", "holds money"]
    );
}
