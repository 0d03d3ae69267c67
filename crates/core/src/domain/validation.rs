// Annotation completeness checks
//
// Incomplete annotation is never an error: every problem becomes an issue and
// all issues of all senses are reported together.

use super::error::Result;
use super::feature::is_valid_feature;
use super::issues::Issues;
use super::label::FeatureLabel;
use super::lemma::Lemma;
use super::sense::SenseRole;
use std::collections::HashSet;

const FEATURE_RULES: &str =
    "features must not be blank and must not contain '.', '#', '$', '/', '[', or ']'";

impl Lemma {
    /// Issues of every sense, in row order
    pub fn issues(&mut self) -> Issues {
        self.sanify();
        let mut issues = Issues::new();
        for sense_id in self.order.clone() {
            if let Ok(sense_issues) = self.sense_issues(&sense_id) {
                issues.merge_issues(sense_issues);
            }
        }
        issues
    }

    /// Issues of one sense
    pub fn sense_issues(&mut self, sense_id: &str) -> Result<Issues> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        let outward_id = sense.get_outward_facing_id(&self.word);

        let mut issues = sense.definition().issues(&outward_id);
        if sense.kind().is_none() {
            issues.add_issue(format!("{} is unlabelled.", outward_id));
        }
        if sense.local_features().texts().any(|text| !is_valid_feature(text)) {
            issues.add_issue(format!(
                "{} has an invalid feature ({}).",
                outward_id, FEATURE_RULES
            ));
        }

        match sense.role() {
            SenseRole::Metaphorical(connection) => {
                let Some(target_id) = connection.resembles() else {
                    issues.add_issue(format!("{} is not connected to another sense.", outward_id));
                    issues.add_issue(insufficient_transformation(&outward_id));
                    return Ok(issues);
                };
                let target_features = self.effective_features(target_id, &mut HashSet::new());

                let mut found_kept = false;
                let mut found_lost = false;
                let mut found_modified = false;
                for (feature_id, label) in connection.feature_labels() {
                    match label {
                        Some(FeatureLabel::Kept) => found_kept = true,
                        Some(FeatureLabel::Lost) => found_lost = true,
                        Some(FeatureLabel::Modified) => {
                            found_modified = true;
                            let transformed = connection
                                .transformations()
                                .get(feature_id)
                                .map(String::as_str)
                                .unwrap_or_default();
                            if !is_valid_feature(transformed) {
                                issues.add_issue(format!(
                                    "{} has an invalid feature modification ({}).",
                                    outward_id, FEATURE_RULES
                                ));
                            }
                            if target_features.get(feature_id).map(String::as_str) == Some(transformed) {
                                issues.add_issue(format!(
                                    "{} has an invalid feature modification (modified features must be different).",
                                    outward_id
                                ));
                            }
                        }
                        None => issues.add_issue(format!(
                            "{} has features which are unlabelled (kept/lost/modified).",
                            outward_id
                        )),
                    }
                }
                if !((found_kept && found_lost) || found_modified) {
                    issues.add_issue(insufficient_transformation(&outward_id));
                }
            }
            SenseRole::Related { connection, .. } => {
                if connection.resembles().is_none() {
                    issues.add_issue(format!("{} is not connected to another sense.", outward_id));
                }
            }
            SenseRole::Literal | SenseRole::Unlabelled => {}
        }

        Ok(issues)
    }
}

fn insufficient_transformation(outward_id: &str) -> String {
    format!(
        "{} has an insufficient feature transformation (it must have either a modified feature, or a kept feature and a lost feature).",
        outward_id
    )
}
