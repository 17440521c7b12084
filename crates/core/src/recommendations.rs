//! Rule-based clinical recommendation engine.
//!
//! Given the normalized features, the binary prediction, and the predicted
//! probability, deterministically derives a categorized set of clinical
//! recommendation strings. Pure: no I/O, no cross-record state, identical
//! inputs always yield identical output.
//!
//! Rule order is load-bearing. The prediction branch runs first, then each
//! feature-triggered rule fires independently in a fixed sequence, appending
//! to the category vectors in evaluation order.

use api_shared::RecommendationSet;

use crate::record::FeatureVector;

/// Derives the recommendation set for one scored record.
///
/// All five categories are always present in the result, possibly empty.
/// Duplicates are allowed: a feature-triggered rule may repeat the theme of a
/// prediction-branch entry.
pub fn generate_recommendations(
    features: &FeatureVector,
    prediction: u8,
    probability: f64,
) -> RecommendationSet {
    let mut recs = RecommendationSet::default();

    // Risk-based recommendations
    if prediction == 1 {
        if probability > 0.7 {
            extend(
                &mut recs.urgent_actions,
                [
                    "Immediate cardiology consultation (within 48 hours)",
                    "Daily symptom journal",
                    "Fluid restriction (<2L/day)",
                    "Daily weight monitoring",
                ],
            );
            extend(
                &mut recs.medications,
                [
                    "Start ACE inhibitor/ARB",
                    "Start beta-blocker",
                    "Consider diuretic",
                ],
            );
        } else if probability > 0.4 {
            recs.referrals
                .push("Cardiology consultation within 2 weeks".into());
            extend(
                &mut recs.medications,
                [
                    "Consider statin therapy",
                    "Antihypertensive if BP > 130/80",
                ],
            );
            extend(
                &mut recs.monitoring,
                ["Bi-weekly BP checks", "Monthly lipid panel"],
            );
        }

        extend(
            &mut recs.lifestyle,
            [
                "Sodium restriction (<2g/day)",
                "Cardiac rehabilitation program",
                "Alcohol moderation",
            ],
        );
        recs.monitoring.push("BNP/NT-proBNP testing".into());
    } else {
        extend(
            &mut recs.lifestyle,
            [
                "Heart-healthy diet (Mediterranean or DASH)",
                "150 minutes moderate exercise weekly",
                "Annual cardiac check-up",
                "Smoking cessation if applicable",
            ],
        );
    }

    // Feature-specific recommendations
    if features.resting_bp >= 140 {
        recs.medications.push("Antihypertensive medication".into());
        recs.lifestyle.push("DASH diet specifically".into());
    }

    if features.cholesterol >= 240 {
        recs.medications.push("High-intensity statin".into());
        recs.monitoring.push("Lipid panel in 4 weeks".into());
    }

    if features.fasting_bs == 1 {
        recs.medications.push("SGLT2 inhibitor".into());
        recs.monitoring.push("HbA1c every 3 months".into());
    }

    if features.exercise_angina == "Y" {
        extend(
            &mut recs.lifestyle,
            ["Avoid strenuous exercise", "Cardiac-supervised exercise only"],
        );
        recs.referrals.push("Exercise stress test".into());
    }

    if features.resting_ecg == "LVH" || features.resting_ecg == "ST" {
        recs.referrals.push("Echocardiogram".into());
        recs.monitoring.push("ECG every 6 months".into());
    }

    if features.age >= 65 {
        recs.medications.push("Renal function monitoring".into());
        recs.monitoring.push("Metabolic panel monthly".into());
    }

    if features.sex == "F" {
        recs.monitoring.push("Anemia screening".into());
    } else {
        recs.monitoring.push("PSA testing if >50".into());
    }

    if features.oldpeak > 2.0 {
        recs.urgent_actions.push("Urgent coronary angiography".into());
    }

    if features.st_slope == "Down" {
        recs.medications.push("Antiplatelet therapy".into());
        recs.referrals.push("Nuclear stress test".into());
    }

    recs
}

fn extend<const N: usize>(category: &mut Vec<String>, entries: [&str; N]) {
    category.extend(entries.into_iter().map(String::from));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A record that trips none of the feature-specific rules except the
    /// mandatory sex rule.
    fn quiet_features() -> FeatureVector {
        FeatureVector {
            age: 45,
            sex: "M".into(),
            chest_pain: "ATA".into(),
            resting_bp: 120,
            cholesterol: 180,
            fasting_bs: 0,
            resting_ecg: "Normal".into(),
            max_hr: 160,
            exercise_angina: "N".into(),
            oldpeak: 0.5,
            st_slope: "Up".into(),
        }
    }

    #[test]
    fn test_urgent_branch_counts() {
        let recs = generate_recommendations(&quiet_features(), 1, 0.85);
        assert_eq!(recs.urgent_actions.len(), 4);
        assert_eq!(recs.medications.len(), 3);
        assert_eq!(
            recs.urgent_actions[0],
            "Immediate cardiology consultation (within 48 hours)"
        );
        assert_eq!(recs.medications[0], "Start ACE inhibitor/ARB");
        // Common positive-prediction entries still fire.
        assert_eq!(
            recs.lifestyle,
            vec![
                "Sodium restriction (<2g/day)",
                "Cardiac rehabilitation program",
                "Alcohol moderation"
            ]
        );
        assert_eq!(recs.monitoring, vec!["BNP/NT-proBNP testing", "PSA testing if >50"]);
    }

    #[test]
    fn test_moderate_branch_refers_to_cardiology_within_two_weeks() {
        let recs = generate_recommendations(&quiet_features(), 1, 0.5);
        assert_eq!(recs.referrals, vec!["Cardiology consultation within 2 weeks"]);
        assert_eq!(
            recs.medications,
            vec!["Consider statin therapy", "Antihypertensive if BP > 130/80"]
        );
        assert!(recs.urgent_actions.is_empty());
        assert_eq!(recs.monitoring[0], "Bi-weekly BP checks");
        assert_eq!(recs.monitoring[1], "Monthly lipid panel");
        assert_eq!(recs.monitoring[2], "BNP/NT-proBNP testing");
    }

    #[test]
    fn test_low_probability_positive_still_gets_lifestyle_and_bnp() {
        let recs = generate_recommendations(&quiet_features(), 1, 0.3);
        assert!(recs.referrals.is_empty());
        assert!(recs.urgent_actions.is_empty());
        assert_eq!(recs.lifestyle.len(), 3);
        assert_eq!(recs.monitoring[0], "BNP/NT-proBNP testing");
    }

    #[test]
    fn test_negative_prediction_baseline() {
        let recs = generate_recommendations(&quiet_features(), 0, 0.1);
        assert_eq!(
            recs.lifestyle,
            vec![
                "Heart-healthy diet (Mediterranean or DASH)",
                "150 minutes moderate exercise weekly",
                "Annual cardiac check-up",
                "Smoking cessation if applicable"
            ]
        );
        assert!(recs.urgent_actions.is_empty());
        assert!(recs.referrals.is_empty());
        assert!(recs.medications.is_empty());
        assert_eq!(recs.monitoring, vec!["PSA testing if >50"]);
    }

    #[test]
    fn test_feature_rules_fire_regardless_of_prediction_branch() {
        let mut features = quiet_features();
        features.resting_bp = 150;
        features.cholesterol = 250;
        features.fasting_bs = 1;
        let recs = generate_recommendations(&features, 0, 0.1);
        assert!(recs.medications.contains(&"Antihypertensive medication".to_string()));
        assert!(recs.medications.contains(&"High-intensity statin".to_string()));
        assert!(recs.medications.contains(&"SGLT2 inhibitor".to_string()));
        assert!(recs.lifestyle.contains(&"DASH diet specifically".to_string()));
        assert!(recs.monitoring.contains(&"Lipid panel in 4 weeks".to_string()));
        assert!(recs.monitoring.contains(&"HbA1c every 3 months".to_string()));
    }

    #[test]
    fn test_exercise_angina_and_ecg_rules() {
        let mut features = quiet_features();
        features.exercise_angina = "Y".into();
        features.resting_ecg = "LVH".into();
        let recs = generate_recommendations(&features, 0, 0.1);
        assert!(recs.lifestyle.contains(&"Avoid strenuous exercise".to_string()));
        assert!(recs
            .lifestyle
            .contains(&"Cardiac-supervised exercise only".to_string()));
        assert_eq!(recs.referrals, vec!["Exercise stress test", "Echocardiogram"]);
        assert!(recs.monitoring.contains(&"ECG every 6 months".to_string()));
    }

    #[test]
    fn test_sex_rule_is_mutually_exclusive() {
        let mut features = quiet_features();
        features.sex = "F".into();
        let female = generate_recommendations(&features, 0, 0.1);
        assert!(female.monitoring.contains(&"Anemia screening".to_string()));
        assert!(!female.monitoring.contains(&"PSA testing if >50".to_string()));

        features.sex = "M".into();
        let male = generate_recommendations(&features, 0, 0.1);
        assert!(male.monitoring.contains(&"PSA testing if >50".to_string()));
        assert!(!male.monitoring.contains(&"Anemia screening".to_string()));

        // Unexpected category values fall into the non-female arm.
        features.sex = "unknown".into();
        let other = generate_recommendations(&features, 0, 0.1);
        assert!(other.monitoring.contains(&"PSA testing if >50".to_string()));
    }

    #[test]
    fn test_oldpeak_urgent_rule_co_occurs_with_urgent_branch() {
        let mut features = quiet_features();
        features.oldpeak = 2.5;
        let recs = generate_recommendations(&features, 1, 0.85);
        assert_eq!(recs.urgent_actions.len(), 5);
        assert_eq!(recs.urgent_actions[4], "Urgent coronary angiography");

        // And fires on its own without the urgent branch.
        let recs = generate_recommendations(&features, 1, 0.5);
        assert_eq!(recs.urgent_actions, vec!["Urgent coronary angiography"]);
    }

    #[test]
    fn test_downsloping_st_segment_rules() {
        let mut features = quiet_features();
        features.st_slope = "Down".into();
        let recs = generate_recommendations(&features, 0, 0.1);
        assert!(recs.medications.contains(&"Antiplatelet therapy".to_string()));
        assert_eq!(recs.referrals, vec!["Nuclear stress test"]);
    }

    #[test]
    fn test_elderly_rule() {
        let mut features = quiet_features();
        features.age = 65;
        let recs = generate_recommendations(&features, 0, 0.1);
        assert!(recs.medications.contains(&"Renal function monitoring".to_string()));
        assert!(recs.monitoring.contains(&"Metabolic panel monthly".to_string()));
    }

    #[test]
    fn test_engine_is_pure() {
        let mut features = quiet_features();
        features.resting_bp = 160;
        features.oldpeak = 2.2;
        let first = generate_recommendations(&features, 1, 0.72);
        let second = generate_recommendations(&features, 1, 0.72);
        assert_eq!(first, second);
    }
}
