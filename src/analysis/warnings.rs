//! Warning generation
//!
//! Each rule fires independently on a single measurement. Rules are
//! evaluated in a fixed order: fasting glucose, post-meal glucose, BMI,
//! blood pressure.

use serde::{Deserialize, Serialize};

use super::blood_pressure::{BloodPressure, BpCategory};
use super::classification::{
    BMI_OBESITY_I, BMI_OBESITY_II, BMI_OBESITY_III, BMI_OVERWEIGHT, FASTING_DIABETIC,
    FASTING_PRE_DIABETIC, POST_MEAL_DIABETIC, POST_MEAL_PRE_DIABETIC,
};

/// Warning severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Urgent,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Urgent => "urgent",
            Severity::Critical => "critical",
        }
    }

    /// Marker prefixed to every message of this tier
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️ INFO",
            Severity::Warning => "🟡 WARNING",
            Severity::Urgent => "🟠 URGENT",
            Severity::Critical => "🔴 CRITICAL",
        }
    }
}

/// A severity-tagged message triggered by one threshold crossing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    fn new(severity: Severity, body: String) -> Self {
        Self {
            severity,
            message: format!("{}: {}", severity.marker(), body),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Generate warnings in evaluation order. May be empty.
pub fn generate_warnings(
    fasting: f64,
    post_meal: f64,
    bmi: f64,
    blood_pressure: Option<BloodPressure>,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if fasting >= FASTING_DIABETIC {
        warnings.push(Warning::new(
            Severity::Critical,
            format!(
                "Fasting blood sugar ({} mg/dL) indicates diabetic range. Immediate medical consultation recommended.",
                fasting
            ),
        ));
    } else if fasting >= FASTING_PRE_DIABETIC {
        warnings.push(Warning::new(
            Severity::Warning,
            format!(
                "Fasting blood sugar ({} mg/dL) indicates pre-diabetic condition. Lifestyle changes needed.",
                fasting
            ),
        ));
    }

    if post_meal >= POST_MEAL_DIABETIC {
        warnings.push(Warning::new(
            Severity::Critical,
            format!(
                "Post-meal blood sugar ({} mg/dL) is in diabetic range. Immediate medical consultation recommended.",
                post_meal
            ),
        ));
    } else if post_meal >= POST_MEAL_PRE_DIABETIC {
        warnings.push(Warning::new(
            Severity::Warning,
            format!(
                "Post-meal blood sugar ({} mg/dL) indicates pre-diabetic range. Reduce refined carbohydrates.",
                post_meal
            ),
        ));
    }

    if bmi >= BMI_OBESITY_III {
        warnings.push(Warning::new(
            Severity::Critical,
            format!("BMI ({:.1}) indicates severe obesity. Medical intervention advised.", bmi),
        ));
    } else if bmi >= BMI_OBESITY_II {
        warnings.push(Warning::new(
            Severity::Urgent,
            format!("BMI ({:.1}) indicates Class II obesity. Please consult healthcare provider.", bmi),
        ));
    } else if bmi >= BMI_OBESITY_I {
        warnings.push(Warning::new(
            Severity::Warning,
            format!("BMI ({:.1}) indicates Class I obesity. Lifestyle modifications recommended.", bmi),
        ));
    } else if bmi >= BMI_OVERWEIGHT {
        warnings.push(Warning::new(
            Severity::Info,
            format!("BMI ({:.1}) indicates overweight. Monitor diet and exercise.", bmi),
        ));
    }

    if let Some(bp) = blood_pressure {
        match bp.category() {
            BpCategory::Crisis => warnings.push(Warning::new(
                Severity::Critical,
                format!(
                    "Blood pressure ({} mmHg) is in hypertensive crisis range. Seek immediate medical attention.",
                    bp
                ),
            )),
            BpCategory::Stage2 => warnings.push(Warning::new(
                Severity::Urgent,
                format!(
                    "Blood pressure ({} mmHg) indicates Stage 2 hypertension. Medical consultation needed.",
                    bp
                ),
            )),
            BpCategory::Stage1 => warnings.push(Warning::new(
                Severity::Warning,
                format!(
                    "Blood pressure ({} mmHg) indicates Stage 1 hypertension or elevated. Monitor regularly.",
                    bp
                ),
            )),
            BpCategory::Elevated | BpCategory::Normal => {}
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severities(warnings: &[Warning]) -> Vec<Severity> {
        warnings.iter().map(|w| w.severity).collect()
    }

    #[test]
    fn test_no_warnings_for_healthy_values() {
        let warnings = generate_warnings(90.0, 120.0, 22.0, BloodPressure::parse("115/75"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_glucose_warnings() {
        let warnings = generate_warnings(130.0, 150.0, 22.0, None);
        assert_eq!(severities(&warnings), vec![Severity::Critical, Severity::Warning]);
        assert!(warnings[0].message.starts_with("🔴 CRITICAL"));
        assert!(warnings[0].message.contains("Fasting"));
        assert!(warnings[0].message.contains("130 mg/dL"));
        assert!(warnings[1].message.contains("Post-meal"));
        assert!(warnings[1].message.contains("150 mg/dL"));

        let warnings = generate_warnings(105.0, 210.0, 22.0, None);
        assert_eq!(severities(&warnings), vec![Severity::Warning, Severity::Critical]);
    }

    #[test]
    fn test_bmi_warning_tiers() {
        let tier = |bmi| severities(&generate_warnings(80.0, 100.0, bmi, None));
        assert!(tier(24.9).is_empty());
        assert_eq!(tier(25.0), vec![Severity::Info]);
        assert_eq!(tier(30.0), vec![Severity::Warning]);
        assert_eq!(tier(35.0), vec![Severity::Urgent]);
        assert_eq!(tier(40.0), vec![Severity::Critical]);
    }

    #[test]
    fn test_bmi_value_embedded() {
        let warnings = generate_warnings(80.0, 100.0, 31.0204, None);
        assert!(warnings[0].message.contains("BMI (31.0)"));
    }

    #[test]
    fn test_blood_pressure_warning_tiers() {
        let tier = |bp| severities(&generate_warnings(80.0, 100.0, 22.0, BloodPressure::parse(bp)));
        assert!(tier("125/75").is_empty());
        assert_eq!(tier("130/75"), vec![Severity::Warning]);
        assert_eq!(tier("150/95"), vec![Severity::Urgent]);
        assert_eq!(tier("185/100"), vec![Severity::Critical]);
        assert!(tier("120/80/70").is_empty());
    }

    #[test]
    fn test_evaluation_order() {
        let warnings = generate_warnings(130.0, 210.0, 42.0, BloodPressure::parse("190/110"));
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].message.contains("Fasting"));
        assert!(warnings[1].message.contains("Post-meal"));
        assert!(warnings[2].message.contains("BMI"));
        assert!(warnings[3].message.contains("Blood pressure (190/110 mmHg)"));
    }
}
