//! Health analyzer
//!
//! Turns one set of measurements into a classification bundle. Pure and
//! stateless: no I/O, same input gives the same output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::blood_pressure::BloodPressure;
use super::classification::{risk_points, DiabetesStage, ObesityStage, RiskLevel};
use super::warnings::{generate_warnings, Warning};

/// Analysis error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Missing required measurement: {0}")]
    MissingMeasurement(&'static str),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Measurements for a single analysis.
///
/// Units are fixed: meters, kilograms, mg/dL, and "systolic/diastolic" mmHg.
/// Height and weight are trusted to be positive; callers validate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub height: f64,
    pub weight: f64,
    pub fasting_glucose: Option<f64>,
    pub post_meal_glucose: Option<f64>,
    pub blood_pressure: Option<String>,
    /// Stored with the record, never consulted by the analysis
    pub activity_level: Option<String>,
    /// Stored with the record, never consulted by the analysis
    pub family_history: Option<String>,
}

/// Result of analyzing a [`Measurement`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub bmi: f64,
    pub diabetes_stage: DiabetesStage,
    pub obesity_stage: ObesityStage,
    pub risk_level: RiskLevel,
    pub warnings: Vec<Warning>,
}

impl ClassificationResult {
    /// Warning texts in evaluation order
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }
}

/// Body mass index: weight (kg) / height (m)²
pub fn calculate_bmi(height: f64, weight: f64) -> f64 {
    weight / (height * height)
}

/// Analyze a measurement set.
///
/// Fails only when a glucose reading is absent. An unparseable blood
/// pressure string is treated as no blood pressure data.
pub fn analyze(measurement: &Measurement) -> AnalysisResult<ClassificationResult> {
    let fasting = measurement
        .fasting_glucose
        .ok_or(AnalysisError::MissingMeasurement("fasting_glucose"))?;
    let post_meal = measurement
        .post_meal_glucose
        .ok_or(AnalysisError::MissingMeasurement("post_meal_glucose"))?;

    let bmi = calculate_bmi(measurement.height, measurement.weight);
    let diabetes_stage = DiabetesStage::classify(fasting, post_meal);
    let obesity_stage = ObesityStage::from_bmi(bmi);
    let blood_pressure = BloodPressure::parse_optional(measurement.blood_pressure.as_deref());

    let points = risk_points(diabetes_stage, obesity_stage, blood_pressure);
    let risk_level = RiskLevel::from_points(points);
    let warnings = generate_warnings(fasting, post_meal, bmi, blood_pressure);

    tracing::debug!(
        bmi,
        diabetes_stage = diabetes_stage.as_str(),
        obesity_stage = obesity_stage.as_str(),
        risk_points = points,
        risk_level = risk_level.as_str(),
        warnings = warnings.len(),
        "Classified measurement"
    );

    Ok(ClassificationResult {
        bmi,
        diabetes_stage,
        obesity_stage,
        risk_level,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;

    fn measurement(
        height: f64,
        weight: f64,
        fasting: f64,
        post_meal: f64,
        bp: Option<&str>,
    ) -> Measurement {
        Measurement {
            height,
            weight,
            fasting_glucose: Some(fasting),
            post_meal_glucose: Some(post_meal),
            blood_pressure: bp.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_bmi_formula() {
        for (h, w) in [(1.75, 95.0), (1.6, 50.0), (2.01, 120.5), (0.9, 14.0)] {
            let expected = w / (h * h);
            assert!((calculate_bmi(h, w) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_high_risk_scenario() {
        let m = measurement(1.75, 95.0, 130.0, 210.0, Some("150/95"));
        let result = analyze(&m).unwrap();

        assert!((result.bmi - 31.0204).abs() < 0.001);
        assert_eq!(result.obesity_stage, ObesityStage::ObesityClassI);
        assert_eq!(result.diabetes_stage, DiabetesStage::Diabetic);
        assert_eq!(result.risk_level, RiskLevel::High);

        let tiers: Vec<Severity> = result.warnings.iter().map(|w| w.severity).collect();
        assert_eq!(
            tiers,
            vec![Severity::Critical, Severity::Critical, Severity::Warning, Severity::Urgent]
        );
        let messages = result.warning_messages();
        assert!(messages[0].contains("Fasting"));
        assert!(messages[1].contains("Post-meal"));
        assert!(messages[2].contains("Class I obesity"));
        assert!(messages[3].contains("Stage 2"));
    }

    #[test]
    fn test_low_risk_scenario() {
        let m = measurement(1.70, 65.0, 95.0, 120.0, None);
        let result = analyze(&m).unwrap();

        assert!((result.bmi - 22.491).abs() < 0.001);
        assert_eq!(result.obesity_stage, ObesityStage::NormalWeight);
        assert_eq!(result.diabetes_stage, DiabetesStage::Normal);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_glucose() {
        let mut m = measurement(1.70, 65.0, 95.0, 120.0, None);
        m.fasting_glucose = None;
        assert_eq!(
            analyze(&m),
            Err(AnalysisError::MissingMeasurement("fasting_glucose"))
        );

        let mut m = measurement(1.70, 65.0, 95.0, 120.0, None);
        m.post_meal_glucose = None;
        assert_eq!(
            analyze(&m),
            Err(AnalysisError::MissingMeasurement("post_meal_glucose"))
        );
    }

    #[test]
    fn test_malformed_blood_pressure_contributes_nothing() {
        // Pre-diabetic + overweight = 3 points; valid 150/95 would add 2
        let base = measurement(1.75, 80.0, 110.0, 120.0, None);
        let baseline = analyze(&base).unwrap();
        assert_eq!(baseline.risk_level, RiskLevel::Medium);

        for bp in ["120", "abc/90", "150/", "", "150-95"] {
            let m = Measurement {
                blood_pressure: Some(bp.to_string()),
                ..base.clone()
            };
            let result = analyze(&m).unwrap();
            assert_eq!(result.risk_level, baseline.risk_level, "bp {:?}", bp);
            assert_eq!(result.warnings, baseline.warnings, "bp {:?}", bp);
        }

        let m = Measurement {
            blood_pressure: Some("150/95".to_string()),
            ..base
        };
        assert_eq!(analyze(&m).unwrap().risk_level, RiskLevel::High);
    }

    #[test]
    fn test_risk_level_consistent_with_stages() {
        let cases = [
            measurement(1.80, 55.0, 80.0, 100.0, Some("110/70")),
            measurement(1.65, 70.0, 105.0, 150.0, Some("125/78")),
            measurement(1.60, 110.0, 140.0, 230.0, Some("185/125")),
            measurement(1.90, 95.0, 99.0, 199.0, None),
        ];
        for m in &cases {
            let result = analyze(m).unwrap();
            let bp = m.blood_pressure.as_deref().and_then(BloodPressure::parse);
            let expected = RiskLevel::assess(result.diabetes_stage, result.obesity_stage, bp);
            assert_eq!(result.risk_level, expected);
        }
    }

    #[test]
    fn test_activity_and_history_do_not_affect_result() {
        let plain = measurement(1.70, 82.0, 112.0, 160.0, Some("135/85"));
        let annotated = Measurement {
            activity_level: Some("sedentary".to_string()),
            family_history: Some("type 2 diabetes".to_string()),
            ..plain.clone()
        };
        assert_eq!(analyze(&plain).unwrap(), analyze(&annotated).unwrap());
    }
}
