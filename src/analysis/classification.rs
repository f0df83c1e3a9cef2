//! Classification stages
//!
//! Diabetes stage, obesity stage and overall risk level, plus the fixed
//! clinical cutoffs each one is derived from.

use serde::{Deserialize, Serialize};

use super::blood_pressure::BloodPressure;

/// Fasting glucose (mg/dL) at or above which the reading is diabetic
pub const FASTING_DIABETIC: f64 = 126.0;
/// Fasting glucose (mg/dL) at or above which the reading is pre-diabetic
pub const FASTING_PRE_DIABETIC: f64 = 100.0;
/// Post-meal glucose (mg/dL) at or above which the reading is diabetic
pub const POST_MEAL_DIABETIC: f64 = 200.0;
/// Post-meal glucose (mg/dL) at or above which the reading is pre-diabetic
pub const POST_MEAL_PRE_DIABETIC: f64 = 140.0;

/// WHO BMI cutoffs (lower bound of each class)
pub const BMI_NORMAL: f64 = 18.5;
pub const BMI_OVERWEIGHT: f64 = 25.0;
pub const BMI_OBESITY_I: f64 = 30.0;
pub const BMI_OBESITY_II: f64 = 35.0;
pub const BMI_OBESITY_III: f64 = 40.0;

/// Diabetes stage, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiabetesStage {
    Normal,
    #[serde(rename = "Pre-Diabetic")]
    PreDiabetic,
    Diabetic,
}

impl DiabetesStage {
    /// Classify from fasting and post-meal glucose.
    ///
    /// Both readings are checked independently; either one alone can
    /// elevate the stage.
    pub fn classify(fasting: f64, post_meal: f64) -> Self {
        let fasting_diabetic = fasting >= FASTING_DIABETIC;
        let fasting_pre = fasting >= FASTING_PRE_DIABETIC && fasting < FASTING_DIABETIC;
        let post_diabetic = post_meal >= POST_MEAL_DIABETIC;
        let post_pre = post_meal >= POST_MEAL_PRE_DIABETIC && post_meal < POST_MEAL_DIABETIC;

        if fasting_diabetic || post_diabetic {
            DiabetesStage::Diabetic
        } else if fasting_pre || post_pre {
            DiabetesStage::PreDiabetic
        } else {
            DiabetesStage::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiabetesStage::Normal => "Normal",
            DiabetesStage::PreDiabetic => "Pre-Diabetic",
            DiabetesStage::Diabetic => "Diabetic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Normal" => Some(DiabetesStage::Normal),
            "Pre-Diabetic" => Some(DiabetesStage::PreDiabetic),
            "Diabetic" => Some(DiabetesStage::Diabetic),
            _ => None,
        }
    }

    /// Contribution to the composite risk score
    pub fn risk_points(&self) -> u8 {
        match self {
            DiabetesStage::Normal => 0,
            DiabetesStage::PreDiabetic => 2,
            DiabetesStage::Diabetic => 3,
        }
    }
}

/// WHO-style obesity stage derived from BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObesityStage {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    #[serde(rename = "Obesity Class I")]
    ObesityClassI,
    #[serde(rename = "Obesity Class II")]
    ObesityClassII,
    #[serde(rename = "Obesity Class III")]
    ObesityClassIII,
}

impl ObesityStage {
    /// Bounds are left-inclusive, right-exclusive; Class III is open-ended.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_NORMAL {
            ObesityStage::Underweight
        } else if bmi < BMI_OVERWEIGHT {
            ObesityStage::NormalWeight
        } else if bmi < BMI_OBESITY_I {
            ObesityStage::Overweight
        } else if bmi < BMI_OBESITY_II {
            ObesityStage::ObesityClassI
        } else if bmi < BMI_OBESITY_III {
            ObesityStage::ObesityClassII
        } else {
            ObesityStage::ObesityClassIII
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObesityStage::Underweight => "Underweight",
            ObesityStage::NormalWeight => "Normal Weight",
            ObesityStage::Overweight => "Overweight",
            ObesityStage::ObesityClassI => "Obesity Class I",
            ObesityStage::ObesityClassII => "Obesity Class II",
            ObesityStage::ObesityClassIII => "Obesity Class III",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Underweight" => Some(ObesityStage::Underweight),
            "Normal Weight" => Some(ObesityStage::NormalWeight),
            "Overweight" => Some(ObesityStage::Overweight),
            "Obesity Class I" => Some(ObesityStage::ObesityClassI),
            "Obesity Class II" => Some(ObesityStage::ObesityClassII),
            "Obesity Class III" => Some(ObesityStage::ObesityClassIII),
            _ => None,
        }
    }

    /// Any of the three obesity classes
    pub fn is_obese(&self) -> bool {
        matches!(
            self,
            ObesityStage::ObesityClassI | ObesityStage::ObesityClassII | ObesityStage::ObesityClassIII
        )
    }

    /// Contribution to the composite risk score.
    ///
    /// All obesity classes score the same; the class only matters for warnings.
    pub fn risk_points(&self) -> u8 {
        if self.is_obese() {
            2
        } else if *self == ObesityStage::Overweight {
            1
        } else {
            0
        }
    }
}

/// Composite risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Upper bound of the composite score (3 diabetes + 2 obesity + 2 blood pressure)
pub const MAX_RISK_POINTS: u8 = 7;

impl RiskLevel {
    pub fn from_points(points: u8) -> Self {
        if points >= 5 {
            RiskLevel::High
        } else if points >= 3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Derive the level from its three inputs. This is the only way a
    /// level is produced by the analyzer.
    pub fn assess(
        diabetes: DiabetesStage,
        obesity: ObesityStage,
        blood_pressure: Option<BloodPressure>,
    ) -> Self {
        Self::from_points(risk_points(diabetes, obesity, blood_pressure))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Exact canonical label only; callers decide what an unknown label means.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// Composite risk points, bounded by [`MAX_RISK_POINTS`]
pub fn risk_points(
    diabetes: DiabetesStage,
    obesity: ObesityStage,
    blood_pressure: Option<BloodPressure>,
) -> u8 {
    let bp_points = blood_pressure.map(|bp| bp.risk_points()).unwrap_or(0);
    diabetes.risk_points() + obesity.risk_points() + bp_points
}
