//! Blood pressure parsing
//!
//! Readings arrive as free text in "systolic/diastolic" form (mmHg).

use serde::{Deserialize, Serialize};

/// A parsed blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

/// Hypertension category of a reading, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BpCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl BloodPressure {
    /// Parse "systolic/diastolic". Returns `None` for anything that is not
    /// exactly two integers around a single slash.
    ///
    /// - "120/80" -> Some(120/80)
    /// - " 135 / 85 " -> Some(135/85)
    /// - "120", "abc/90", "120/80/70" -> None
    pub fn parse(s: &str) -> Option<Self> {
        let (systolic, diastolic) = s.split_once('/')?;
        let systolic = systolic.trim().parse::<i32>().ok()?;
        let diastolic = diastolic.trim().parse::<i32>().ok()?;
        Some(Self { systolic, diastolic })
    }

    /// Parse an optional reading, logging when text was supplied but unusable
    pub fn parse_optional(s: Option<&str>) -> Option<Self> {
        let raw = s?;
        let parsed = Self::parse(raw);
        if parsed.is_none() {
            tracing::warn!(
                blood_pressure = raw,
                "Unparseable blood pressure, skipping blood pressure scoring"
            );
        }
        parsed
    }

    /// Contribution to the composite risk score
    pub fn risk_points(&self) -> u8 {
        if self.systolic >= 130 || self.diastolic >= 80 {
            2
        } else if self.systolic >= 120 {
            1
        } else {
            0
        }
    }

    /// Category used for warnings. Either number alone can raise it.
    pub fn category(&self) -> BpCategory {
        if self.systolic >= 180 || self.diastolic >= 120 {
            BpCategory::Crisis
        } else if self.systolic >= 140 || self.diastolic >= 90 {
            BpCategory::Stage2
        } else if self.systolic >= 130 || self.diastolic >= 80 {
            BpCategory::Stage1
        } else if self.systolic >= 120 {
            BpCategory::Elevated
        } else {
            BpCategory::Normal
        }
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(
            BloodPressure::parse("120/80"),
            Some(BloodPressure { systolic: 120, diastolic: 80 })
        );
        assert_eq!(
            BloodPressure::parse(" 135 / 85 "),
            Some(BloodPressure { systolic: 135, diastolic: 85 })
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(BloodPressure::parse("120"), None);
        assert_eq!(BloodPressure::parse("abc/90"), None);
        assert_eq!(BloodPressure::parse("120/"), None);
        assert_eq!(BloodPressure::parse("/80"), None);
        assert_eq!(BloodPressure::parse("120.5/80"), None);
        assert_eq!(BloodPressure::parse("120/80/70"), None);
        assert_eq!(BloodPressure::parse(""), None);
    }

    #[test]
    fn test_parse_optional_absent() {
        assert_eq!(BloodPressure::parse_optional(None), None);
        assert_eq!(BloodPressure::parse_optional(Some("n/a")), None);
        assert!(BloodPressure::parse_optional(Some("118/76")).is_some());
    }

    #[test]
    fn test_risk_points() {
        let bp = |s| BloodPressure::parse(s).unwrap();
        assert_eq!(bp("115/75").risk_points(), 0);
        assert_eq!(bp("120/75").risk_points(), 1);
        assert_eq!(bp("129/79").risk_points(), 1);
        assert_eq!(bp("130/70").risk_points(), 2);
        assert_eq!(bp("110/80").risk_points(), 2);
    }

    #[test]
    fn test_category() {
        let bp = |s| BloodPressure::parse(s).unwrap();
        assert_eq!(bp("110/70").category(), BpCategory::Normal);
        assert_eq!(bp("125/70").category(), BpCategory::Elevated);
        assert_eq!(bp("132/70").category(), BpCategory::Stage1);
        assert_eq!(bp("118/82").category(), BpCategory::Stage1);
        assert_eq!(bp("150/95").category(), BpCategory::Stage2);
        assert_eq!(bp("120/91").category(), BpCategory::Stage2);
        assert_eq!(bp("181/100").category(), BpCategory::Crisis);
        assert_eq!(bp("150/120").category(), BpCategory::Crisis);
    }
}
