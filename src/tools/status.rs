//! Prescription Status Tool
//!
//! Runtime status of the service, plus the usage guide served to clients.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const ANALYSIS_INSTRUCTIONS: &str = r#"
# Prescription Health Analysis Instructions

This guide explains how to run a health risk analysis and fetch tailored recommendations.

## Workflow

1. Collect measurements from the user (units below are fixed, no conversion is done)
2. Call `analyze_health` with the user's id and measurements
3. Pass the returned `risk_level` to `generate_recommendations` for the same user
4. Use `get_recommendations` later to fetch the stored plan
5. Use `list_health_records` to review past analyses, `export_health_report` for a markdown summary

---

## Measurements

| Field | Unit | Required | Notes |
|-------|------|----------|-------|
| height | meters | yes | must be > 0 (e.g. 1.75, not 175) |
| weight | kilograms | yes | must be > 0 |
| fasting_glucose | mg/dL | yes | |
| post_meal_glucose | mg/dL | yes | ~2 hours after a meal |
| blood_pressure | mmHg | no | text "systolic/diastolic", e.g. "120/80" |
| activity_level | text | no | stored only |
| family_history | text | no | stored only |

**Convert before calling:** cm → m (divide by 100), lbs → kg (divide by 2.2046), mmol/L → mg/dL (multiply by 18).

A blood pressure value that is not two whole numbers around a slash is ignored, not rejected.

---

## Classification Rules

### Diabetes stage (either reading can raise it)
- **Diabetic:** fasting ≥ 126 or post-meal ≥ 200
- **Pre-Diabetic:** fasting 100-125 or post-meal 140-199
- **Normal:** otherwise

### Obesity stage (BMI = weight / height²)
| BMI | Stage |
|-----|-------|
| < 18.5 | Underweight |
| 18.5 - 24.9 | Normal Weight |
| 25 - 29.9 | Overweight |
| 30 - 34.9 | Obesity Class I |
| 35 - 39.9 | Obesity Class II |
| ≥ 40 | Obesity Class III |

### Risk level (points)
- Pre-Diabetic +2, Diabetic +3
- Overweight +1, any Obesity class +2
- Blood pressure ≥ 130 systolic or ≥ 80 diastolic +2, else systolic ≥ 120 +1
- **High** ≥ 5, **Medium** ≥ 3, **Low** otherwise

---

## Recommendations

Plans depend on the risk level only. `generate_recommendations` accepts "Low", "Medium" or "High";
any other value receives the Low plan. Each user keeps one stored plan; generating again replaces it.

---

## Important Notes

- This is rule-based screening, not a diagnosis. Relay critical warnings to the user plainly.
- Every analysis is stored; nothing is overwritten.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> PrescriptionStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PrescriptionStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/prescription.db"));
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, crate::build_info::VERSION);
    }
}
