//! Recommendation generator
//!
//! Maps a risk level to fixed diet, exercise and lifestyle plans. The text
//! depends on the risk tier alone.

use serde::{Deserialize, Serialize};

use crate::analysis::RiskLevel;

/// Plan texts for one risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub diet: &'static str,
    pub exercise: &'static str,
    pub lifestyle: &'static str,
}

static HIGH_RISK_PLAN: Plan = Plan {
    diet: "1. Eat fiber-rich breakfast. 2. Avoid sugary foods. 3. Prefer whole grains. \
           4. Add green leafy vegetables. 5. Drink cinnamon water. 6. Avoid fried food.",
    exercise: "1. 30-minute walk daily. 2. Yoga for flexibility. 3. Reduce stress through meditation. \
               4. Sleep 7-8 hours. 5. Track daily sugar readings.",
    lifestyle: "1. Monitor blood sugar regularly. 2. Consult endocrinologist. 3. Manage stress effectively. \
                4. Avoid smoking and alcohol. 5. Stay consistent with medication.",
};

static MEDIUM_RISK_PLAN: Plan = Plan {
    diet: "1. Include more fruits and vegetables. 2. Reduce salt intake. 3. Choose lean proteins. \
           4. Limit sugary drinks. 5. Eat small frequent meals.",
    exercise: "1. 20-30 minute moderate exercise. 2. Brisk walking. 3. Swimming or cycling. \
               4. Gentle stretching. 5. Regular physical activity.",
    lifestyle: "1. Regular health checkups. 2. Maintain ideal weight. 3. Reduce stress. \
                4. Adequate sleep. 5. Social engagement.",
};

static LOW_RISK_PLAN: Plan = Plan {
    diet: "1. Maintain a balanced diet. 2. Include all food groups. 3. Stay hydrated. \
           4. Limit processed foods.",
    exercise: "1. Regular physical activity. 2. At least 150 minutes per week. \
               3. Strength training 2x per week.",
    lifestyle: "1. Annual health screening. 2. Maintain healthy weight. 3. Healthy work-life balance.",
};

/// Plan table lookup
pub fn plan_for(level: RiskLevel) -> &'static Plan {
    match level {
        RiskLevel::High => &HIGH_RISK_PLAN,
        RiskLevel::Medium => &MEDIUM_RISK_PLAN,
        RiskLevel::Low => &LOW_RISK_PLAN,
    }
}

/// Recommendations for one risk level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    /// The risk level exactly as it was supplied
    pub risk_level: String,
    pub diet_plan: String,
    pub exercise_plan: String,
    pub lifestyle_tips: String,
}

/// Generate recommendations for a risk level label.
///
/// Only the exact labels "High" and "Medium" select their plans; any other
/// string gets the Low plan.
pub fn generate(risk_level: &str) -> RecommendationBundle {
    let tier = RiskLevel::from_str(risk_level).unwrap_or(RiskLevel::Low);
    let plan = plan_for(tier);

    RecommendationBundle {
        risk_level: risk_level.to_string(),
        diet_plan: plan.diet.to_string(),
        exercise_plan: plan.exercise.to_string(),
        lifestyle_tips: plan.lifestyle.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_distinct() {
        let high = generate("High");
        let medium = generate("Medium");
        let low = generate("Low");

        for (a, b) in [(&high, &medium), (&high, &low), (&medium, &low)] {
            assert_ne!(a.diet_plan, b.diet_plan);
            assert_ne!(a.exercise_plan, b.exercise_plan);
            assert_ne!(a.lifestyle_tips, b.lifestyle_tips);
        }
    }

    #[test]
    fn test_unknown_level_falls_back_to_low() {
        let unknown = generate("Unknown");
        let low = generate("Low");
        assert_eq!(unknown.diet_plan, low.diet_plan);
        assert_eq!(unknown.exercise_plan, low.exercise_plan);
        assert_eq!(unknown.lifestyle_tips, low.lifestyle_tips);

        // Labels are matched exactly
        assert_eq!(generate("high").diet_plan, low.diet_plan);
        assert_eq!(generate("").lifestyle_tips, low.lifestyle_tips);
    }

    #[test]
    fn test_risk_level_is_echoed() {
        assert_eq!(generate("High").risk_level, "High");
        assert_eq!(generate("Unknown").risk_level, "Unknown");
    }

    #[test]
    fn test_generate_is_idempotent() {
        assert_eq!(generate("Medium"), generate("Medium"));
    }

    #[test]
    fn test_plan_text_has_no_line_continuation_gaps() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            let plan = plan_for(level);
            for text in [plan.diet, plan.exercise, plan.lifestyle] {
                assert!(!text.contains("  "), "{:?}", text);
                assert!(text.starts_with("1. "));
            }
        }
    }
}
