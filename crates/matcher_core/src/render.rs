//! Pure transformation from an [`AnalysisResult`] into renderable fragments.
//!
//! The score is rounded to an integer percentage before it is tiered, so the
//! badge text and its colour always agree (79.6 renders as "80%" and "high").

use crate::{AnalysisResult, InterviewQuestion};

pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NONE_DETECTED: &str = "None detected";
pub const NO_QUESTIONS: &str = "No specific questions generated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    /// Lower bounds are inclusive: 80 is high, 50 is medium.
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            80.. => ScoreTier::High,
            50..=79 => ScoreTier::Medium,
            _ => ScoreTier::Low,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBadge {
    pub percent: u8,
    pub tier: ScoreTier,
}

impl ScoreBadge {
    pub fn text(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Match,
    Missing,
}

impl TagCategory {
    pub fn class_name(self) -> &'static str {
        match self {
            TagCategory::Match => "match",
            TagCategory::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub text: String,
    pub category: TagCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagList {
    /// Rendered as the [`NONE_DETECTED`] placeholder.
    NoneDetected,
    Tags(Vec<Tag>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionList {
    /// Rendered as the [`NO_QUESTIONS`] placeholder paragraph.
    NoneGenerated,
    Items(Vec<InterviewQuestion>),
}

/// Every region of the results view, ready to be written to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFragments {
    pub score: ScoreBadge,
    pub candidate_name: String,
    pub summary: String,
    pub key_matches: TagList,
    pub missing_skills: TagList,
    pub questions: QuestionList,
}

pub fn render_result(result: &AnalysisResult) -> ResultFragments {
    let percent = score_percent(result.match_score);
    ResultFragments {
        score: ScoreBadge {
            percent,
            tier: ScoreTier::for_percent(percent),
        },
        candidate_name: text_or(result.candidate_name.as_deref(), UNKNOWN_CANDIDATE),
        summary: text_or(result.summary.as_deref(), NO_SUMMARY),
        key_matches: tag_list(&result.key_matches, TagCategory::Match),
        missing_skills: tag_list(&result.missing_skills, TagCategory::Missing),
        questions: if result.interview_questions.is_empty() {
            QuestionList::NoneGenerated
        } else {
            QuestionList::Items(result.interview_questions.clone())
        },
    }
}

/// Rounds half away from zero after clamping into `[0, 100]`; non-finite scores count as 0.
pub fn score_percent(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

fn tag_list(items: &[String], category: TagCategory) -> TagList {
    if items.is_empty() {
        return TagList::NoneDetected;
    }
    TagList::Tags(
        items
            .iter()
            .map(|text| Tag {
                text: text.clone(),
                category,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_before_tiering() {
        let badge = render_result(&AnalysisResult {
            match_score: 79.6,
            ..AnalysisResult::default()
        })
        .score;
        assert_eq!(badge.text(), "80%");
        assert_eq!(badge.tier, ScoreTier::High);
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_lower_bound() {
        assert_eq!(ScoreTier::for_percent(100), ScoreTier::High);
        assert_eq!(ScoreTier::for_percent(80), ScoreTier::High);
        assert_eq!(ScoreTier::for_percent(79), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_percent(50), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_percent(49), ScoreTier::Low);
        assert_eq!(ScoreTier::for_percent(0), ScoreTier::Low);
    }

    #[test]
    fn score_is_clamped_and_sanitized() {
        assert_eq!(score_percent(49.5), 50);
        assert_eq!(score_percent(49.4), 49);
        assert_eq!(score_percent(-3.0), 0);
        assert_eq!(score_percent(140.0), 100);
        assert_eq!(score_percent(f64::NAN), 0);
    }

    #[test]
    fn blank_identity_fields_use_placeholders() {
        let fragments = render_result(&AnalysisResult {
            candidate_name: Some("  ".to_string()),
            summary: None,
            ..AnalysisResult::default()
        });
        assert_eq!(fragments.candidate_name, UNKNOWN_CANDIDATE);
        assert_eq!(fragments.summary, NO_SUMMARY);
    }
}
