//! HTML snippets for each result fragment.
//!
//! Only the container elements are structural; every piece of text that came
//! from the backend goes through `encode_text`.

use html_escape::encode_text;

use crate::{QuestionList, ResultFragments, ScoreBadge, TagList, NONE_DETECTED, NO_QUESTIONS};

impl ScoreBadge {
    pub fn to_markup(&self) -> String {
        format!(
            r#"<div class="score-ring tier-{}">{}</div>"#,
            self.tier.class_name(),
            self.text()
        )
    }
}

impl TagList {
    pub fn to_markup(&self) -> String {
        match self {
            TagList::NoneDetected => {
                format!(r#"<span class="tag-placeholder">{NONE_DETECTED}</span>"#)
            }
            TagList::Tags(tags) => tags
                .iter()
                .map(|tag| {
                    format!(
                        r#"<span class="tag {}">{}</span>"#,
                        tag.category.class_name(),
                        encode_text(&tag.text)
                    )
                })
                .collect(),
        }
    }
}

impl QuestionList {
    pub fn to_markup(&self) -> String {
        match self {
            QuestionList::NoneGenerated => format!("<p>{NO_QUESTIONS}</p>"),
            QuestionList::Items(items) => {
                let mut out = String::from(r#"<ol class="questions">"#);
                for item in items {
                    out.push_str(&format!(
                        r#"<li><strong>{}</strong><span class="rationale">{}</span></li>"#,
                        encode_text(&item.question),
                        encode_text(&item.rationale)
                    ));
                }
                out.push_str("</ol>");
                out
            }
        }
    }
}

/// Standalone HTML document containing every fragment of a rendered result.
pub fn report_document(fragments: &ResultFragments) -> String {
    let name = encode_text(&fragments.candidate_name);
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Match report: {name}</title>\n</head>\n",
            "<body>\n",
            "{score}\n",
            "<h1 class=\"candidate-name\">{name}</h1>\n",
            "<p class=\"summary\">{summary}</p>\n",
            "<h2>Key matches</h2>\n<div class=\"tags\">{matches}</div>\n",
            "<h2>Missing skills</h2>\n<div class=\"tags\">{missing}</div>\n",
            "<h2>Interview questions</h2>\n{questions}\n",
            "</body>\n</html>\n"
        ),
        name = name,
        score = fragments.score.to_markup(),
        summary = encode_text(&fragments.summary),
        matches = fragments.key_matches.to_markup(),
        missing = fragments.missing_skills.to_markup(),
        questions = fragments.questions.to_markup(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render_result, AnalysisResult, InterviewQuestion};

    #[test]
    fn tag_text_is_escaped() {
        let fragments = render_result(&AnalysisResult {
            key_matches: vec!["<b>Rust</b> & Go".to_string()],
            ..AnalysisResult::default()
        });
        assert_eq!(
            fragments.key_matches.to_markup(),
            r#"<span class="tag match">&lt;b&gt;Rust&lt;/b&gt; &amp; Go</span>"#
        );
    }

    #[test]
    fn questions_render_in_order_with_rationale() {
        let fragments = render_result(&AnalysisResult {
            interview_questions: vec![
                InterviewQuestion {
                    question: "First?".to_string(),
                    rationale: "one".to_string(),
                },
                InterviewQuestion {
                    question: "<script>".to_string(),
                    rationale: "two".to_string(),
                },
            ],
            ..AnalysisResult::default()
        });
        let html = fragments.questions.to_markup();
        let first = html.find("First?").unwrap();
        let second = html.find("&lt;script&gt;").unwrap();
        assert!(first < second);
        assert!(html.starts_with("<ol"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let fragments = render_result(&AnalysisResult::default());
        assert!(fragments.key_matches.to_markup().contains(NONE_DETECTED));
        assert_eq!(
            fragments.questions.to_markup(),
            "<p>No specific questions generated.</p>"
        );
    }

    #[test]
    fn report_contains_score_and_escaped_identity() {
        let fragments = render_result(&AnalysisResult {
            match_score: 42.0,
            candidate_name: Some("Ada <Admin>".to_string()),
            ..AnalysisResult::default()
        });
        let doc = report_document(&fragments);
        assert!(doc.contains(r#"<div class="score-ring tier-low">42%</div>"#));
        assert!(doc.contains("Ada &lt;Admin&gt;"));
        assert!(doc.contains("No summary available."));
    }
}
