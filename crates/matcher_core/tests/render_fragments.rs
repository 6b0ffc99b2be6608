use matcher_core::{
    render_result, AnalysisResult, InterviewQuestion, QuestionList, ScoreTier, Tag, TagCategory,
    TagList, NO_SUMMARY, UNKNOWN_CANDIDATE,
};
use pretty_assertions::assert_eq;

#[test]
fn empty_matches_and_single_missing_skill() {
    let fragments = render_result(&AnalysisResult {
        match_score: 30.0,
        key_matches: Vec::new(),
        missing_skills: vec!["Kubernetes".to_string()],
        ..AnalysisResult::default()
    });

    assert_eq!(fragments.key_matches, TagList::NoneDetected);
    assert_eq!(
        fragments.missing_skills,
        TagList::Tags(vec![Tag {
            text: "Kubernetes".to_string(),
            category: TagCategory::Missing,
        }])
    );
    assert_eq!(fragments.score.tier, ScoreTier::Low);
}

#[test]
fn score_rounds_first_then_tiers() {
    let cases = [
        (79.6, "80%", ScoreTier::High),
        (79.4, "79%", ScoreTier::Medium),
        (80.0, "80%", ScoreTier::High),
        (50.0, "50%", ScoreTier::Medium),
        (49.5, "50%", ScoreTier::Medium),
        (49.4, "49%", ScoreTier::Low),
        (0.0, "0%", ScoreTier::Low),
    ];
    for (raw, text, tier) in cases {
        let badge = render_result(&AnalysisResult {
            match_score: raw,
            ..AnalysisResult::default()
        })
        .score;
        assert_eq!(badge.text(), text, "score {raw}");
        assert_eq!(badge.tier, tier, "score {raw}");
    }
}

#[test]
fn absent_fields_render_placeholders() {
    let fragments = render_result(&AnalysisResult::default());

    assert_eq!(fragments.candidate_name, UNKNOWN_CANDIDATE);
    assert_eq!(fragments.summary, NO_SUMMARY);
    assert_eq!(fragments.key_matches, TagList::NoneDetected);
    assert_eq!(fragments.missing_skills, TagList::NoneDetected);
    assert_eq!(fragments.questions, QuestionList::NoneGenerated);
}

#[test]
fn tags_keep_source_order_and_duplicates() {
    let fragments = render_result(&AnalysisResult {
        key_matches: vec![
            "Rust".to_string(),
            "Go".to_string(),
            "Rust".to_string(),
        ],
        ..AnalysisResult::default()
    });

    let TagList::Tags(tags) = fragments.key_matches else {
        panic!("expected tags");
    };
    let texts: Vec<_> = tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, vec!["Rust", "Go", "Rust"]);
    assert!(tags.iter().all(|tag| tag.category == TagCategory::Match));
}

#[test]
fn questions_keep_order_and_rationale() {
    let questions = vec![
        InterviewQuestion {
            question: "How do you size a thread pool?".to_string(),
            rationale: "Concurrency gap".to_string(),
        },
        InterviewQuestion {
            question: "Describe a Helm chart you wrote.".to_string(),
            rationale: "Kubernetes missing".to_string(),
        },
    ];
    let fragments = render_result(&AnalysisResult {
        interview_questions: questions.clone(),
        ..AnalysisResult::default()
    });

    assert_eq!(fragments.questions, QuestionList::Items(questions));
}

#[test]
fn identity_text_is_kept_verbatim() {
    let fragments = render_result(&AnalysisResult {
        candidate_name: Some("  Grace <Hopper>  ".to_string()),
        summary: Some("Compilers & COBOL".to_string()),
        ..AnalysisResult::default()
    });

    assert_eq!(fragments.candidate_name, "  Grace <Hopper>  ");
    assert_eq!(fragments.summary, "Compilers & COBOL");
}
