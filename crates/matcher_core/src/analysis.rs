/// Structured outcome of one résumé / job-description comparison.
///
/// Every field except the score may be missing from the backend payload;
/// missing text is `None` and missing sequences are empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Raw score as reported by the backend, nominally in `[0, 100]`.
    pub match_score: f64,
    pub candidate_name: Option<String>,
    pub summary: Option<String>,
    pub key_matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub interview_questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterviewQuestion {
    pub question: String,
    pub rationale: String,
}
