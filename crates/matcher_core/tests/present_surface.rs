use std::path::PathBuf;

use matcher_core::{
    present, update, AnalysisResult, AppState, CatalogView, Effect, Msg, Prompt, ResultsPanel,
    StatusLine, UiPhase, UiSurface,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
enum SurfaceWrite {
    Busy(bool),
    Catalog(usize, Option<String>),
    Upload(Option<String>, bool),
    Status(UiPhase, Option<String>),
    Results(bool),
    Prompt(Option<String>),
}

#[derive(Default)]
struct RecordingSurface {
    writes: Vec<SurfaceWrite>,
}

impl UiSurface for RecordingSurface {
    fn set_catalog(&mut self, catalog: &CatalogView) {
        self.writes
            .push(SurfaceWrite::Catalog(catalog.options.len(), catalog.selected.clone()));
    }

    fn set_status(&mut self, phase: UiPhase, status: Option<&StatusLine>) {
        self.writes
            .push(SurfaceWrite::Status(phase, status.map(|s| s.text.clone())));
    }

    fn set_upload_input(&mut self, file: Option<&str>, uploading: bool) {
        self.writes
            .push(SurfaceWrite::Upload(file.map(ToOwned::to_owned), uploading));
    }

    fn set_busy(&mut self, busy: bool) {
        self.writes.push(SurfaceWrite::Busy(busy));
    }

    fn set_results(&mut self, panel: &ResultsPanel) {
        self.writes
            .push(SurfaceWrite::Results(matches!(panel, ResultsPanel::Results(_))));
    }

    fn set_prompt(&mut self, prompt: Option<&Prompt>) {
        self.writes
            .push(SurfaceWrite::Prompt(prompt.map(|p| p.text.clone())));
    }
}

fn analyzed_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            request_id: 1,
            result: Ok(vec!["a.pdf".to_string()]),
        },
    );
    let (state, _) = update(state, Msg::ResumeSelected("a.pdf".to_string()));
    let (state, _) = update(state, Msg::JobDescriptionChanged("JD".to_string()));
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request_id: 2,
            result: Ok(AnalysisResult {
                match_score: 91.0,
                ..AnalysisResult::default()
            }),
        },
    );
    state
}

#[test]
fn present_writes_busy_first_while_analyzing() {
    matcher_logging::initialize_for_tests();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            request_id: 1,
            result: Ok(vec!["a.pdf".to_string(), "b.pdf".to_string()]),
        },
    );
    let (state, _) = update(state, Msg::ResumeSelected("b.pdf".to_string()));
    let (state, _) = update(state, Msg::JobDescriptionChanged("JD".to_string()));
    let (state, _) = update(state, Msg::AnalyzeClicked);

    let mut surface = RecordingSurface::default();
    present(&state.view(), &mut surface);

    assert_eq!(
        surface.writes,
        vec![
            SurfaceWrite::Busy(true),
            SurfaceWrite::Catalog(3, Some("b.pdf".to_string())),
            SurfaceWrite::Upload(None, false),
            SurfaceWrite::Status(UiPhase::Analyzing, None),
            SurfaceWrite::Results(false),
            SurfaceWrite::Prompt(None),
        ]
    );
}

#[test]
fn present_shows_results_and_prompt() {
    matcher_logging::initialize_for_tests();
    let (state, _) = update(analyzed_state(), Msg::UploadClicked);

    let mut surface = RecordingSurface::default();
    present(&state.view(), &mut surface);

    assert!(surface.writes.contains(&SurfaceWrite::Busy(false)));
    assert!(surface.writes.contains(&SurfaceWrite::Results(true)));
    assert_eq!(
        surface.writes.last(),
        Some(&SurfaceWrite::Prompt(Some(
            "Please select a file first.".to_string()
        )))
    );
}

#[test]
fn save_report_emits_rendered_markup() {
    matcher_logging::initialize_for_tests();
    let path = PathBuf::from("report.html");
    let (state, effects) = update(analyzed_state(), Msg::SaveReportClicked(path.clone()));

    match effects.as_slice() {
        [Effect::WriteReport { path: target, html }] => {
            assert_eq!(target, &path);
            assert!(html.contains("tier-high"));
            assert!(html.contains("91%"));
        }
        other => panic!("expected WriteReport, got {other:?}"),
    }

    let (state, _) = update(
        state,
        Msg::ReportSaved {
            result: Ok(path.clone()),
        },
    );
    assert_eq!(
        state.view().status.unwrap().text,
        "Report saved to report.html"
    );
}

#[test]
fn save_report_without_results_prompts() {
    matcher_logging::initialize_for_tests();
    let (state, effects) = update(AppState::new(), Msg::SaveReportClicked("r.html".into()));

    assert!(effects.is_empty());
    assert_eq!(state.view().prompt.unwrap().text, "Nothing to save yet.");
}
