use crate::view_model::{AppViewModel, CatalogView, Prompt, ResultsPanel, StatusLine};
use crate::UiPhase;

/// Named, independently writable regions of a display target.
pub trait UiSurface {
    /// Replaces the whole catalog selector.
    fn set_catalog(&mut self, catalog: &CatalogView);
    fn set_status(&mut self, phase: UiPhase, status: Option<&StatusLine>);
    fn set_upload_input(&mut self, file: Option<&str>, uploading: bool);
    /// Disables the analyze trigger and shows the busy indicator, or the reverse.
    fn set_busy(&mut self, busy: bool);
    fn set_results(&mut self, panel: &ResultsPanel);
    /// `None` once the prompt has been dismissed.
    fn set_prompt(&mut self, prompt: Option<&Prompt>);
}

/// Writes every region of `view` to `surface`.
///
/// The busy indicator is written before anything else so a surface that
/// flushes per call never shows a request as started without it.
pub fn present(view: &AppViewModel, surface: &mut dyn UiSurface) {
    surface.set_busy(view.analyze_busy);
    surface.set_catalog(&view.catalog);
    surface.set_upload_input(view.upload_file.as_deref(), view.uploading);
    surface.set_status(view.phase, view.status.as_ref());
    surface.set_results(&view.results);
    surface.set_prompt(view.prompt.as_ref());
}
