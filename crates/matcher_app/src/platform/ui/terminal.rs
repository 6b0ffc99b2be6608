//! Plain-text `UiSurface` for an interactive terminal.
//!
//! Each region remembers what it last printed and only writes again when its
//! content changes, so `present` can be called after every update.

use std::io::Write;

use chrono::Local;
use matcher_core::{
    CatalogView, Prompt, PromptKind, QuestionList, ResultFragments, ResultsPanel, StatusLine,
    StatusTone, TagList, UiPhase, UiSurface, NONE_DETECTED, NO_QUESTIONS,
};
use matcher_logging::{matcher_debug, matcher_warn};

use super::input::HELP_TEXT;

const WELCOME_TEXT: &str =
    "Select a candidate, paste a job description and type `analyze` to see how they match.";

pub struct TerminalSurface<W: Write> {
    out: W,
    busy: bool,
    catalog: Option<CatalogView>,
    upload: Option<(Option<String>, bool)>,
    phase: Option<UiPhase>,
    status: Option<StatusLine>,
    results: Option<ResultsPanel>,
    prompt: Option<Prompt>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            busy: false,
            catalog: None,
            upload: None,
            phase: None,
            status: None,
            results: None,
            prompt: None,
        }
    }

    /// One-off message that belongs to no region.
    pub fn notice(&mut self, text: &str) {
        self.emit(&format!("  {text}"));
    }

    pub fn help(&mut self) {
        self.emit(HELP_TEXT);
    }

    fn emit(&mut self, text: &str) {
        let text = plain_text(text);
        let written = writeln!(self.out, "{text}").and_then(|()| self.out.flush());
        if let Err(err) = written {
            matcher_warn!("Failed to write to terminal: {}", err);
        }
    }

    fn catalog_text(catalog: &CatalogView) -> String {
        let mut text = String::from("Candidates:");
        let mut position = 0;
        for option in &catalog.options {
            if option.selectable {
                position += 1;
                let marker = if catalog.selected.as_deref() == Some(option.value.as_str()) {
                    "  <- selected"
                } else {
                    ""
                };
                text.push_str(&format!("\n  [{position}] {}{marker}", option.label));
            } else {
                text.push_str(&format!("\n  -- {} --", option.label));
            }
        }
        text
    }

    fn results_text(fragments: &ResultFragments) -> String {
        let mut text = String::from("==== Match result ====");
        text.push_str(&format!(
            "\nScore:          {} ({})",
            fragments.score.text(),
            fragments.score.tier.class_name()
        ));
        text.push_str(&format!("\nCandidate:      {}", fragments.candidate_name));
        text.push_str(&format!("\nSummary:        {}", fragments.summary));
        text.push_str(&format!(
            "\nKey matches:    {}",
            tag_line(&fragments.key_matches)
        ));
        text.push_str(&format!(
            "\nMissing skills: {}",
            tag_line(&fragments.missing_skills)
        ));
        text.push_str("\nInterview questions:");
        match &fragments.questions {
            QuestionList::NoneGenerated => text.push_str(&format!("\n  {NO_QUESTIONS}")),
            QuestionList::Items(items) => {
                for (index, item) in items.iter().enumerate() {
                    text.push_str(&format!("\n  {}. {}", index + 1, item.question));
                    if !item.rationale.is_empty() {
                        text.push_str(&format!("\n     why: {}", item.rationale));
                    }
                }
            }
        }
        text
    }
}

/// Escapes control characters other than newline so backend text can never
/// drive the terminal (colours, cursor moves, screen clears).
fn plain_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() && ch != '\n' {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

fn tag_line(tags: &TagList) -> String {
    match tags {
        TagList::NoneDetected => NONE_DETECTED.to_string(),
        TagList::Tags(tags) => tags
            .iter()
            .map(|tag| format!("[{}]", tag.text))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn tone_marker(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Info => "..",
        StatusTone::Success => "ok",
        StatusTone::Error => "!!",
    }
}

impl<W: Write> UiSurface for TerminalSurface<W> {
    fn set_catalog(&mut self, catalog: &CatalogView) {
        if self.catalog.as_ref() == Some(catalog) {
            return;
        }
        self.catalog = Some(catalog.clone());
        self.emit(&Self::catalog_text(catalog));
    }

    fn set_status(&mut self, phase: UiPhase, status: Option<&StatusLine>) {
        if self.phase != Some(phase) {
            matcher_debug!("UI phase {:?}", phase);
            self.phase = Some(phase);
        }
        if self.status.as_ref() == status {
            return;
        }
        self.status = status.cloned();
        if let Some(status) = status {
            let stamp = Local::now().format("%H:%M:%S");
            self.emit(&format!(
                "[{stamp}] {} {}",
                tone_marker(status.tone),
                status.text
            ));
        }
    }

    fn set_upload_input(&mut self, file: Option<&str>, uploading: bool) {
        let next = (file.map(str::to_string), uploading);
        if self.upload.as_ref() == Some(&next) {
            return;
        }
        let file_changed = self.upload.as_ref().map(|(previous, _)| previous) != Some(&next.0);
        self.upload = Some(next);
        if file_changed {
            match file {
                Some(name) => self.emit(&format!("File to upload: {name}")),
                None => self.emit("No file chosen."),
            }
        }
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy == busy {
            return;
        }
        self.busy = busy;
        if busy {
            self.emit("Analyzing... (analyze is disabled until the result arrives)");
        }
    }

    fn set_results(&mut self, panel: &ResultsPanel) {
        if self.results.as_ref() == Some(panel) {
            return;
        }
        self.results = Some(panel.clone());
        match panel {
            ResultsPanel::Welcome => self.emit(WELCOME_TEXT),
            ResultsPanel::Results(fragments) => self.emit(&Self::results_text(fragments)),
        }
    }

    fn set_prompt(&mut self, prompt: Option<&Prompt>) {
        if self.prompt.as_ref() == prompt {
            return;
        }
        self.prompt = prompt.cloned();
        if let Some(prompt) = prompt {
            let heading = match prompt.kind {
                PromptKind::Validation => ">>>",
                PromptKind::Alert => "!!!",
            };
            self.emit(&format!(
                "\n{heading} {}\n    (press Enter to continue)",
                prompt.text
            ));
        }
    }
}

#[cfg(test)]
impl TerminalSurface<Vec<u8>> {
    fn take_output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.out)).expect("utf8 output")
    }
}
