use std::fs;
use std::io::{self, BufRead, Stdout};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use matcher_core::{present, update, AppState, Msg};
use matcher_engine::{EngineHandle, ReqwestBackend};
use matcher_logging::{matcher_info, matcher_warn};

use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, UserCommand};
use super::ui::terminal::TerminalSurface;

/// Everything the main loop reacts to, from either the keyboard or the engine.
pub enum AppEvent {
    Input(UserCommand),
    Core(Msg),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let (config, config_warning) = load_config(&cwd);
    let log_warning = logging::initialize(config.log_destination);
    matcher_info!("Starting resume matcher against {}", config.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = start_engine(&config, event_tx.clone())?;
    spawn_input_reader(event_tx);

    let mut app = App::new(TerminalSurface::new(io::stdout()), effects);
    for warning in [config_warning, log_warning].into_iter().flatten() {
        matcher_warn!("{}", warning);
        app.surface.notice(&format!("Warning: {warning}"));
    }
    app.start();

    while let Ok(event) = event_rx.recv() {
        let keep_running = match event {
            AppEvent::Input(command) => app.handle_command(command),
            AppEvent::Core(msg) => {
                app.dispatch_msg(msg);
                true
            }
            AppEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    matcher_info!("Resume matcher exiting");
    Ok(())
}

fn start_engine(
    config: &AppConfig,
    events: mpsc::Sender<AppEvent>,
) -> anyhow::Result<EffectRunner> {
    let backend = ReqwestBackend::new(config.backend_settings())
        .with_context(|| format!("invalid backend url {:?}", config.base_url))?;
    let engine =
        EngineHandle::new(Arc::new(backend)).context("could not start the request runtime")?;
    Ok(EffectRunner::new(engine, events))
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    matcher_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            if events.send(AppEvent::Input(parse_command(&line))).is_err() {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    surface: TerminalSurface<Stdout>,
    effects: EffectRunner,
}

impl App {
    fn new(surface: TerminalSurface<Stdout>, effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            surface,
            effects,
        }
    }

    fn start(&mut self) {
        self.surface.notice("Resume matcher. Type `help` for commands.");
        present(&self.state.view(), &mut self.surface);
        self.dispatch_msg(Msg::Started);
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            present(&state.view(), &mut self.surface);
        }
        self.state = state;
        // Rendered first so the busy indicator is up before the request goes out.
        self.effects.enqueue(effects);
    }

    /// Returns `false` when the user asked to quit.
    fn handle_command(&mut self, command: UserCommand) -> bool {
        match command {
            UserCommand::Quit => return false,
            UserCommand::Help => self.surface.help(),
            UserCommand::Invalid(reason) => self
                .surface
                .notice(&format!("{reason}; type `help` for commands.")),
            other => {
                if let Some(msg) = self.command_to_msg(other) {
                    if msg.is_user_action() && self.state.has_prompt() {
                        self.surface
                            .notice("Press Enter to dismiss the message first.");
                    } else {
                        self.dispatch_msg(msg);
                    }
                }
            }
        }
        true
    }

    fn command_to_msg(&mut self, command: UserCommand) -> Option<Msg> {
        let msg = match command {
            UserCommand::Reload => Msg::ReloadCatalogClicked,
            UserCommand::Select(choice) => Msg::ResumeSelected(self.resolve_choice(choice)),
            UserCommand::ChooseFile(path) => Msg::UploadFileChosen(path),
            UserCommand::Upload => Msg::UploadClicked,
            UserCommand::AppendJobDescription(line) => {
                Msg::JobDescriptionChanged(append_line(self.state.job_description(), &line))
            }
            UserCommand::LoadJobDescription(path) => match fs::read_to_string(&path) {
                Ok(text) => Msg::JobDescriptionChanged(text),
                Err(err) => {
                    matcher_warn!("Failed to read job description from {:?}: {}", path, err);
                    self.surface
                        .notice(&format!("Could not read {}: {err}", path.display()));
                    return None;
                }
            },
            UserCommand::ClearJobDescription => Msg::JobDescriptionChanged(String::new()),
            UserCommand::Analyze => Msg::AnalyzeClicked,
            UserCommand::SaveReport(path) => Msg::SaveReportClicked(path),
            UserCommand::Dismiss => Msg::PromptDismissed,
            UserCommand::Help | UserCommand::Quit | UserCommand::Invalid(_) => return None,
        };
        Some(msg)
    }

    fn resolve_choice(&self, choice: String) -> String {
        resolve_choice(self.state.catalog_ids(), choice)
    }
}

/// A listed identifier wins over a list position with the same text.
fn resolve_choice(ids: &[String], choice: String) -> String {
    if ids.iter().any(|id| *id == choice) {
        return choice;
    }
    match choice.parse::<usize>() {
        Ok(position) if (1..=ids.len()).contains(&position) => ids[position - 1].clone(),
        _ => choice,
    }
}

fn append_line(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{current}\n{line}")
    }
}
