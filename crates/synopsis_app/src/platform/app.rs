use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use synopsis_core::{update, AppState, Msg};
use synopsis_engine::ClientSettings;
use synopsis_logging::{pipeline_debug, pipeline_info};

use super::effects::EffectRunner;
use super::ui;
use super::ui::constants::{COMMAND_QUIT, COMMAND_TOGGLE_TRANSLATION, INTERACTIVE_HELP, PROMPT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Dispatch(Msg),
    Quit,
}

pub struct AppOptions {
    pub url: Option<String>,
    pub show_translation: bool,
    pub settings: ClientSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppExit {
    Completed,
    Failed,
    Rejected,
}

impl AppExit {
    pub fn code(self) -> u8 {
        match self {
            AppExit::Completed => 0,
            AppExit::Failed => 1,
            AppExit::Rejected => 2,
        }
    }
}

pub fn run_app(options: AppOptions) -> Result<AppExit> {
    pipeline_info!("Summary endpoint {}", options.settings.endpoint);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(options.settings, event_tx.clone())
        .context("failed to start the request engine")?;

    let mut app = App::new(runner, io::stdout());
    if options.show_translation {
        app.dispatch(Msg::TranslationToggled)?;
    }

    match options.url {
        Some(url) => run_once(&mut app, url, &event_rx),
        None => run_interactive(&mut app, event_tx, &event_rx),
    }
}

fn run_once<W: Write>(
    app: &mut App<W>,
    url: String,
    event_rx: &mpsc::Receiver<AppEvent>,
) -> Result<AppExit> {
    app.dispatch(Msg::InputChanged(url))?;
    app.dispatch(Msg::Submitted)?;
    if app.state.input_error().is_some() {
        return Ok(AppExit::Rejected);
    }

    while app.state.is_running() {
        match event_rx.recv() {
            Ok(AppEvent::Dispatch(msg)) => app.dispatch(msg)?,
            Ok(AppEvent::Quit) | Err(_) => break,
        }
    }

    Ok(if app.state.result().is_some() {
        AppExit::Completed
    } else {
        AppExit::Failed
    })
}

fn run_interactive<W: Write>(
    app: &mut App<W>,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: &mpsc::Receiver<AppEvent>,
) -> Result<AppExit> {
    spawn_stdin_reader(event_tx);
    writeln!(app.out, "{INTERACTIVE_HELP}")?;
    app.prompt()?;

    let mut quitting = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Dispatch(msg) => {
                let ends_turn = matches!(
                    msg,
                    Msg::Submitted | Msg::RunSettled { .. } | Msg::TranslationToggled
                );
                app.dispatch(msg)?;
                if ends_turn && !app.state.is_running() && !quitting {
                    app.prompt()?;
                }
            }
            AppEvent::Quit => quitting = true,
        }
        // Let an in-flight run finish before leaving on end of input.
        if quitting && !app.state.is_running() {
            break;
        }
    }

    Ok(AppExit::Completed)
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_line(&line) {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        pipeline_debug!("stdin closed");
        let _ = event_tx.send(AppEvent::Quit);
    });
}

/// Turns one line of interactive input into app events.
fn parse_line(line: &str) -> Vec<AppEvent> {
    match line.trim() {
        COMMAND_QUIT => vec![AppEvent::Quit],
        COMMAND_TOGGLE_TRANSLATION => vec![AppEvent::Dispatch(Msg::TranslationToggled)],
        _ => vec![
            AppEvent::Dispatch(Msg::InputChanged(line.to_string())),
            AppEvent::Dispatch(Msg::Submitted),
        ],
    }
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        // The terminal already echoes typed input.
        let redraw = !matches!(msg, Msg::InputChanged(_));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);

        if was_dirty && redraw {
            let text = ui::render::render(&view);
            if !text.is_empty() {
                writeln!(self.out, "{text}")?;
                self.out.flush()?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}
