use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use stories_core::{update, AppState, KeyValueStore, MemoryStore, Msg};
use stories_engine::{EngineHandle, RonFileStore};
use stories_logging::{stories_info, stories_warn};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Input {
    Line(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_err) = match AppConfig::load(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    stories_logging::initialize(config.log_target.into(), config.level_filter());
    if let Some(err) = config_err {
        stories_warn!("Using default configuration: {}", err);
    }

    let store = open_store(&config.state_file);
    let engine =
        EngineHandle::new(config.fetch_settings()).context("failed to start fetch engine")?;
    let runner = EffectRunner::new(engine, store.clone());

    let (mut state, effects) = AppState::init(&config.search_settings(), store.as_ref());
    stories_info!("Started with term {:?}", state.view().term);
    runner.run(effects);

    let input_rx = spawn_stdin_reader();
    println!("{HELP}");
    render_if_dirty(&mut state)?;

    loop {
        while let Some(msg) = runner.try_recv_msg() {
            state = dispatch(state, msg, &runner);
        }

        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => match parse_command(&line) {
                Command::Quit => break,
                Command::Help => println!("{HELP}"),
                Command::Unknown(text) => println!("Unknown command {text:?}. {HELP}"),
                command => {
                    if let Some(msg) = command.to_msg() {
                        state = dispatch(state, msg, &runner);
                    }
                }
            },
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        render_if_dirty(&mut state)?;
    }

    stories_info!("Exiting");
    Ok(())
}

/// The durable store at `path`, or an in-memory one when it cannot be used.
fn open_store(path: &Path) -> Arc<dyn KeyValueStore> {
    match RonFileStore::open(path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            stories_warn!(
                "State file {:?} unavailable, search term kept in memory only: {}",
                path,
                err
            );
            Arc::new(MemoryStore::new())
        }
    }
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn render_if_dirty(state: &mut AppState) -> io::Result<()> {
    if !state.consume_dirty() {
        return Ok(());
    }
    let view = state.view();
    let mut out = io::stdout().lock();
    writeln!(out)?;
    for line in render::render(&view) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn spawn_stdin_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}
