use crate::app::{
    action::Action, command::Command, debounce::Debouncer, input::map_event_to_action, reducer,
    state::AppState, ui,
};
use crate::domain::search::SearchFacade;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Side-effect plumbing owned by the loop: the debounce task, the pending
/// blur timer and the search client.
struct Runtime {
    client: Arc<dyn SearchFacade>,
    action_tx: mpsc::Sender<Action>,
    debouncer: Debouncer,
    blur_timer: Option<(u64, JoinHandle<()>)>,
}

impl Runtime {
    fn new(
        client: Arc<dyn SearchFacade>,
        action_tx: mpsc::Sender<Action>,
        debounce: Duration,
    ) -> Self {
        Self {
            debouncer: Debouncer::spawn(debounce, action_tx.clone()),
            client,
            action_tx,
            blur_timer: None,
        }
    }

    fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Batch(commands) => {
                for command in commands {
                    self.run(command)?;
                }
            }
            Command::Debounce(value) => self.debouncer.push(value),
            Command::ScheduleBlurClose { token, delay } => {
                self.cancel_blur_timer();
                let tx = self.action_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Action::BlurElapsed(token)).await;
                });
                self.blur_timer = Some((token, handle));
            }
            Command::CancelBlurClose(token) => {
                if self.blur_timer.as_ref().is_some_and(|(t, _)| *t == token) {
                    self.cancel_blur_timer();
                }
            }
            network => handle_command(network, self.client.clone(), self.action_tx.clone())?,
        }
        Ok(())
    }

    fn cancel_blur_timer(&mut self) {
        if let Some((token, handle)) = self.blur_timer.take() {
            log::debug!("cancelling blur timer #{token}");
            handle.abort();
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.cancel_blur_timer();
    }
}

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    client: Arc<dyn SearchFacade>,
    debounce: Duration,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, client, debounce, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    client: Arc<dyn SearchFacade>,
    debounce: Duration,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut runtime = Runtime::new(client, action_tx, debounce);
    let mut interval = interval(TICK_RATE);

    // The input starts focused.
    if let Some(cmd) = reducer::update(&mut app_state, Action::FocusSearch) {
        runtime.run(cmd)?;
    }

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if let Some(cmd) = reducer::update(&mut app_state, action) {
                runtime.run(cmd)?;
            }
            if app_state.should_quit {
                break;
            }
        }
    }

    Ok(())
}

pub(crate) fn handle_command(
    command: Command,
    client: Arc<dyn SearchFacade>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::search::handle_command(command, client, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
