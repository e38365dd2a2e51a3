use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::tui::subscription::KeyBinding;
use crate::tui::{App, Command, Subscription, Theme};

/// The runtime manages app state, key routing and command execution.
///
/// Messages are handled one at a time: each runs `update` to completion, and
/// async commands report back through a channel that is drained between frames.
pub struct Runtime<A: App> {
    /// Current app state
    state: A::State,

    theme: Theme,

    /// Keyboard subscriptions
    key_subscriptions: HashMap<KeyBinding, A::Msg>,

    /// Completed async commands waiting to be fed back into update()
    async_tx: mpsc::UnboundedSender<A::Msg>,
    async_rx: mpsc::UnboundedReceiver<A::Msg>,

    /// Number of spawned commands that have not reported back yet
    in_flight: usize,

    quit: bool,
}

impl<A: App> Runtime<A> {
    pub fn new(state: A::State, theme: Theme) -> Self {
        let (async_tx, async_rx) = mpsc::unbounded_channel();
        let mut runtime = Self {
            state,
            theme,
            key_subscriptions: HashMap::new(),
            async_tx,
            async_rx,
            in_flight: 0,
            quit: false,
        };
        runtime.update_subscriptions();
        runtime
    }

    /// Get a reference to the app's state
    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Get the app's title (static string)
    pub fn title(&self) -> &'static str {
        A::title()
    }

    /// Get the app's status (optional, dynamic)
    pub fn status(&self) -> Option<Line<'static>> {
        A::status(&self.state, &self.theme)
    }

    /// Key bindings with descriptions, for the help line
    pub fn key_bindings(&self) -> Vec<(KeyBinding, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .map(|sub| match sub {
                Subscription::Keyboard { binding, description, .. } => (binding, description),
            })
            .collect()
    }

    /// Run one message through update() and execute the resulting command
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<()> {
        let command = A::update(&mut self.state, msg);
        self.execute_command(command)?;
        self.update_subscriptions();
        Ok(())
    }

    /// Handle a keyboard event. Returns false once the app asked to quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(!self.quit);
        }

        if let Some(msg) = A::capture_key(&self.state, &key_event) {
            self.dispatch(msg)?;
            return Ok(!self.quit);
        }

        let binding = KeyBinding::from_event(&key_event);
        if let Some(msg) = self.key_subscriptions.get(&binding).cloned() {
            self.dispatch(msg)?;
        }

        Ok(!self.quit)
    }

    /// Feed every finished async command back into update()
    pub fn poll_async(&mut self) -> Result<()> {
        while let Ok(msg) = self.async_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(msg)?;
        }
        Ok(())
    }

    /// Wait for the next async command to finish and handle it.
    /// Returns false when nothing is in flight.
    pub async fn next_async(&mut self) -> Result<bool> {
        if self.in_flight == 0 {
            return Ok(false);
        }
        match self.async_rx.recv().await {
            Some(msg) => {
                self.in_flight -= 1;
                self.dispatch(msg)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        A::view(&mut self.state, frame, area, &self.theme);
    }

    fn execute_command(&mut self, command: Command<A::Msg>) -> Result<()> {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for command in commands {
                    self.execute_command(command)?;
                }
            }
            Command::Perform(future) => {
                let tx = self.async_tx.clone();
                self.in_flight += 1;
                debug!("Spawning async command ({} in flight)", self.in_flight);
                tokio::spawn(async move {
                    let msg = future.await;
                    // The receiver only goes away when the runtime is dropped
                    let _ = tx.send(msg);
                });
            }
            Command::Quit => {
                self.quit = true;
            }
        }
        Ok(())
    }

    /// Rebuild key subscriptions based on current state
    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        for sub in A::subscriptions(&self.state) {
            match sub {
                Subscription::Keyboard { binding, msg, description: _ } => {
                    // description is used for the help line, not for runtime lookup
                    self.key_subscriptions.insert(binding, msg);
                }
            }
        }
    }
}
