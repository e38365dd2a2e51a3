use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

use crate::tui::{App, Runtime};

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Take over the terminal, run `runtime` until the app quits, then restore it
pub async fn launch<A: App>(runtime: &mut Runtime<A>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Starting {}", runtime.title());
    let result = run(&mut terminal, runtime).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run<B: Backend, A: App>(terminal: &mut Terminal<B>, runtime: &mut Runtime<A>) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Process all pending events FIRST for minimal input latency
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+Q always quits, whatever the app is doing
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    should_quit = true;
                    break;
                }

                if !runtime.handle_key(key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        runtime.poll_async()?;

        terminal.draw(|frame| render(frame, runtime))?;

        // Sleep for remainder of 16ms frame (60 FPS)
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }

    if runtime.in_flight() > 0 {
        info!("Quitting with {} command(s) still running", runtime.in_flight());
    }
    Ok(())
}

fn render<A: App>(frame: &mut Frame, runtime: &mut Runtime<A>) {
    let help = help_line(runtime);
    let [header_area, app_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(help_height(&help, frame.area())),
    ])
    .areas(frame.area());

    let theme = runtime.theme();
    let mut spans = vec![Span::styled(
        runtime.title(),
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = runtime.status() {
        spans.push(Span::raw("  "));
        spans.extend(status.spans);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), header_area);
    frame.render_widget(Paragraph::new(help).wrap(Wrap { trim: true }), help_area);

    runtime.render(frame, app_area);
}

fn help_line<A: App>(runtime: &Runtime<A>) -> Line<'static> {
    let theme = runtime.theme();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for (binding, description) in runtime.key_bindings() {
        // Several keys can share one description, e.g. u and ^Z for undo
        if let Some(index) = seen.iter().position(|d| d == &description) {
            if let Some(key_span) = spans.get_mut(index * 2) {
                key_span.content = format!("{}/{}", key_span.content, binding.label()).into();
            }
            continue;
        }
        seen.push(description.clone());
        spans.push(Span::styled(binding.label(), Style::default().fg(theme.mauve)));
        spans.push(Span::styled(format!(" {}  ", description), Style::default().fg(theme.overlay1)));
    }
    Line::from(spans)
}

fn help_height(help: &Line, area: Rect) -> u16 {
    let width = usize::from(area.width.max(1));
    let rows = help.width().div_ceil(width).clamp(1, 3);
    rows as u16
}
