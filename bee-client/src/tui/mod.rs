// Terminal UI
//
// Owns the terminal for the lifetime of the client and runs the one loop
// that reads keys, applies live updates and call replies, and redraws. That
// loop is the only place session state is written from; remote calls run on
// their own tasks and only send their replies back.

pub mod app;
pub mod clipboard;
pub mod modal;
pub mod scroll;
pub mod splash;
pub mod ui;

use anyhow::{Context, Result};
use app::{App, LaunchOptions};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::info;

use crate::api::GameService;
use crate::controller::{ReplyReceiver, SessionController};
use crate::subscription::UpdateReceiver;

/// Set up the terminal, run the client until the player quits, and put the
/// terminal back the way it was, even when the loop fails.
pub async fn run<S: GameService>(
    controller: SessionController<S>,
    updates: UpdateReceiver,
    launch: LaunchOptions,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (mut app, replies) = App::new(controller, &launch);
    let result = run_event_loop(&mut terminal, &mut app, updates, replies).await;

    // Leaving mid-game closes the update stream with the controller
    app.controller.close_subscription();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_event_loop<S: GameService>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    mut updates: UpdateReceiver,
    mut replies: ReplyReceiver,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    app.start();

    loop {
        terminal
            .draw(|f| ui::draw(f, &mut app.view()))
            .context("Failed to draw terminal")?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },

            // The controller and the app keep their senders, so neither
            // channel yields None
            Some(update) = updates.recv() => app.handle_update(update),

            Some(reply) = replies.recv() => app.handle_reply(reply),

            _ = tick_interval.tick() => {}
        }

        if app.should_quit {
            info!("Quitting");
            break;
        }
    }

    Ok(())
}
