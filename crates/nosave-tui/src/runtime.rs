use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use nosave_core::launcher::Notice;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    notices: &mut UnboundedReceiver<Notice>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut state_rx = app.subscribe();
    let mut launch_rx = app
        .take_launch_rx()
        .ok_or_else(|| anyhow::anyhow!("Chat launch receiver already taken"))?;
    // Spinner animation and notification expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    app.start();

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key);
                }
                Some(Ok(Event::FocusGained)) => app.on_foreground(),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => app.quit(),
            },
            changed = state_rx.changed() => {
                if changed.is_err() {
                    warn!("controller state channel closed");
                    app.quit();
                } else {
                    let state = state_rx.borrow_and_update().clone();
                    app.sync_state(state);
                }
            }
            Some(notice) = notices.recv() => app.push_notice(notice),
            Some(launch) = launch_rx.recv() => app.on_chat_launched(launch),
            _ = tick_interval.tick() => app.tick(),
        }
    }

    Ok(())
}
