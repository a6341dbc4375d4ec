mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nosave_core::config::CoreConfig;
use nosave_core::launcher::{ContactActionLauncher, DesktopPlatform, LaunchPlatform};
use nosave_core::source::{SqliteCallHistory, StoreCallLogSource};
use nosave_core::tracing_setup::init_tracing;
use nosave_core::{CallLogController, PermissionState};
use tokio::sync::mpsc;
use tracing::info;

use crate::runtime::run_app;
use ui::App;

/// Browse recent calls and start a chat without saving the contact.
#[derive(Parser, Debug)]
#[command(name = "nosave", version)]
struct Args {
    /// Config file (JSON); defaults to the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Call history database to read instead of the configured one
    #[arg(long)]
    history_db: Option<PathBuf>,

    /// Treat call history access as already granted (skips the prompt)
    #[arg(long)]
    grant: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableFocusChange
        );
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    init_tracing(args.log_file.as_deref())?;

    let mut config = CoreConfig::load_or_default(args.config.as_deref())?;
    if let Some(history_db) = args.history_db {
        config.history_db = Some(history_db);
    }
    let history_db = config.history_db_path();
    info!(history_db = %history_db.display(), "starting");

    let source = StoreCallLogSource::new(
        SqliteCallHistory::new(&history_db),
        config.timestamp_formatter(),
    );
    let permission = if args.grant {
        PermissionState::Granted
    } else {
        PermissionState::Unknown
    };
    let controller = CallLogController::new(Arc::new(source), tokio::runtime::Handle::current())
        .with_permission(permission);

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel();
    let platform: Arc<dyn LaunchPlatform> =
        Arc::new(DesktopPlatform::new(&config.chat_app).with_notices(notice_tx));
    let launcher = ContactActionLauncher::new(platform, config.chat_app.clone());

    let mut app = App::new(controller, launcher);
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app, &mut notice_rx).await;

    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
