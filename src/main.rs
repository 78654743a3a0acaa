use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Settings;
use crate::player::SystemPlayer;

mod animation;
mod app;
mod art;
mod calendar;
mod config;
mod countdown;
mod guests;
mod input;
mod player;
mod popup;
mod scroll;
mod theme;
mod ui;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Parser)]
#[command(name = "kenduri")]
#[command(about = "Terminal invitation card for the Jamuan Kenduri KKTJMPPP")]
struct Cli {
    /// Jump straight to the invitation page
    #[arg(long)]
    skip_intro: bool,

    /// Leave the page still instead of drifting down
    #[arg(long)]
    no_autoscroll: bool,

    /// Never start background music
    #[arg(long)]
    no_audio: bool,

    /// Override the guest list CSV export URL
    #[arg(long)]
    sheet_url: Option<String>,

    /// Extra config file, layered over the usual ones
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(url) = cli.sheet_url {
        settings.sheet_url = url;
    }
    if cli.no_autoscroll {
        settings.auto_scroll = false;
    }
    if cli.skip_intro {
        settings.intro = false;
    }

    let _log_guard = init_logging()?;
    info!("kenduri starting");

    let rt = Runtime::new()?;
    let music = if cli.no_audio { None } else { settings.music_path() };
    let mut app = App::new(settings, Box::new(SystemPlayer::new(music)))?;

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if !app.settings.intro {
        app.skip_intro(&rt, Instant::now());
    }

    let result = run(&mut terminal, &mut app, &rt);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    rt: &Runtime,
) -> Result<()> {
    loop {
        app.tick(Instant::now(), Utc::now(), rt);
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    if !input::handle_key(key, app) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(mouse, app),
                _ => {}
            }
        }
    }
}

/// Diagnostics go to a file next to the user config; stdout belongs to
/// the TUI.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = config::config_dir();
    fs::create_dir_all(&dir)?;
    let file = tracing_appender::rolling::never(&dir, "kenduri.log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}
