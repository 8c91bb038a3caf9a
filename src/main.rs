use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lingo_client::api::ApiClient;
use lingo_client::api_worker::spawn_api_worker;
use lingo_client::app::App;
use lingo_client::cli::{bank_report, run_author, run_logout, BankCommands, Cli, Commands};
use lingo_client::config::AppConfig;
use lingo_client::placement::QuestionBank;
use lingo_client::session_context::SessionStore;
use lingo_client::{db, logger, ui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_api_url(cli.api_url.clone());
    if let Some(path) = &cli.question_bank {
        config.question_bank = Some(path.clone());
    }

    if let Err(e) = logger::init(&config.log_path()) {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!("Starting lingo-client {}", env!("CARGO_PKG_VERSION"));

    let store = SessionStore::in_dir(&config.data_dir);

    match cli.command {
        Some(Commands::Author { action }) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            rt.block_on(run_author(action, &config, &store))
        }
        Some(Commands::Bank {
            action: BankCommands::Check { path },
        }) => {
            let path = path.or_else(|| config.question_bank.clone());
            println!("{}", bank_report(path.as_deref())?);
            Ok(())
        }
        Some(Commands::Logout) => run_logout(&store),
        None => run_tui(config, store),
    }
}

fn load_bank(config: &AppConfig) -> anyhow::Result<QuestionBank> {
    match &config.question_bank {
        Some(path) => QuestionBank::from_path(path)
            .with_context(|| format!("Invalid question bank {}", path.display())),
        None => QuestionBank::builtin().context("Built-in question bank is invalid"),
    }
}

fn run_tui(config: AppConfig, store: SessionStore) -> anyhow::Result<()> {
    let bank = load_bank(&config)?;
    let db = match db::init_db(&config.db_path()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            log::error!("Placement history disabled: {:#}", e);
            None
        }
    };

    let client = ApiClient::new(&config.api_base_url)?;
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let worker = spawn_api_worker(client, response_tx, request_rx)
        .context("Failed to start API worker")?;

    let mut app = App::new(config, bank, db, store, request_tx, response_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app closes the request channel so the worker exits.
    drop(app);
    if worker.join().is_err() {
        log::error!("API worker panicked");
    }
    log::info!("Exiting");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let mut needs_redraw = true;

    while !app.should_quit {
        if app.poll_responses() {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw(f, app))?;
            needs_redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}
