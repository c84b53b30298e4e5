use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{info, warn};
use wordhop::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    countdown::{CountdownSlot, TICK_PERIOD},
    game::{Category, Difficulty, GameController},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui, WordBank,
};

/// word chain game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Keep the word chain going: every word must start with the last letter of the previous one. Build streaks, and in timed mode earn extra seconds for every correct word."
)]
pub struct Cli {
    /// category to play (remembered between runs)
    #[clap(short = 'c', long, value_enum)]
    category: Option<Category>,

    /// difficulty mode (remembered between runs)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seconds on the clock when a timed game starts
    #[clap(short = 't', long)]
    time_limit: Option<u32>,

    /// seconds added for every accepted word in timed mode
    #[clap(short = 'b', long)]
    bonus: Option<u32>,

    /// seed the word picker for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// do not remember the selected category and difficulty on exit
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Command line values win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(category) = self.category {
            config.category = Some(category);
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = Some(difficulty);
        }
        if let Some(secs) = self.time_limit {
            config.start_secs = secs;
        }
        if let Some(secs) = self.bonus {
            config.bonus_secs = secs;
        }
        config
    }

    fn build_game(&self, bank: WordBank, config: &Config) -> GameController {
        let mut game = match self.seed {
            Some(seed) => GameController::with_seed(bank, config.timer_settings(), seed),
            None => GameController::new(bank, config.timer_settings()),
        };
        game.select_category(config.category);
        game.select_difficulty(config.difficulty);
        game
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let mut config = cli.apply(store.load());
    let bank = WordBank::load()?;
    let mut app = App::new(cli.build_game(bank, &config));
    info!(?config, "starting wordhop");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if !cli.no_save {
        config.remember_selection(app.game.category(), app.game.difficulty());
        if let Err(err) = store.save(&config) {
            warn!(%err, "failed to save config");
            eprintln!("could not save config to {}: {err}", store.path().display());
        }
    }

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let sender = events.sender();
    let runner = Runner::new(events, FixedTicker::default());
    let mut countdown = CountdownSlot::new();

    loop {
        countdown.sync(app.game.countdown_session(), TICK_PERIOD, &sender);
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();
        if let GameEvent::Tick = event {
            continue;
        }
        if app.handle(event) == Control::Quit {
            break;
        }
    }

    countdown.clear();
    Ok(())
}
