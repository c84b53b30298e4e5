use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Category, Difficulty, GameController};
use crate::runtime::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Playing,
    HowToPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Application shell around the game controller: screen state and key bindings.
#[derive(Debug)]
pub struct App {
    pub game: GameController,
    pub state: AppState,
    /// Why the last start attempt failed, shown until the next key
    pub notice: Option<String>,
}

impl App {
    pub fn new(game: GameController) -> Self {
        Self {
            game,
            state: AppState::Playing,
            notice: None,
        }
    }

    pub fn handle(&mut self, event: GameEvent) -> Control {
        match event {
            GameEvent::Key(key) => self.on_key(key),
            GameEvent::Countdown(session) => {
                self.game.tick(session);
                Control::Continue
            }
            GameEvent::Tick | GameEvent::Resize => Control::Continue,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        self.notice = None;

        if key.code == KeyCode::Tab {
            self.toggle_how_to_play();
            return Control::Continue;
        }

        match self.state {
            AppState::HowToPlay => match key.code {
                KeyCode::Char('q') => return Control::Quit,
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Enter => {
                    self.state = AppState::Playing;
                }
                _ => {}
            },
            AppState::Playing => {
                if self.on_selection_key(key.code) {
                    return Control::Continue;
                }

                if self.game.is_running() {
                    match key.code {
                        KeyCode::Esc => self.game.reset_game(),
                        KeyCode::Enter => {
                            self.game.submit_pending();
                        }
                        KeyCode::Backspace => self.game.pop_input(),
                        KeyCode::Char(c)
                            if !key
                                .modifiers
                                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                        {
                            self.game.push_input(c)
                        }
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                        KeyCode::Enter | KeyCode::Char('s') => {
                            if let Err(err) = self.game.start_game() {
                                self.notice = Some(err.to_string());
                            }
                        }
                        KeyCode::Char('r') => self.game.reset_game(),
                        KeyCode::Char('?') => self.state = AppState::HowToPlay,
                        _ => {}
                    }
                }
            }
        }

        Control::Continue
    }

    fn toggle_how_to_play(&mut self) {
        self.state = match self.state {
            AppState::Playing => AppState::HowToPlay,
            AppState::HowToPlay => AppState::Playing,
        };
    }

    /// Arrow keys act like the category and difficulty dropdowns.
    fn on_selection_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left | KeyCode::Right => {
                let next = cycle(&Category::ALL, self.game.category(), code == KeyCode::Right);
                self.game.select_category(next);
                true
            }
            KeyCode::Up | KeyCode::Down => {
                let next = cycle(&Difficulty::ALL, self.game.difficulty(), code == KeyCode::Down);
                self.game.select_difficulty(next);
                true
            }
            _ => false,
        }
    }
}

/// Step through `None` followed by every option, wrapping at both ends.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let positions = options.len() + 1;
    let index = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (index + 1) % positions
    } else {
        (index + positions - 1) % positions
    };
    next.checked_sub(1).map(|i| options[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Submission, TimerSettings};
    use crate::word_bank::WordBank;
    use assert_matches::assert_matches;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));
    }

    fn test_app() -> App {
        let bank = WordBank::from_lists([
            (Category::Countries, vec!["Egypt"]),
            (Category::Sports, vec!["Boxing"]),
        ]);
        App::new(GameController::with_seed(bank, TimerSettings::default(), 11))
    }

    fn configured_app() -> App {
        let mut app = test_app();
        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Down));
        app
    }

    #[test]
    fn test_cycle_wraps_through_unset() {
        let all = Category::ALL;
        assert_eq!(cycle(&all, None, true), Some(Category::Countries));
        assert_eq!(cycle(&all, Some(Category::Countries), true), Some(Category::Sports));
        assert_eq!(cycle(&all, Some(Category::Sports), true), None);
        assert_eq!(cycle(&all, None, false), Some(Category::Sports));
        assert_eq!(cycle(&all, Some(Category::Countries), false), None);
    }

    #[test]
    fn test_arrow_keys_select() {
        let app = configured_app();
        assert_eq!(app.game.category(), Some(Category::Countries));
        assert_eq!(app.game.difficulty(), Some(Difficulty::Untimed));
        assert_eq!(app.game.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_without_selection_sets_notice() {
        let mut app = test_app();
        assert_eq!(app.on_key(key(KeyCode::Enter)), Control::Continue);

        assert_eq!(app.notice.as_deref(), Some("select a category before starting"));
        assert!(!app.game.is_running());

        app.on_key(key(KeyCode::Right));
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_full_round_through_keys() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Char('s')));
        assert!(app.game.is_running());
        assert_eq!(app.game.current_word(), "Egypt");

        type_word(&mut app, "Tonga");
        assert_eq!(app.game.word_chain(), ["Egypt", "Tonga"]);

        // 'q', 'r' and 's' are letters while playing
        type_word(&mut app, "qrs");
        assert_eq!(app.game.warning(), Some("Word must start with \"A\""));
        assert_eq!(app.game.current_streak(), 0);
        assert_eq!(app.game.best_streak(), 1);

        app.on_key(key(KeyCode::Char('A')));
        app.on_key(key(KeyCode::Char('x')));
        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.game.pending_input(), "A");
    }

    #[test]
    fn test_escape_while_running_resets() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Enter));
        type_word(&mut app, "Togo");

        assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Continue);
        assert!(!app.game.is_running());
        assert!(app.game.word_chain().is_empty());
        assert_eq!(app.game.best_streak(), 1);

        assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Quit);
    }

    #[test]
    fn test_changing_category_mid_game_resets() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Right));

        assert_eq!(app.game.category(), Some(Category::Sports));
        assert!(!app.game.is_running());
    }

    #[test]
    fn test_how_to_play_navigation() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::HowToPlay);

        // Keys on the help screen do not reach the game
        app.on_key(key(KeyCode::Char('s')));
        assert!(!app.game.is_running());

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Playing);

        app.on_key(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::HowToPlay);
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Control::Quit);
    }

    #[test]
    fn test_modified_chars_do_not_type() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('T')));

        app.on_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.game.pending_input(), "T");

        app.on_key(KeyEvent::new(KeyCode::Char('O'), KeyModifiers::SHIFT));
        assert_eq!(app.game.pending_input(), "TO");
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let mut app = configured_app();
        app.on_key(key(KeyCode::Enter));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), Control::Quit);
    }

    #[test]
    fn test_handle_routes_countdown() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.game.difficulty(), Some(Difficulty::Timed));
        app.on_key(key(KeyCode::Enter));
        let session = app.game.session();

        assert_eq!(app.handle(GameEvent::Countdown(session)), Control::Continue);
        assert_eq!(app.game.time_remaining(), 29);
        app.handle(GameEvent::Tick);
        app.handle(GameEvent::Resize);
        assert_eq!(app.game.time_remaining(), 29);

        type_word(&mut app, "Togo");
        assert_eq!(app.game.time_remaining(), 31);
        assert_matches!(app.game.submit_word("x"), Submission::Rejected { required: 'o' });
    }
}
