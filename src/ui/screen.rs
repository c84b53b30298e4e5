use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::{how_to_play::HowToPlay, NavBar};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Game screen - renders the selectors, stats and play area via the App widget
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// How to play screen - nav bar over the static instructions
pub struct HowToPlayScreen;

impl Screen for HowToPlayScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(f.area());

        f.render_widget(NavBar { state: app.state }, chunks[0]);
        f.render_widget(HowToPlay, chunks[1]);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Playing => Box::new(GameScreen),
        AppState::HowToPlay => Box::new(HowToPlayScreen),
    }
}
