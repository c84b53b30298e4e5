pub mod how_to_play;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, AppState},
    game::GameController,
};

const HORIZONTAL_MARGIN: u16 = 2;
const INPUT_MIN_WIDTH: u16 = 30;

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

/// Persistent top bar: brand on the left, the how-to-play action on the right.
pub struct NavBar {
    pub state: AppState,
}

impl Widget for NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .style(Style::default().fg(Color::Black).bg(Color::LightBlue));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(inner);

        Paragraph::new(Span::styled(
            "WordHop",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(chunks[0], buf);

        let action = match self.state {
            AppState::Playing => "How To Play [Tab]",
            AppState::HowToPlay => "Back to Game [Tab]",
        };
        Paragraph::new(Span::styled(
            action,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;
        let configured = game.category().is_some() && game.difficulty().is_some();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                              // nav bar
                Constraint::Length(1),                              // title
                Constraint::Length(1),                              // subtitle
                Constraint::Length(1),                              // selectors
                Constraint::Length(1),                              // notice
                Constraint::Length(if configured { 6 } else { 0 }), // stats panel
                Constraint::Min(0),                                 // play area
                Constraint::Length(1),                              // legend
            ])
            .split(area);

        NavBar { state: self.state }.render(chunks[0], buf);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        Paragraph::new(Span::styled(
            "Word Chain Game",
            bold_style.fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            "Select a category and difficulty, then keep the word chain going!",
            dim_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        render_selectors(game, chunks[3], buf);

        if let Some(notice) = &self.notice {
            Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Red)))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        if configured {
            render_stats_panel(game, chunks[5], buf);
        }

        if game.is_running() {
            render_play_area(game, chunks[6], buf);
        }

        let legend = if game.is_running() {
            "type a word / (enter) submit / (esc) reset / ←→ category / ↑↓ difficulty / (tab) how to play"
        } else {
            "←→ category / ↑↓ difficulty / (enter) start / (r)eset / (tab) how to play / (esc)ape"
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
    }
}

fn render_selectors(game: &GameController, area: Rect, buf: &mut Buffer) {
    let selector_style = Style::default().fg(Color::Black).bg(Color::LightBlue);

    let category = game
        .category()
        .map_or_else(|| "Select Category".to_string(), |c| c.to_string());
    let difficulty = game
        .difficulty()
        .map_or_else(|| "Select Difficulty".to_string(), |d| d.to_string());

    let line = Line::from(vec![
        Span::styled(format!(" ◂ {category} ▸ "), selector_style),
        Span::raw("   "),
        Span::styled(format!(" ▴ {difficulty} ▾ "), selector_style),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_stats_panel(game: &GameController, area: Rect, buf: &mut Buffer) {
    let (Some(category), Some(difficulty)) = (game.category(), game.difficulty()) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {category} | {difficulty} Mode "))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // values
            Constraint::Length(1), // labels
            Constraint::Length(1), // padding
            Constraint::Length(1), // actions
        ])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    let label_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);

    let value_style = Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    let stats = [
        (game.score().to_string(), "Score"),
        (game.current_streak().to_string(), "Current Streak"),
        (game.best_streak().to_string(), "Highest Streak"),
        (game.word_chain().len().to_string(), "Words"),
    ];

    for (i, (value, label)) in stats.into_iter().enumerate() {
        Paragraph::new(Span::styled(value, value_style))
            .alignment(Alignment::Center)
            .render(columns[i], buf);
        Paragraph::new(Span::raw(label))
            .alignment(Alignment::Center)
            .render(label_columns[i], buf);
    }

    if !game.is_running() {
        let mut spans = Vec::new();
        if game.is_expired() {
            spans.push(Span::styled(
                "Time's up!   ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(
            "[Enter] Start Game",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   [r] Reset"));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(rows[3], buf);
    }
}

fn render_play_area(game: &GameController, area: Rect, buf: &mut Buffer) {
    let required = game
        .required_letter()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),                                   // padding
            Constraint::Length(if game.is_timed() { 1 } else { 0 }), // timer
            Constraint::Length(1),                                   // prompt
            Constraint::Length(3),                                   // input box
            Constraint::Length(1),                                   // chain header
            Constraint::Min(1),                                      // chain
            Constraint::Length(2),                                   // warning
        ])
        .split(area);

    if game.is_timed() {
        Paragraph::new(Span::styled(
            format!("{}s remaining", game.time_remaining()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }

    Paragraph::new(Line::from(vec![
        Span::raw("Type a word starting with: "),
        Span::styled(
            required.clone(),
            Style::default()
                .fg(Color::Indexed(61))
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let (shown, style) = if game.pending_input().is_empty() {
        (
            format!("Start with \"{required}\""),
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        (game.pending_input().to_string(), Style::default())
    };
    let width = (shown.width() as u16 + 4)
        .max(INPUT_MIN_WIDTH)
        .min(chunks[3].width);
    let input_area = centered(chunks[3], width);
    Paragraph::new(Span::styled(shown, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(input_area, buf);

    Paragraph::new(Span::styled(
        "Word Chain",
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .render(chunks[4], buf);

    let chain_style = Style::default().fg(Color::Indexed(18)).bg(Color::LightBlue);
    let words = game
        .word_chain()
        .iter()
        .map(|word| Span::styled(format!(" {word} "), chain_style));
    let spans: Vec<Span> = Itertools::intersperse(words, Span::raw(" → ")).collect();
    Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);

    if let Some(warning) = game.warning() {
        Paragraph::new(vec![
            Line::from(Span::styled(
                warning,
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::SLOW_BLINK),
            )),
            Line::from(Span::styled(
                "Streak reset to 0!",
                Style::default().fg(Color::LightRed),
            )),
        ])
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Category, Difficulty, TimerSettings};
    use crate::word_bank::WordBank;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        let bank = WordBank::from_lists([
            (Category::Countries, vec!["Egypt"]),
            (Category::Sports, vec!["Boxing"]),
        ]);
        App::new(GameController::with_seed(bank, TimerSettings::default(), 0))
    }

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_unconfigured_shows_placeholders() {
        let app = test_app();
        let content = rendered(&app, 100, 30);

        assert!(content.contains("WordHop"));
        assert!(content.contains("How To Play [Tab]"));
        assert!(content.contains("Word Chain Game"));
        assert!(content.contains("Select Category"));
        assert!(content.contains("Select Difficulty"));
        assert!(!content.contains("Score"));
    }

    #[test]
    fn test_configured_idle_shows_stats_and_actions() {
        let mut app = test_app();
        app.game.select_category(Some(Category::Countries));
        app.game.select_difficulty(Some(Difficulty::Untimed));
        let content = rendered(&app, 100, 30);

        assert!(content.contains("Countries | Untimed Mode"));
        assert!(content.contains("Score"));
        assert!(content.contains("Highest Streak"));
        assert!(content.contains("[Enter] Start Game"));
        assert!(!content.contains("Type a word starting with"));
    }

    #[test]
    fn test_running_timed_game() {
        let mut app = test_app();
        app.game.select_category(Some(Category::Countries));
        app.game.select_difficulty(Some(Difficulty::Timed));
        app.game.start_game().unwrap();
        app.game.submit_word("Togo");
        app.game.submit_word("zebra");
        let content = rendered(&app, 100, 30);

        assert!(content.contains("32s remaining"));
        assert!(content.contains("Type a word starting with: O"));
        assert!(content.contains("Start with \"O\""));
        assert!(content.contains("Egypt"));
        assert!(content.contains("Togo"));
        assert!(content.contains("→"));
        assert!(content.contains("Word must start with \"O\""));
        assert!(content.contains("Streak reset to 0!"));
        assert!(content.contains("20"));
    }

    #[test]
    fn test_untimed_game_hides_timer() {
        let mut app = test_app();
        app.game.select_category(Some(Category::Sports));
        app.game.select_difficulty(Some(Difficulty::Untimed));
        app.game.start_game().unwrap();
        app.game.push_input('G');
        let content = rendered(&app, 100, 30);

        assert!(!content.contains("remaining"));
        assert!(content.contains("Boxing"));
        assert!(content.contains("Type a word starting with: G"));
    }

    #[test]
    fn test_expired_game_shows_times_up() {
        let mut app = test_app();
        app.game.select_category(Some(Category::Countries));
        app.game.select_difficulty(Some(Difficulty::Timed));
        let session = app.game.start_game().unwrap();
        for _ in 0..30 {
            app.game.tick(session);
        }
        let content = rendered(&app, 100, 30);

        assert!(content.contains("Time's up!"));
        assert!(!content.contains("remaining"));
    }

    #[test]
    fn test_notice_is_rendered() {
        let mut app = test_app();
        app.notice = Some("select a category before starting".to_string());
        let content = rendered(&app, 100, 30);

        assert!(content.contains("select a category before starting"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        app.game.select_category(Some(Category::Countries));
        app.game.select_difficulty(Some(Difficulty::Timed));
        app.game.start_game().unwrap();
        rendered(&app, 10, 5);
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 3);
        assert_eq!(centered(area, 30), Rect::new(35, 0, 30, 3));
        assert_eq!(centered(area, 200), area);
    }
}
