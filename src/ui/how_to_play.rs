use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const STEPS: [&str; 6] = [
    "Choose a category",
    "Pick a difficulty mode",
    "A word will appear to start the game",
    "Type a new word that starts with the last letter of the previous word",
    "Earn points for each correct word",
    "If you're in Timed mode, each correct word gives you extra time",
];

/// Static instructions, no game state involved
pub struct HowToPlay;

impl Widget for HowToPlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(
                "How to Play",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::default(),
            Line::from("Welcome to WordHop"),
            Line::default(),
        ];
        lines.extend(
            STEPS
                .iter()
                .enumerate()
                .map(|(i, step)| Line::from(format!("{}. {step}", i + 1))),
        );

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_all_steps() {
        let area = Rect::new(0, 0, 90, 14);
        let mut buffer = Buffer::empty(area);

        HowToPlay.render(area, &mut buffer);

        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("How to Play"));
        assert!(content.contains("Welcome to WordHop"));
        assert!(content.contains("1. Choose a category"));
        assert!(content.contains("6. If you're in Timed mode"));
    }
}
