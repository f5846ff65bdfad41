//! Submit button for the document form

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// What the submit button can do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Ready,
    /// Last attempt left invalid fields
    Invalid(usize),
    /// A request is in flight; presses are ignored
    Busy,
}

impl SubmitState {
    pub fn label(&self, shortcut: &str) -> String {
        match self {
            Self::Ready => format!("Gerar documento ({shortcut})"),
            Self::Invalid(count) => format!("Gerar documento ({shortcut}) · {count} erro(s)"),
            Self::Busy => "Gerando…".to_string(),
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Ready => Color::Cyan,
            Self::Invalid(_) => Color::Red,
            Self::Busy => Color::Yellow,
        }
    }
}

/// Render the submit button sized to its label
pub fn render_submit_button(frame: &mut Frame, area: Rect, state: SubmitState, shortcut: &str) {
    let label = state.label(shortcut);
    let color = state.color();

    let mut text_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if state == SubmitState::Busy {
        text_style = text_style.add_modifier(Modifier::DIM);
    }

    let width = (label.chars().count() as u16 + 4).min(area.width);
    let button_area = Rect { width, ..area };

    let paragraph = Paragraph::new(format!(" {label} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(paragraph.block(block), button_area);
}
