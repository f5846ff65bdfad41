//! Fill step: the active document form

use super::field_renderer::{draw_field, draw_help_text, scroll_offset, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::ui::components::{render_submit_button, SubmitState, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form for the chosen document type
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.wizard.form() else {
        return;
    };
    let parties = app.state.parties();
    let party = app.state.wizard.selected_party(parties);

    let title = format!(" {} ", form.document_type().title());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Selected party
            Constraint::Min(FIELD_HEIGHT),     // Fields
            Constraint::Length(BUTTON_HEIGHT), // Submit button
            Constraint::Length(1),             // Help text
        ])
        .split(inner);

    if let Some(party) = party {
        let line = Line::from(vec![
            Span::styled("Advogado: ", Style::default().fg(Color::DarkGray)),
            Span::styled(party.display_name(), Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }

    let fields = form.fields();
    let visible = (chunks[1].height / FIELD_HEIGHT) as usize;
    let offset = scroll_offset(form.active_field_index, visible, fields.len());

    let mut y = chunks[1].y;
    for (idx, field) in fields.iter().enumerate().skip(offset).take(visible) {
        let field_area = Rect {
            x: chunks[1].x,
            y,
            width: chunks[1].width,
            height: FIELD_HEIGHT,
        };
        draw_field(frame, field_area, field, idx == form.active_field_index);
        y += FIELD_HEIGHT;
    }

    let errors = form.error_count();
    let submit_state = if app.is_submitting() {
        SubmitState::Busy
    } else if errors > 0 {
        SubmitState::Invalid(errors)
    } else {
        SubmitState::Ready
    };
    render_submit_button(frame, chunks[2], submit_state, SUBMIT_SHORTCUT);

    let help = match &app.state.last_download {
        _ if errors > 0 => format!("{errors} campo(s) inválido(s)  |  Esc: voltar"),
        Some(path) => format!(
            "Último documento: {}  |  Esc: voltar",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => {
            format!("Tab: próximo campo  |  {SUBMIT_SHORTCUT}: gerar  |  Esc: voltar")
        }
    };
    draw_help_text(frame, chunks[3], &help);
}
