//! Layout components (header, navigation bar, status bar)

use crate::app::App;
use crate::state::{DirectoryState, Step};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Firm name shown in the header
const BRAND: &str = "Magna Advogados";

/// Wizard steps shown in the navigation bar
const STEP_ITEMS: &[(Step, &str)] = &[
    (Step::ChooseType, "1 Documento e advogado"),
    (Step::FillFields, "2 Preencher dados"),
];

/// Screen regions, top to bottom
pub struct ShellAreas {
    pub header: Rect,
    pub nav: Rect,
    pub main: Rect,
    pub status: Rect,
}

/// Create the main layout
pub fn create_layout(area: Rect) -> ShellAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Navigation bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ShellAreas {
        header: chunks[0],
        nav: chunks[1],
        main: chunks[2],
        status: chunks[3],
    }
}

/// Draw the branded header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            BRAND,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  Gerador de documentos", Style::default().fg(Color::Gray)),
    ]);

    let header = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the step indicator
pub fn draw_nav_bar(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.step();
    let mut spans = vec![Span::raw(" ")];
    for (idx, (step, label)) in STEP_ITEMS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ›  ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(*label, style));
    }

    if let Some(doc_type) = app.state.wizard.document_type() {
        spans.push(Span::styled("   |  ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(doc_type.title(), Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Directory status
    let dir_status = match &app.state.directory {
        DirectoryState::Loading => Span::styled(" … ", Style::default().fg(Color::Yellow)),
        DirectoryState::Loaded(_) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        DirectoryState::Failed(_) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
    };
    spans.push(dir_status);

    spans.push(Span::styled(
        step_hints(app.state.step()),
        Style::default().fg(Color::Gray),
    ));

    if app.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Gerando documento…",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current step
fn step_hints(step: Step) -> String {
    match step {
        Step::ChooseType => "j/k:nav  Tab:list  Space:select  Enter:next  r:reload  q:quit".to_string(),
        Step::FillFields => format!(
            "Tab/Enter:next  ^U:clear  {}:gerar  Esc:back",
            crate::platform::SUBMIT_SHORTCUT
        ),
    }
}
