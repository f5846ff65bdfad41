//! Choose step: document type and party lists

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{ChooseFocus, DirectoryState, DocumentType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn list_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn item_line(label: String, is_chosen: bool) -> ListItem<'static> {
    let marker = if is_chosen { "● " } else { "○ " };
    let style = if is_chosen {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(label, style),
    ]))
}

/// Draw the choose step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_document_types(frame, chunks[0], app);
    draw_parties(frame, chunks[1], app);
}

fn draw_document_types(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.choose_focus == ChooseFocus::DocumentTypes;
    let chosen = app.state.wizard.document_type();

    let items: Vec<ListItem> = DocumentType::ALL
        .iter()
        .map(|t| item_line(t.title().to_string(), chosen == Some(*t)))
        .collect();

    let list = List::new(items)
        .block(list_block("Tipo de documento", focused))
        .highlight_style(highlight(focused));
    render_scrollable_list(frame, area, list, app.state.type_cursor);
}

fn draw_parties(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.choose_focus == ChooseFocus::Parties;
    let block = list_block("Advogado / beneficiário", focused);

    let placeholder = match &app.state.directory {
        DirectoryState::Loading => Some(("Carregando advogados…".to_string(), Color::Yellow)),
        DirectoryState::Failed(msg) => Some((
            format!("Falha ao carregar: {msg}\n\nPressione 'r' para tentar novamente."),
            Color::Red,
        )),
        DirectoryState::Loaded(records) if records.is_empty() => {
            Some(("Nenhum advogado disponível.".to_string(), Color::DarkGray))
        }
        DirectoryState::Loaded(_) => None,
    };

    if let Some((text, color)) = placeholder {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let chosen = app.state.wizard.selected_party_index();
    let items: Vec<ListItem> = app
        .state
        .parties()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let label = if p.license_id.is_empty() {
                p.display_name().to_string()
            } else {
                format!("{} (OAB {})", p.display_name(), p.license_id)
            };
            item_line(label, chosen == Some(i))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight(focused));
    render_scrollable_list(frame, area, list, app.state.party_cursor);
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}
