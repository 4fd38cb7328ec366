use crate::app::{App, Focus};
use crate::route::Route;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const LIST_WIDTH: u16 = 30;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into page area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match app.route() {
        Route::Root { .. } => render_root(frame, app, chunks[0]),
        Route::Examples => frame.render_widget(app.gallery().widget(app.dataset()), chunks[0]),
    }
    render_status_bar(frame, app, chunks[1]);
}

fn render_root(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LIST_WIDTH)])
        .split(area);

    let map = app.map();
    let title = if map.is_standalone() {
        " World Map · standalone "
    } else {
        " World Map "
    };
    let border = if app.focus() == Focus::Map {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(map.widget(app.dataset()).block(block), chunks[0]);
    frame.render_widget(app.list().widget(app.focus() == Focus::List), chunks[1]);
}

fn toggle_span(on: bool, on_text: &'static str, off_text: &'static str) -> Span<'static> {
    Span::styled(
        if on { on_text } else { off_text },
        Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
    )
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let status = match app.route() {
        Route::Root { .. } => {
            let map = app.map();
            let view = map.view();
            Line::from(vec![
                Span::styled(" Zoom: ", dim),
                Span::styled(map.camera_summary(), Style::default().fg(Color::Yellow)),
                Span::styled(" | ", dim),
                Span::styled(app.selection_label(), Style::default().fg(Color::Cyan)),
                Span::styled(" ", dim),
                toggle_span(view.show_unselected, "[U]nselected ", "[u]nselected "),
                Span::styled(format!("| {} regions ({}) ", app.dataset().len(), app.dataset().origin()), dim),
                Span::styled(
                    "| hjkl:pan +/-:zoom u:toggle r:reset tab:list g:examples q:quit",
                    dim,
                ),
            ])
        }
        Route::Examples => {
            let gallery = app.gallery();
            Line::from(vec![
                Span::styled(" Examples ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("| code: {} ", gallery.expanded().unwrap_or("closed")),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    "| tab:focus enter:code o:open click:open g:map q:quit",
                    dim,
                ),
            ])
        }
    };

    frame.render_widget(Paragraph::new(status), area);
}
