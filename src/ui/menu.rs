use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::Route;
use crate::ui::history::format_history_item;
use crate::ui::layout::{calculate_page_chunks, help_line, title_style};

fn draw_panel_header(area: Rect, title: &str, f: &mut Frame) {
    let header = Paragraph::new(title)
        .style(title_style())
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

pub fn draw_welcome(f: &mut Frame, app: &App) {
    let layout = calculate_page_chunks(f.area());

    let title = Paragraph::new(format!("Lingo v{}", env!("CARGO_PKG_VERSION")))
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut lines = vec![
        Line::from(""),
        Line::from("Learn English one lesson at a time."),
        Line::from(""),
        Line::from("Take the placement quiz to find your level,"),
        Line::from("then work through lessons of vocabulary, grammar and exercises."),
        Line::from(""),
    ];
    match &app.session {
        Some(session) => lines.push(Line::from(format!("Signed in as {}", session.email))),
        None => lines.push(Line::from("Not signed in").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    }
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    let help = if app.session.is_some() {
        help_line(&[("Enter", "Get started"), ("q", "Quit")])
    } else {
        help_line(&[("Enter", "Get started"), ("s", "Sign in"), ("q", "Quit")])
    };
    let help = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let layout = calculate_page_chunks(f.area());

    let header_text = match &app.session {
        Some(session) => format!("Main Menu - {} ({})", session.full_name, session.role),
        None => "Main Menu".to_string(),
    };
    let title = Paragraph::new(header_text)
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let body_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(Route::ALL.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(layout.body_area);

    draw_panel_header(body_chunks[0], "Go to", f);

    let signed_in = app.session.is_some();
    let route_items: Vec<ListItem> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if i == app.menu_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", route.icon(), route.title(signed_in))).style(style)
        })
        .collect();
    let routes = List::new(route_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(routes, body_chunks[1]);

    draw_panel_header(body_chunks[2], "Recent placement results", f);

    let history_items: Vec<ListItem> = if app.history.is_empty() {
        vec![ListItem::new("No placement results yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.history
            .iter()
            .enumerate()
            .map(|(i, record)| ListItem::new(format!("{}. {}", i + 1, format_history_item(record))))
            .collect()
    };
    let history = List::new(history_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(history, body_chunks[3]);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Yellow));
        f.render_widget(notice, body_chunks[4]);
    }

    let help = Paragraph::new(help_line(&[
        ("↑/↓", "Navigate"),
        ("Enter", "Select"),
        ("1-5", "Review result"),
        ("q/Ctrl+C", "Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
