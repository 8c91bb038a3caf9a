use crate::screens::{AuthMode, SignInScreen};
use crate::ui::layout::{calculate_page_chunks, help_line, title_style};
use crate::utils::{centered_rect, scroll_to_cursor};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

pub fn draw_sign_in(f: &mut Frame, screen: &SignInScreen) {
    let layout = calculate_page_chunks(f.area());

    let title = Paragraph::new(screen.mode.title())
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let fields = screen.fields();
    let form_area = centered_rect(60, 100, layout.body_area);
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(form_area);

    for (i, field) in fields.iter().enumerate() {
        let focused = i == screen.focus;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let inner_width = chunks[i].width.saturating_sub(2) as usize;
        let (visible, column) = scroll_to_cursor(&field.display(), field.cursor(), inner_width);
        let input = Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.label),
        );
        f.render_widget(input, chunks[i]);

        if focused && !screen.pending {
            f.set_cursor_position((chunks[i].x + 1 + column as u16, chunks[i].y + 1));
        }
    }

    let mut status: Vec<Line> = screen
        .errors
        .iter()
        .map(|e| Line::from(Span::styled(e.as_str(), Style::default().fg(Color::Red))))
        .collect();
    if screen.pending {
        status.push(Line::from(Span::styled(
            "Contacting server...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    f.render_widget(Paragraph::new(status), chunks[fields.len()]);

    let toggle = match screen.mode {
        AuthMode::SignIn => "Create account",
        AuthMode::SignUp => "Have an account? Sign in",
    };
    let help = Paragraph::new(vec![
        help_line(&[("Tab/↑/↓", "Field"), ("Enter", "Submit"), ("Esc", "Back")]),
        Line::from(vec![Span::styled("Ctrl+T", title_style()), Span::from(format!(" {}", toggle))]),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    f.render_widget(help, layout.footer_area);
}
