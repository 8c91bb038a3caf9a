use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub message_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub score_area: Rect,
    pub review_area: Rect,
    pub footer_area: Rect,
}

/// Header, body and footer used by the menu, sign-in and lesson screens.
pub struct PageLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(2),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        answer_area: chunks[2],
        message_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        score_area: chunks[1],
        review_area: chunks[2],
        footer_area: chunks[3],
    }
}

pub fn calculate_page_chunks(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    PageLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// `key label` pairs rendered as the footer help line.
pub fn help_line(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, title_style()),
                Span::from(format!(" {}  ", label)),
            ]
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.question_area.height, 5);
        assert_eq!(layout.message_area.height, 2);
        assert_eq!(layout.help_area.height, 4);
        // 38 rows inside the margin, 14 taken by fixed rows.
        assert_eq!(layout.answer_area.height, 24);
    }

    #[test]
    fn test_results_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_results_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.score_area.height, 6);
        assert_eq!(layout.footer_area.height, 3);
        assert_eq!(layout.review_area.height, 38 - 12);
    }

    #[test]
    fn test_page_layout() {
        let layout = calculate_page_chunks(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.body_area.height, 16);
        assert_eq!(layout.footer_area.y, 20);
    }

    #[test]
    fn test_help_line() {
        let line = help_line(&[("Enter", "Next"), ("Esc", "Quit")]);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "Enter");
        assert_eq!(line.spans[1].content, " Next  ");
    }
}
