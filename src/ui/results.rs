use crate::placement::Recommendation;
use crate::screens::ResultsScreen;
use crate::ui::layout::{calculate_results_chunks, help_line, title_style};
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

fn recommendation_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::Beginner => Color::Yellow,
        Recommendation::Intermediate => Color::Cyan,
        Recommendation::Advanced => Color::Green,
    }
}

pub fn draw_results(f: &mut Frame, screen: &ResultsScreen, notice: Option<&str>) {
    let layout = calculate_results_chunks(f.area());
    let result = &screen.result;

    let title = Paragraph::new("Placement Results")
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let color = recommendation_color(result.recommendation);
    let gauge = Gauge::default()
        .block(
            Block::default().borders(Borders::ALL).title(Line::from(vec![
                Span::from(format!(
                    " {} / {} correct - recommended level: ",
                    result.correct, result.total
                )),
                Span::styled(
                    result.recommendation.label(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::from(" "),
            ])),
        )
        .gauge_style(Style::default().fg(color))
        .percent(result.percentage.min(100) as u16)
        .label(format!("{}%", result.percentage));
    f.render_widget(gauge, layout.score_area);

    let mut review = Text::default();
    if let Some(notice) = notice {
        review.push_line(Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Yellow),
        )));
        review.push_line(Line::from(""));
    }
    for (i, row) in screen.rows.iter().enumerate() {
        let (mark, mark_style) = if row.correct {
            ("[✓]", Style::default().fg(Color::Green))
        } else {
            ("[✗]", Style::default().fg(Color::Red))
        };
        review.push_line(Line::from(vec![
            Span::styled(mark, mark_style),
            Span::from(format!(" {}. {}", i + 1, truncate_string(&row.prompt, 70))),
        ]));
        review.push_line(Line::from(format!(
            "     Your answer: {}",
            row.given.as_deref().unwrap_or("-")
        )));
        if !row.correct {
            review.push_line(Line::from(Span::styled(
                format!("     Correct: {}", row.expected),
                Style::default().fg(Color::Green),
            )));
        } else {
            review.push_line(Line::from(""));
        }
    }

    let review_title = match screen.saved_id {
        Some(id) => format!("Review (saved as #{})", id),
        None => "Review".to_string(),
    };
    let review = Paragraph::new(review)
        .wrap(Wrap { trim: false })
        .scroll((screen.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(review_title));
    f.render_widget(review, layout.review_area);

    let help = Paragraph::new(help_line(&[
        ("↑/↓", "Scroll"),
        ("r", "Retake"),
        ("m", "Main Menu"),
        ("Ctrl+C", "Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
