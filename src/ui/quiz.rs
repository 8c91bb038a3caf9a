use crate::placement::QuizQuestion;
use crate::screens::{QuizScreen, WordFocus};
use crate::ui::layout::{calculate_quiz_chunks, help_line, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn difficulty_label(question: &QuizQuestion) -> String {
    format!("{:?}", question.difficulty())
}

pub fn draw_quiz(f: &mut Frame, screen: &QuizScreen) {
    let layout = calculate_quiz_chunks(f.area());
    let collector = &screen.collector;
    let Some(question) = collector.current() else {
        return;
    };

    let progress = format!(
        "Question {} / {} - {}",
        collector.current_index() + 1,
        collector.len(),
        difficulty_label(question)
    );
    let header = Paragraph::new(progress)
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let (prompt, title) = match question {
        QuizQuestion::FillInTheBlank { question_text, .. } => {
            (Text::from(question_text.as_str()), "Fill in the blank")
        }
        QuizQuestion::SentenceReorder { hint, .. } => {
            let mut text = Text::from("Put the words in the right order.");
            if !hint.is_empty() {
                text.push_line(Line::from(Span::styled(
                    format!("Hint: {}", hint),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            (text, "Reorder the sentence")
        }
    };
    let question_widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(question_widget, layout.question_area);

    match question {
        QuizQuestion::FillInTheBlank { options, .. } => {
            let selected = collector.selected_option();
            let lines: Vec<Line> = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let marker = if selected == Some(i) { "(•)" } else { "( )" };
                    let style = if i == screen.cursor {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(
                        format!("{} {}. {}", marker, i + 1, option.text),
                        style,
                    ))
                })
                .collect();
            let answers = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Options"));
            f.render_widget(answers, layout.answer_area);
        }
        QuizQuestion::SentenceReorder { .. } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout.answer_area);

            let (available, assembled) = collector
                .word_bank()
                .map(|bank| (bank.available.as_slice(), bank.assembled.as_slice()))
                .unwrap_or_default();

            f.render_widget(
                word_row(available, screen.focus == WordFocus::Bank, screen.cursor, "Words"),
                chunks[0],
            );
            f.render_widget(
                word_row(
                    assembled,
                    screen.focus == WordFocus::Sentence,
                    screen.cursor,
                    "Your sentence",
                ),
                chunks[1],
            );
        }
    }

    let mut message = Text::default();
    if let Some(error) = &screen.message {
        message.push_line(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(warning) = &screen.warning {
        message.push_line(Line::from(Span::styled(
            warning.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    f.render_widget(Paragraph::new(message), layout.message_area);

    let keys = match question {
        QuizQuestion::FillInTheBlank { .. } => {
            help_line(&[("↑/↓", "Highlight"), ("Space/1-9", "Choose")])
        }
        QuizQuestion::SentenceReorder { .. } => help_line(&[
            ("←/→", "Highlight"),
            ("Space", "Move word"),
            ("Tab", "Switch list"),
        ]),
    };
    let help = Paragraph::new(vec![
        keys,
        help_line(&[
            ("Enter", "Next"),
            ("Backspace", "Previous"),
            ("Esc", "Quit to Menu"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn word_row<'a>(words: &'a [String], focused: bool, cursor: usize, title: &'a str) -> Paragraph<'a> {
    let spans: Vec<Span> = if words.is_empty() {
        vec![Span::styled(
            "(empty)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        words
            .iter()
            .enumerate()
            .flat_map(|(i, word)| {
                let style = if focused && i == cursor {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                [Span::styled(format!("[{}]", word), style), Span::from(" ")]
            })
            .collect()
    };

    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Leave the placement quiz? Your answers will be discarded.")
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled("Ctrl+C", title_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
