use crate::screens::{ExerciseRef, LessonPickerScreen, LessonScreen, LessonTab, Practice};
use crate::ui::layout::{calculate_page_chunks, help_line, title_style};
use crate::utils::{centered_rect, truncate_string, wrap_chars, wrapped_cursor_position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub fn draw_lesson_picker(f: &mut Frame, screen: &LessonPickerScreen) {
    let layout = calculate_page_chunks(f.area());

    let title = Paragraph::new("Open a lesson")
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let form = centered_rect(40, 100, layout.body_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(form);

    let input = Paragraph::new(screen.input.value()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(screen.input.label),
    );
    f.render_widget(input, chunks[0]);
    f.set_cursor_position((chunks[0].x + 1 + screen.input.cursor() as u16, chunks[0].y + 1));

    if let Some(error) = &screen.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[1]);
    }

    let help = Paragraph::new(help_line(&[("0-9", "Lesson number"), ("Enter", "Open"), ("Esc", "Back")]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

pub fn draw_lesson(f: &mut Frame, screen: &LessonScreen) {
    let layout = calculate_page_chunks(f.area());

    let titles: Vec<Line> = LessonTab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected_tab = LessonTab::ALL
        .iter()
        .position(|t| *t == screen.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Lesson {}", screen.lesson_id))
                .title_style(title_style()),
        );
    f.render_widget(tabs, layout.header_area);

    match (&screen.content, &screen.error) {
        (_, Some(error)) => {
            let body = Paragraph::new(vec![
                Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from("Press r to try again."),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(body, layout.body_area);
        }
        (None, None) => {
            let body = Paragraph::new(Span::styled("Loading lesson...", dim_style()))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(body, layout.body_area);
        }
        (Some(_), None) => match screen.tab {
            LessonTab::Vocabulary => draw_vocabulary(f, screen, layout.body_area),
            LessonTab::Grammar => draw_grammar(f, screen, layout.body_area),
            LessonTab::Exercises => draw_exercises(f, screen, layout.body_area),
        },
    }

    let keys: &[(&str, &str)] = match screen.tab {
        LessonTab::Vocabulary => &[
            ("Tab", "Section"),
            ("↑/↓", "Select"),
            ("n/p", "Page"),
            ("Esc", "Back"),
        ],
        LessonTab::Grammar => &[("Tab", "Section"), ("↑/↓", "Select"), ("Esc", "Back")],
        LessonTab::Exercises => &[
            ("Tab", "Section"),
            ("↑/↓", "Select"),
            ("Enter", "Practice"),
            ("Esc", "Back"),
        ],
    };
    let help = Paragraph::new(help_line(keys))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);

    if let Some(practice) = &screen.practice {
        draw_practice(f, screen, practice);
    }
}

fn split_list_detail(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);
    (chunks[0], chunks[1])
}

fn list_items<'a>(labels: impl Iterator<Item = String>, selected: usize, empty: &'a str) -> Vec<ListItem<'a>> {
    let items: Vec<ListItem> = labels
        .enumerate()
        .map(|(i, label)| {
            let style = if i == selected {
                selected_style()
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();
    if items.is_empty() {
        vec![ListItem::new(empty).style(dim_style())]
    } else {
        items
    }
}

fn draw_vocabulary(f: &mut Frame, screen: &LessonScreen, area: Rect) {
    let Some(content) = &screen.content else {
        return;
    };
    let page = &content.vocabulary;
    let (list_area, detail_area) = split_list_detail(area);

    let items = list_items(
        page.content.iter().map(|v| truncate_string(&v.word, 30)),
        screen.selected,
        "No vocabulary in this lesson",
    );
    let page_title = format!(
        "Words - page {} / {}{}",
        page.number + 1,
        page.total_pages.max(1),
        if screen.loading { " (loading)" } else { "" }
    );
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(page_title)),
        list_area,
    );

    let mut detail = Text::default();
    if let Some(word) = page.content.get(screen.selected) {
        detail.push_line(Line::from(vec![
            Span::styled(word.word.as_str(), title_style()),
            Span::styled(format!("  ({})", word.word_type), dim_style()),
        ]));
        detail.push_line(Line::from(""));
        detail.push_line(Line::from(word.meaning.as_str()));
        if !word.example.is_empty() {
            detail.push_line(Line::from(""));
            detail.push_line(Line::from(Span::styled(
                format!("\"{}\"", word.example),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(image) = &word.image {
            detail.push_line(Line::from(""));
            detail.push_line(Line::from(Span::styled(format!("Image: {}", image), dim_style())));
        }
    }
    f.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Meaning")),
        detail_area,
    );
}

fn draw_grammar(f: &mut Frame, screen: &LessonScreen, area: Rect) {
    let Some(content) = &screen.content else {
        return;
    };
    let (list_area, detail_area) = split_list_detail(area);

    let items = list_items(
        content.grammar.iter().map(|g| truncate_string(&g.grammar_title, 30)),
        screen.selected,
        "No grammar in this lesson",
    );
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Topics")),
        list_area,
    );

    let mut detail = Text::default();
    if let Some(grammar) = content.grammar.get(screen.selected) {
        detail.push_line(Line::from(Span::styled(
            grammar.grammar_title.as_str(),
            title_style(),
        )));
        for (heading, body) in [
            ("", grammar.grammar_content.as_str()),
            ("Usage", grammar.grammar_usage.as_str()),
            ("Example", grammar.grammar_example.as_str()),
        ] {
            if body.is_empty() {
                continue;
            }
            detail.push_line(Line::from(""));
            if !heading.is_empty() {
                detail.push_line(Line::from(Span::styled(
                    heading,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
            detail.push_line(Line::from(body));
        }
    }
    f.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Explanation")),
        detail_area,
    );
}

fn draw_exercises(f: &mut Frame, screen: &LessonScreen, area: Rect) {
    let labels = screen.exercise_refs().into_iter().map(|exercise| {
        let kind = match exercise {
            ExerciseRef::MultipleChoice(_) => "Choice",
            ExerciseRef::Rewriting(_) => "Rewrite",
        };
        let prompt = screen.exercise_prompt(exercise).unwrap_or_default();
        format!("[{}] {}", kind, truncate_string(prompt, 70))
    });
    let items = list_items(labels, screen.selected, "No exercises in this lesson");
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Exercises")),
        area,
    );
}

fn draw_practice(f: &mut Frame, screen: &LessonScreen, practice: &Practice) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let prompt = screen.exercise_prompt(practice.exercise).unwrap_or_default();
    let title = match practice.exercise {
        ExerciseRef::MultipleChoice(_) => "Choose the answer",
        ExerciseRef::Rewriting(_) => "Rewrite the sentence",
    };
    let mut prompt_text = Text::from(prompt);
    if let (ExerciseRef::Rewriting(i), Some(content)) = (practice.exercise, &screen.content)
        && let Some(hint) = content
            .exercises
            .list_sentence_rewriting
            .get(i)
            .and_then(|e| e.hint.as_deref())
    {
        prompt_text.push_line(Line::from(Span::styled(format!("Hint: {}", hint), dim_style())));
    }
    f.render_widget(
        Paragraph::new(prompt_text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(title).title_style(title_style())),
        chunks[0],
    );

    match practice.exercise {
        ExerciseRef::MultipleChoice(_) => {
            let items = list_items(
                screen
                    .options(practice.exercise)
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("{}. {}", i + 1, o)),
                practice.option_cursor,
                "No options",
            );
            f.render_widget(
                List::new(items).block(Block::default().borders(Borders::ALL).title("Options")),
                chunks[1],
            );
        }
        ExerciseRef::Rewriting(_) => {
            let answer = practice.answer.value();
            let width = chunks[1].width.saturating_sub(2) as usize;
            let lines: Vec<Line> = wrap_chars(answer, width).into_iter().map(Line::from).collect();
            f.render_widget(
                Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title(practice.answer.label)),
                chunks[1],
            );
            if practice.grade.is_none() {
                let (line, column) =
                    wrapped_cursor_position(answer, practice.answer.cursor(), width);
                f.set_cursor_position((
                    chunks[1].x + 1 + column as u16,
                    chunks[1].y + 1 + line as u16,
                ));
            }
        }
    }

    let feedback = match &practice.grade {
        Some(grade) if grade.correct => Line::from(Span::styled(
            "Correct!  (Enter to close)",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Some(grade) => Line::from(vec![
            Span::styled("Not quite. ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::from(format!("Expected: {}  (Enter to close)", grade.expected)),
        ]),
        None => help_line(&[("Enter", "Check"), ("Esc", "Close")]),
    };
    f.render_widget(
        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );
}
