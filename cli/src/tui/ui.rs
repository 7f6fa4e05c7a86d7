use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use geodo_core::{present, Presentation, Priority, Task};

use crate::listing::truncate;
use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header / filter panel
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_filter_panel(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    draw_task_area(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);
    draw_prompt(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => "j/k: Move | space: Done | a: Add | e: Edit | d: Delete | p/f: Filters | l/L/x: Location | r: Reload | o: Logout | q: Quit",
        InputMode::ConfirmDelete => "y: Delete task | any other key: Cancel",
        InputMode::Login => "Enter: Login | Esc: Quit",
        _ => "Enter: Submit | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);

    if matches!(app.input_mode, InputMode::ConfirmDelete) {
        draw_delete_confirm(f, app, size);
    }
}

fn draw_filter_panel(f: &mut Frame, app: &App, area: Rect) {
    let filter = app.controller.filter();
    let user = app
        .session
        .session()
        .map(|s| s.user.username.clone())
        .unwrap_or_else(|| "not logged in".to_string());
    let line = Line::from(vec![
        Span::styled("GEODO  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("Priority: ", Style::default().fg(Color::Blue)),
        Span::raw(filter.priority.to_string()),
        Span::raw("   "),
        Span::styled("Status: ", Style::default().fg(Color::Blue)),
        Span::raw(filter.done.to_string()),
        Span::raw("   "),
        Span::styled(user, Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_task_area(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded);

    // Copy out what the table needs so the stateful render can borrow `app.state`.
    let (rows, dimmed, title) = match present(&app.controller) {
        Presentation::Loading { previous } if previous.is_empty() => {
            draw_message(f, area, block, &["Loading Tasks...", "Please wait..."], Color::Cyan);
            return;
        }
        Presentation::Loading { previous } => (task_rows(previous), true, " Tasks (loading...) "),
        Presentation::Populated(tasks) => (task_rows(tasks), false, " Tasks "),
        Presentation::Empty => {
            draw_message(f, area, block, &["No Tasks in this filter"], Color::Gray);
            return;
        }
        Presentation::Error(msg) => {
            draw_message(
                f,
                area,
                block,
                &["Error", "Something happened, please login again or try later", msg],
                Color::Red,
            );
            return;
        }
    };

    let base = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Priority
            Constraint::Length(6),  // Id
            Constraint::Min(10),    // Title
        ]
    )
    .style(base)
    .header(Row::new(vec!["St", "Pr", "ID", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(block.title(title))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn task_rows(tasks: &[Task]) -> Vec<Row<'static>> {
    tasks.iter().map(|task| {
        let status_icon = if task.done { "✔" } else { "☐" };

        let priority_style = match task.priority {
            Priority::High => Style::default().fg(Color::Red),
            Priority::Medium => Style::default().fg(Color::Yellow),
            Priority::Low => Style::default().fg(Color::Green),
        };

        let pri_str = match task.priority {
            Priority::High => "H",
            Priority::Medium => "M",
            Priority::Low => "L",
        };

        Row::new(vec![
            Span::raw(status_icon),
            Span::styled(pri_str, priority_style),
            Span::raw(task.id.to_string()),
            Span::styled(truncate(&task.title, 60), Style::default().add_modifier(Modifier::BOLD)),
        ])
    }).collect()
}

fn draw_message(f: &mut Frame, area: Rect, block: Block, lines: &[&str], color: Color) {
    let mut text = vec![Line::from("")];
    for (i, l) in lines.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        text.push(Line::from(Span::styled(l.to_string(), style)));
    }
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(p, area);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);
    let Some(task) = app.selected_task() else {
        f.render_widget(block, area);
        return;
    };

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(if task.done { "Done" } else { "Pending" }),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Blue)),
            Span::raw(task.priority.to_string()),
        ]),
        Line::from(""),
    ];

    if !task.description.is_empty() {
        detail_text.push(Line::from(Span::styled("Description:", Style::default().fg(Color::Blue))));
        detail_text.push(Line::from(task.description.clone()));
        detail_text.push(Line::from(""));
    }

    match &app.location {
        Some((id, Some(loc))) if *id == task.id => {
            detail_text.push(Line::from(Span::styled("Location:", Style::default().fg(Color::Blue))));
            detail_text.push(Line::from(loc.display_name.clone()));
            detail_text.push(Line::from(format!("{:.5}, {:.5}", loc.lat, loc.lon)));
        }
        Some((id, None)) if *id == task.id => {
            detail_text.push(Line::from(Span::styled("No location set", Style::default().fg(Color::DarkGray))));
        }
        _ => {
            detail_text.push(Line::from(Span::styled("l: load location", Style::default().fg(Color::DarkGray))));
        }
    }

    let detail_block = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(detail_block, area);
}

fn draw_prompt(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.input_mode {
        InputMode::Login => " Login: <username> <password> ",
        InputMode::Adding => " New task: <title> pri:<low|medium|high> desc:<text> ",
        InputMode::Modifying => " Edit task: [title] pri:.. desc:.. done:<yes|no> ",
        InputMode::Locating => " Location: <lat> <lon> <name> ",
        InputMode::Normal | InputMode::ConfirmDelete => {
            let (text, style) = match &app.notice {
                Some(n) if n.is_error => (n.text.as_str(), Style::default().fg(Color::Red)),
                Some(n) => (n.text.as_str(), Style::default().fg(Color::Green)),
                None => ("", Style::default()),
            };
            let p = Paragraph::new(text.to_string())
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
            f.render_widget(p, area);
            return;
        }
    };

    // The password is never echoed.
    let shown = if matches!(app.input_mode, InputMode::Login) {
        mask_password(&app.input)
    } else {
        app.input.clone()
    };
    let mut lines = vec![Line::from(shown)];
    if let (InputMode::Login, Some(n)) = (&app.input_mode, &app.notice) {
        if n.is_error {
            lines.push(Line::from(Span::styled(n.text.clone(), Style::default().fg(Color::Red))));
        }
    }
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(p, area);

    let cursor_x = area.x + 1 + app.cursor_position as u16;
    f.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
}

fn draw_delete_confirm(f: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.selected_task() else { return };
    let popup = centered(area, 50, 5);
    f.render_widget(Clear, popup);
    let p = Paragraph::new(vec![
        Line::from(format!("Delete \"{}\"?", truncate(&task.title, 40))),
        Line::from(Span::styled("y / n", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title(" Delete task ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(p, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn mask_password(input: &str) -> String {
    match input.split_once(' ') {
        Some((user, rest)) => format!("{} {}", user, "*".repeat(rest.chars().count())),
        None => input.to_string(),
    }
}
