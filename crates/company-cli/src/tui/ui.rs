//! UI rendering

use company_core::EmployeeSource;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    // Create vertical layout for status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer_chunks[0]);

    draw_departments_pane(frame, app, pane_chunks[0]);
    draw_employees_pane(frame, app, pane_chunks[1]);

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, outer_chunks[1]),
        InputMode::Input(_) => draw_input_line(frame, app, outer_chunks[1]),
    }

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the departments pane (left)
fn draw_departments_pane(frame: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;

    let items: Vec<ListItem> = controller
        .departments()
        .iter()
        .map(|department| ListItem::new(format!("{:>4}  {}", department.id, department.name)))
        .collect();

    let title = match controller.department_filter() {
        Some(term) => format!(" Departments matching \"{}\" ", term),
        None => " Departments ".to_string(),
    };

    let count_label = match controller.selected_department() {
        Some(department) => format!(
            " {}: {} employee(s) ",
            department.name,
            controller.employee_count()
        ),
        None => " No department selected ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(count_label).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(controller.selected_index());

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the employees pane (right)
fn draw_employees_pane(frame: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;

    let items: Vec<ListItem> = controller
        .employees()
        .iter()
        .map(|row| {
            let department = match &row.department_name {
                Some(name) => name.clone(),
                None => format!("#{}", row.employee.department_id),
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>4}  {}", row.employee.id, row.employee.name)),
                Span::styled(
                    format!("  {}", department),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]))
        })
        .collect();

    let title = match controller.employee_source() {
        EmployeeSource::None => " Employees ".to_string(),
        EmployeeSource::Department(_) => {
            format!(" Employees ({}) ", controller.employees().len())
        }
        EmployeeSource::Search(term) => format!(
            " Employees matching \"{}\" ({}) ",
            term,
            controller.employees().len()
        ),
    };

    let block = Block::default().title(title).borders(Borders::ALL);

    frame.render_widget(List::new(items).block(block), area);
}

/// Draw the notification, or key hints when there is none
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = match app.controller.notification() {
        Some(notification) => {
            let color = if notification.is_success() {
                Color::Green
            } else {
                Color::Red
            };
            Paragraph::new(notification.message.as_str()).style(Style::default().fg(color))
        }
        None => Paragraph::new(
            "a:add dept  e:add employee  /:search depts  f:search employees  r:refresh  ?:help  q:quit",
        )
        .style(Style::default().add_modifier(Modifier::DIM)),
    };

    frame.render_widget(paragraph, area);
}

/// Draw the input line at the bottom
fn draw_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let InputMode::Input(field) = app.input_mode else {
        return;
    };
    let prefix = field.prompt();

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Yellow)),
        Span::raw(app.input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + (prefix.chars().count() + app.input_cursor) as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Calculate centered popup area
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 18.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Select department"),
        Line::from("  r           Show employees of selection"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  a           Add department"),
        Line::from("  e           Add employee to selection"),
        Line::from("  /           Search departments"),
        Line::from("  f           Search employees"),
        Line::from("  Esc         Reset search, dismiss message"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
