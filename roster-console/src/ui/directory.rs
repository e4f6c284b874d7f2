//! Employee listing: grid and tile renderings of the visible page

use ratatui::{prelude::*, widgets::*};
use tui_input::Input;

use shared::SortOrder;

use crate::app::{App, FilterField, InputMode, row_actions};
use crate::state::{SortField, ViewMode, VisiblePage};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_filters(f, app, chunks[0]);

    let page = app.directory.visible();
    if page.items.is_empty() {
        draw_placeholder(f, app, chunks[1]);
    } else {
        match app.view_mode {
            ViewMode::Grid => draw_grid(f, app, &page, chunks[1]),
            ViewMode::Tile => draw_tiles(f, app, &page, chunks[1]),
        }
    }

    draw_status(f, app, &page, chunks[2]);
}

fn draw_filters(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_filter_input(
        f,
        app,
        halves[0],
        FilterField::Name,
        &app.filter_name,
        " Filter: Name (/) ",
    );
    draw_filter_input(
        f,
        app,
        halves[1],
        FilterField::Class,
        &app.filter_class,
        " Filter: Class (c) ",
    );
}

fn draw_filter_input(
    f: &mut Frame,
    app: &App,
    area: Rect,
    field: FilterField,
    input: &Input,
    title: &str,
) {
    let active = app.input_mode == InputMode::Editing && app.filter_focus == field;
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let widget = Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);

    if active {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn draw_placeholder(f: &mut Frame, app: &App, area: Rect) {
    let message = if app.directory.is_loading() {
        "Loading employees..."
    } else if !app.directory.filter().is_empty() {
        "No employees match the current filter"
    } else {
        "No employees found"
    };
    let widget = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Employees "));
    f.render_widget(widget, area);
}

fn column_title(field: SortField, app: &App) -> String {
    let sort = app.directory.sort();
    if sort.field == field {
        let arrow = match sort.order {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        };
        format!("{} {}", field.label(), arrow)
    } else {
        field.label().to_string()
    }
}

fn draw_grid(f: &mut Frame, app: &App, page: &VisiblePage, area: Rect) {
    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from(column_title(SortField::Id, app)),
        Cell::from(column_title(SortField::Name, app)),
        Cell::from(column_title(SortField::Age, app)),
        Cell::from(column_title(SortField::Class, app)),
        Cell::from("Subjects"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = page.items.iter().enumerate().map(|(index, employee)| {
        let flagged = app.directory.is_flagged(employee.id);
        let style = if index == app.directory.selected {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else if flagged {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(if flagged { "⚑" } else { " " }),
            Cell::from(employee.id.to_string()),
            Cell::from(employee.name.clone()),
            Cell::from(employee.age.to_string()),
            Cell::from(employee.class.clone()),
            Cell::from(employee.subjects.len().to_string()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Employees ({}) ", page.total)),
    );
    f.render_widget(table, area);
}

fn draw_tiles(f: &mut Frame, app: &App, page: &VisiblePage, area: Rect) {
    let items: Vec<ListItem> = page
        .items
        .iter()
        .enumerate()
        .map(|(index, employee)| {
            let flagged = app.directory.is_flagged(employee.id);
            let marker = if flagged { "⚑ " } else { "" };
            let name_style = if index == app.directory.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            };

            let content = vec![
                Line::from(vec![
                    Span::styled(format!("{}{}", marker, employee.name), name_style),
                    Span::styled(
                        format!("  #{}", employee.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(format!(
                    "  {} years old | {}",
                    employee.age, employee.class
                )),
                Line::from(Span::styled(
                    format!("  {}", employee.subjects.join(", ")),
                    Style::default().fg(Color::Green),
                )),
                Line::from(""),
            ];
            ListItem::new(content)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Employees ({}) ", page.total)),
    );
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &App, page: &VisiblePage, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(
            " Page {}/{} | {} total | {} flagged ",
            page.current_page,
            page.total_pages.max(1),
            page.total,
            app.directory.flags().len()
        ),
        Style::default().fg(Color::DarkGray),
    )];
    if app.directory.is_loading() {
        spans.push(Span::styled(
            " Loading... ",
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(error) = app.directory.last_error() {
        spans.push(Span::styled(
            format!(" {} (Esc to dismiss) ", error),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Row actions popup; entries depend on the session role
pub fn draw_menu(f: &mut Frame, app: &App) {
    let Some(cursor) = app.menu else { return };
    let actions = row_actions(app.auth.is_admin());

    let area = super::centered_rect(20, 24, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let style = if index == cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {} ", action.label()),
                style,
            )))
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .title(" Actions ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(menu, area);
}
