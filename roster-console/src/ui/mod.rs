//! Terminal rendering
//!
//! Stateless draw functions; every frame renders from `&App`.

pub mod detail;
pub mod directory;
pub mod login;
pub mod pages;

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, InputMode};
use crate::router::Route;

/// Top-level draw dispatch
pub fn draw(f: &mut Frame, app: &App) {
    let constraints = if app.show_logs {
        vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(8),
            Constraint::Length(1),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.route {
        Route::Home => directory::draw(f, app, chunks[1]),
        Route::Login => login::draw(f, app, chunks[1]),
        _ => pages::draw(f, app, chunks[1]),
    }

    if app.show_logs {
        draw_logs(f, app, chunks[2]);
    }
    let footer = if app.show_logs { chunks[3] } else { chunks[2] };
    draw_footer(f, app, footer);

    // Overlays, innermost last
    if let Some(employee) = &app.detail {
        detail::draw(f, app, employee);
    }
    if app.menu.is_some() {
        directory::draw_menu(f, app);
    }
    if let Some((id, name)) = &app.confirm_delete {
        draw_confirm(f, *id, name);
    }
    if let Some(message) = &app.alert {
        draw_alert(f, message);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " Roster ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
    ];

    if app.auth.is_authenticated() {
        for (index, route) in Route::NAV.iter().enumerate() {
            let style = if *route == app.route {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(
                format!(" {} {} ", index + 1, route.title()),
                style,
            ));
        }
        if let Some(user) = app.auth.user() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} ({:?})", user.username, user.role),
                Style::default().fg(Color::Green),
            ));
        }
    } else {
        spans.push(Span::styled(
            " Sign in to continue ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.route {
        Route::Login => match app.input_mode {
            InputMode::Editing => "Tab switch field | Enter submit | Esc normal mode",
            InputMode::Normal => "e edit | q quit",
        },
        Route::Home => match app.input_mode {
            InputMode::Editing => "type to filter | Tab name/class | Enter apply | Esc done",
            InputMode::Normal => {
                "↑↓ select | ←→ page | Enter detail | a actions | f flag | s sort | r reverse | / filter | v view | g reload | L logs | q quit"
            }
        },
        _ => "↑↓ sections | 1-5 navigate | l logout | L logs | q quit",
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_confirm(f: &mut Frame, id: i64, name: &str) {
    let area = centered_rect(50, 24, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(name, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" (#{})? This cannot be undone.", id)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm | n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title(" Confirm Delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(dialog, area);
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 24, f.area());
    f.render_widget(Clear, area);

    let alert = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(alert, area);
}

/// Centered overlay rect as a percentage of the containing area
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
