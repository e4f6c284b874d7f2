//! Login form

use ratatui::{prelude::*, widgets::*};
use tui_input::Input;

use crate::app::{App, InputMode, LoginField};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let card = super::centered_rect(56, 72, area);
    f.render_widget(Clear, card);
    f.render_widget(
        Block::default()
            .title(" Welcome Back ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
        card,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .margin(1)
        .split(card);

    f.render_widget(
        Paragraph::new("Sign in to your account").style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let editing = app.input_mode == InputMode::Editing;
    draw_field(
        f,
        chunks[1],
        editing && app.login.focus == LoginField::Username,
        &app.login.username,
        app.login.username.value().to_string(),
        " Username ",
    );
    let masked = "•".repeat(app.login.password.value().chars().count());
    draw_field(
        f,
        chunks[2],
        editing && app.login.focus == LoginField::Password,
        &app.login.password,
        masked,
        " Password ",
    );

    if app.login.loading {
        f.render_widget(
            Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow)),
            chunks[3],
        );
    } else if let Some(error) = &app.login.error {
        f.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    let hint = vec![
        Line::from(Span::styled(
            "Demo credentials",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  admin / admin123",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  employee / employee123",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(hint), chunks[4]);
}

/// Render one form field; the password variant passes a masked value
fn draw_field(f: &mut Frame, area: Rect, active: bool, input: &Input, value: String, title: &str) {
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    f.render_widget(
        Paragraph::new(value)
            .style(style)
            .scroll((0, scroll as u16))
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );

    if active {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}
