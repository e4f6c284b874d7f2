//! Employee detail overlay
//!
//! Pure projection of one record into labeled sections; nothing here
//! mutates state.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use shared::Employee;

use crate::app::App;

fn section_title(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y %H:%M").to_string()
}

fn format_rate(rate: f64) -> String {
    format!("{:.0}% present", rate * 100.0)
}

pub fn draw(f: &mut Frame, app: &App, employee: &Employee) {
    let area = super::centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        section_title("Personal Information"),
        Line::from(format!("  Full Name:    {}", employee.name)),
        Line::from(format!("  Age:          {} years old", employee.age)),
        Line::from(format!("  Class:        {}", employee.class)),
        Line::from(format!("  Employee ID:  #{}", employee.id)),
        Line::from(""),
        section_title("Subjects"),
    ];

    if employee.subjects.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No subjects assigned",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for subject in &employee.subjects {
            lines.push(Line::from(format!("  • {}", subject)));
        }
    }

    lines.push(Line::from(""));
    lines.push(section_title("Attendance Records"));
    match employee.attendance_rate() {
        None => lines.push(Line::from(Span::styled(
            "  No attendance records",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(rate) => {
            lines.push(Line::from(format!("  Rate:         {}", format_rate(rate))));
            for (date, present) in &employee.attendance {
                let (mark, style) = if *present {
                    ("Present", Style::default().fg(Color::Green))
                } else {
                    ("Absent", Style::default().fg(Color::Red))
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("  {}  ", date)),
                    Span::styled(mark, style),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(section_title("Record Information"));
    lines.push(Line::from(format!(
        "  Created At:    {}",
        format_timestamp(&employee.created_at)
    )));
    lines.push(Line::from(format!(
        "  Last Updated:  {}",
        format_timestamp(&employee.updated_at)
    )));

    let title = if app.directory.is_flagged(employee.id) {
        format!(" ⚑ {} ", employee.name)
    } else {
        format!(" {} ", employee.name)
    };
    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    #[test]
    fn timestamps_render_human_readable() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "January 2, 2024 09:00");
    }

    #[test]
    fn attendance_rate_renders_as_a_percentage() {
        assert_eq!(format_rate(0.5), "50% present");
        assert_eq!(format_rate(2.0 / 3.0), "67% present");
    }

    #[test]
    fn attendance_rate_line_reflects_the_present_share() {
        let mut attendance = BTreeMap::new();
        attendance.insert("2024-01-01".to_string(), true);
        attendance.insert("2024-01-02".to_string(), false);
        attendance.insert("2024-01-03".to_string(), true);
        attendance.insert("2024-01-04".to_string(), true);
        let employee = Employee {
            id: 7,
            name: "Ada".into(),
            age: 30,
            class: "Class B".into(),
            subjects: vec![],
            attendance,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            employee.attendance_rate().map(format_rate).as_deref(),
            Some("75% present")
        );
    }
}
