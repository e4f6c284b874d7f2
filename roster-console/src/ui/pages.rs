//! Static informational pages
//!
//! Fixed content rendered for every route that is neither the directory
//! nor the login form. Each page is a titled list of sections; Up/Down
//! moves a cursor through them.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::router::Route;

pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

const FEATURES: &[Section] = &[
    Section {
        title: "Live Directory",
        body: "Browse every employee with grid and tile layouts,\nserver- or client-side pagination, and instant filters.",
    },
    Section {
        title: "Attendance Insights",
        body: "Per-employee attendance history with day-by-day\npresent/absent records straight from the detail view.",
    },
    Section {
        title: "Flags & Follow-ups",
        body: "Mark records that need attention; flags persist\nlocally across restarts.",
    },
];

const PRICING: &[Section] = &[
    Section {
        title: "Starter",
        body: "Free for up to 25 records. Demo data source only.",
    },
    Section {
        title: "Team",
        body: "$12 per seat per month. GraphQL backend, role-based\nactions, priority support.",
    },
    Section {
        title: "Enterprise",
        body: "Custom pricing. Dedicated instance, SSO and audit\nexports. Talk to sales.",
    },
];

const RESOURCES: &[Section] = &[
    Section {
        title: "Documentation",
        body: "Setup guides and key bindings for the console client.",
    },
    Section {
        title: "API Guide",
        body: "GraphQL schema reference: queries, mutations and the\npagination/filter inputs the client sends.",
    },
    Section {
        title: "Support",
        body: "Questions or a stuck deployment? support@roster.example",
    },
];

const CONTACT: &[Section] = &[
    Section {
        title: "Sales",
        body: "sales@roster.example",
    },
    Section {
        title: "Support",
        body: "support@roster.example",
    },
    Section {
        title: "Office",
        body: "100 Directory Way, Suite 4\nSpringfield",
    },
];

/// Sections for a static page; empty for routes drawn elsewhere
pub fn sections(route: Route) -> &'static [Section] {
    match route {
        Route::Features => FEATURES,
        Route::Pricing => PRICING,
        Route::Resources => RESOURCES,
        Route::Contact => CONTACT,
        _ => &[],
    }
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let sections = sections(app.route);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            app.route.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, section) in sections.iter().enumerate() {
        let marker = if i == app.page_section { "▸ " } else { "  " };
        let title_style = if i == app.page_section {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(section.title, title_style),
        ]));
        for body_line in section.body.lines() {
            lines.push(Line::from(Span::styled(
                format!("    {}", body_line),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", app.route.path())),
        ),
        area,
    );
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_static_page_has_sections() {
        for route in [
            Route::Features,
            Route::Pricing,
            Route::Resources,
            Route::Contact,
        ] {
            assert!(!sections(route).is_empty(), "{:?} has no content", route);
        }
        assert!(sections(Route::Home).is_empty());
        assert!(sections(Route::Login).is_empty());
    }
}
