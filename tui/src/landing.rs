//! Landing view: phase strip, call to action, module grid and status line.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use vigil_engine::Presentation;

use crate::analysis::{MODULES, PIPELINE};
use crate::theme::{Palette, styles};

pub(crate) fn draw_landing(
    frame: &mut Frame,
    area: Rect,
    presentation: &Presentation,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(6),    // Phases
            Constraint::Length(3), // Call to action
            Constraint::Length(5), // Modules
            Constraint::Length(1), // Status
        ])
        .split(area);

    draw_title(frame, chunks[0], palette);
    draw_phases(frame, chunks[1], presentation, palette);
    draw_call_to_action(frame, chunks[2], palette);
    draw_modules(frame, chunks[3], palette);
    draw_status(frame, chunks[4], presentation, palette);
}

fn draw_title(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled("SEMANTIC GOVERNANCE", styles::heading(palette))),
        Line::from(Span::styled(
            "INTELLIGENCE",
            Style::default()
                .fg(palette.blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Detecting embedded override paths in legal structure before institutional collapse",
            Style::default().fg(palette.text_muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_phases(frame: &mut Frame, area: Rect, presentation: &Presentation, palette: &Palette) {
    let phases = presentation.phases();
    let current = presentation.current_phase();
    let count = u32::try_from(phases.len()).unwrap_or(1);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for ((index, phase), column) in phases.iter().enumerate().zip(columns.iter()) {
        let active = current == Some(index);
        let border = if active {
            Style::default().fg(palette.accent(phase.style.accent))
        } else {
            Style::default().fg(palette.bg_border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(palette.bg_panel));
        let body = vec![
            Line::from(Span::styled(
                phase.title.to_uppercase(),
                styles::phase_title(palette, phase, active),
            )),
            Line::from(""),
            Line::from(Span::styled(
                phase.description.clone(),
                styles::phase_body(palette, active),
            )),
        ];
        frame.render_widget(
            Paragraph::new(body)
                .block(block)
                .wrap(Wrap { trim: true }),
            *column,
        );
    }
}

fn draw_call_to_action(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(vec![
            Span::styled("[Enter] ", styles::key_highlight(palette)),
            Span::styled(
                "ANALYZE CLAUSE STRUCTURE",
                Style::default()
                    .fg(palette.text_primary)
                    .bg(palette.blue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(PIPELINE, styles::label(palette))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_modules(frame: &mut Frame, area: Rect, palette: &Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    let accents = [palette.blue, palette.yellow, palette.orange];

    for ((module, column), accent) in MODULES.iter().zip(columns.iter()).zip(accents) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .title(Span::styled(
                module.name,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let body = vec![
            Line::from(Span::styled(module.tagline, styles::label(palette))),
            Line::from(Span::styled(module.summary, styles::body(palette))),
        ];
        frame.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            *column,
        );
    }
}

fn draw_status(frame: &mut Frame, area: Rect, presentation: &Presentation, palette: &Palette) {
    let text = presentation.status_text().unwrap_or_default();
    let dot = match presentation.status() {
        Some(state) if state.is_settled() && !state.is_ok() => palette.red,
        _ => palette.green,
    };
    let line = Line::from(vec![
        Span::styled("STRUCTURAL FORESIGHT ", styles::label(palette)),
        Span::styled("● ", Style::default().fg(dot)),
        Span::styled(text, Style::default().fg(palette.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
