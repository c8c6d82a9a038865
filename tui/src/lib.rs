//! TUI rendering for Vigil using ratatui.

mod analysis;
mod format;
mod input;
mod landing;
mod surface;
mod theme;

pub use input::{InputPump, apply_key, handle_events};
pub use surface::PageSurface;
pub use theme::{Palette, styles};

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

use vigil_engine::{Presentation, Route, ScrollOutcome};
use vigil_types::NAV_LINKS;

use self::analysis::build_page;
use self::landing::draw_landing;

/// Below this width the inline navigation collapses into the menu.
const COMPACT_WIDTH: u16 = 100;
const MENU_WIDTH: u16 = 28;

/// Advance frame-driven timers by `delta`.
///
/// Runs before input is drained, so a scroll requested by this frame's input
/// is first checked against the layout that input's page draws.
pub fn advance_frame(
    presentation: &mut Presentation,
    surface: &mut PageSurface,
    delta: Duration,
) -> Option<ScrollOutcome> {
    let outcome = presentation.tick(delta, surface);
    surface.advance(delta);
    outcome
}

/// Main draw function.
///
/// Also records the analysis page layout on `surface`, so scroll targets only
/// exist once the page has been drawn.
pub fn draw(frame: &mut Frame, presentation: &Presentation, surface: &mut PageSurface) {
    let palette = Palette::standard();
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navigation bar
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    draw_navigation(frame, chunks[0], presentation, &palette);

    let body = chunks[1].inner(Margin::new(1, 0));
    match presentation.route() {
        Some(Route::Landing) => {
            surface.clear_layout();
            draw_landing(frame, body, presentation, &palette);
        }
        Some(Route::Analysis) => draw_analysis(frame, body, presentation, surface, &palette),
        Some(Route::NotFound) | None => {
            surface.clear_layout();
            draw_not_found(frame, body, &palette);
        }
    }

    draw_key_hints(frame, chunks[2], presentation, &palette);

    if presentation.menu().is_open() {
        draw_menu(frame, chunks[1], &palette);
    }
}

fn draw_navigation(frame: &mut Frame, area: Rect, presentation: &Presentation, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.bg_highlight));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled("◆ ", Style::default().fg(palette.blue)),
        Span::styled("VIGILUM.AI", styles::brand(palette)),
        Span::raw("   "),
    ];

    if area.width >= COMPACT_WIDTH {
        spans.push(Span::styled("[h]", styles::key_highlight(palette)));
        spans.push(Span::styled(" HOME  ", styles::key_hint(palette)));
        for (index, link) in NAV_LINKS.iter().enumerate() {
            spans.push(Span::styled(
                format!("[{}]", index + 1),
                styles::key_highlight(palette),
            ));
            spans.push(Span::styled(
                format!(" {}  ", link.label),
                styles::key_hint(palette),
            ));
        }
    } else {
        let label = if presentation.menu().is_open() {
            " CLOSE"
        } else {
            " MENU"
        };
        spans.push(Span::styled("[m]", styles::key_highlight(palette)));
        spans.push(Span::styled(label, styles::key_hint(palette)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    let indicator = Line::from(vec![
        Span::styled("● ", Style::default().fg(palette.green)),
        Span::styled("OPERATIONAL", styles::key_hint(palette)),
    ]);
    frame.render_widget(
        Paragraph::new(indicator).alignment(Alignment::Right),
        inner,
    );
}

fn draw_analysis(
    frame: &mut Frame,
    area: Rect,
    presentation: &Presentation,
    surface: &mut PageSurface,
    palette: &Palette,
) {
    let text_width = area.width.saturating_sub(2);
    let page = build_page(presentation.explorer(), palette, text_width);
    let content_height = u16::try_from(page.lines.len()).unwrap_or(u16::MAX);

    surface.set_viewport(area.height);
    surface.set_layout(page.anchors, content_height);
    let offset = surface.offset();

    frame.render_widget(Paragraph::new(page.lines).scroll((offset, 0)), area);

    if surface.max_offset() > 0 {
        let mut state = ScrollbarState::new(usize::from(surface.max_offset()))
            .position(usize::from(offset));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Style::default().fg(palette.bg_border)),
            area,
            &mut state,
        );
    }
}

fn draw_not_found(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default()
                .fg(palette.red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Page not found", styles::body(palette))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[h]", styles::key_highlight(palette)),
            Span::styled(" Return home", styles::key_hint(palette)),
        ]),
    ];
    let top = area.height.saturating_sub(4) / 2;
    let centered = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

fn draw_key_hints(frame: &mut Frame, area: Rect, presentation: &Presentation, palette: &Palette) {
    let hints: &[(&str, &str)] = match presentation.route() {
        Some(Route::Landing) => &[
            ("Enter", "analyze"),
            ("1-4", "sections"),
            ("m", "menu"),
            ("q", "quit"),
        ],
        Some(Route::Analysis) => &[
            ("↑↓", "case"),
            ("j/k", "scroll"),
            ("1-4", "sections"),
            ("h", "home"),
            ("q", "quit"),
        ],
        Some(Route::NotFound) | None => &[("h", "home"), ("q", "quit")],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key}"), styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action} "), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_menu(frame: &mut Frame, area: Rect, palette: &Palette) {
    let height = u16::try_from(NAV_LINKS.len()).unwrap_or(4) + 3;
    let width = MENU_WIDTH.min(area.width);
    let menu_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: height.min(area.height),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));

    let mut lines = vec![Line::from(vec![
        Span::styled(" h ", styles::key_highlight(palette)),
        Span::styled("HOME", styles::body(palette)),
    ])];
    for (index, link) in NAV_LINKS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", index + 1), styles::key_highlight(palette)),
            Span::styled(link.label, styles::body(palette)),
        ]));
    }

    frame.render_widget(Clear, menu_area);
    frame.render_widget(Paragraph::new(lines).block(block), menu_area);
}
