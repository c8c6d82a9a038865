//! Structural analysis page: a single scrollable document with anchored sections.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use vigil_engine::{CaseRecord, CaseStudyExplorer, SectionId};

use crate::format::{format_percent, wrap_text};
use crate::theme::{Palette, styles};

/// Module cards shared by the landing grid and the modules section.
pub(crate) struct ModuleCard {
    pub(crate) name: &'static str,
    pub(crate) tagline: &'static str,
    pub(crate) summary: &'static str,
}

pub(crate) const MODULES: [ModuleCard; 3] = [
    ModuleCard {
        name: "CLAVIS",
        tagline: "CLAUSE INTELLIGENCE",
        summary: "Input → Analysis → Override → Risk projection through semantic vector mapping",
    },
    ModuleCard {
        name: "OBSCURA",
        tagline: "TIMELINE COMPRESSION",
        summary: "Frictionless procurement detection through temporal sequence analysis",
    },
    ModuleCard {
        name: "NULLUM",
        tagline: "DELAY MAPPING",
        summary: "Risk accumulation through user non-interaction and procedural drift",
    },
];

pub(crate) const PIPELINE: &str =
    "Input legal text → Vector projection → Override mapping → Risk fingerprint";

/// Laid-out page content plus the first line of each anchored section.
pub(crate) struct Page {
    pub(crate) lines: Vec<Line<'static>>,
    pub(crate) anchors: Vec<(String, u16)>,
}

struct PageBuilder<'p> {
    palette: &'p Palette,
    width: usize,
    lines: Vec<Line<'static>>,
    anchors: Vec<(String, u16)>,
}

impl<'p> PageBuilder<'p> {
    fn new(palette: &'p Palette, width: u16) -> Self {
        Self {
            palette,
            width: usize::from(width.max(20)),
            lines: Vec::new(),
            anchors: Vec::new(),
        }
    }

    fn anchor(&mut self, section: SectionId) {
        let line = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        self.anchors.push((section.anchor().to_owned(), line));
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn line(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn heading(&mut self, text: &str) {
        let style = styles::heading(self.palette);
        self.lines.push(Line::from(Span::styled(text.to_owned(), style)));
    }

    fn label(&mut self, text: &str, style: Style) {
        self.lines.push(Line::from(Span::styled(
            text.to_owned(),
            style.add_modifier(Modifier::BOLD),
        )));
    }

    fn paragraph(&mut self, text: &str, indent: usize, style: Style) {
        let pad = " ".repeat(indent);
        for row in wrap_text(text, self.width.saturating_sub(indent)) {
            self.lines
                .push(Line::from(Span::styled(format!("{pad}{row}"), style)));
        }
    }

    /// Wrapped text with a hanging prefix such as `"• "` or `"1. "`.
    fn item(&mut self, prefix: &str, prefix_style: Style, text: &str, style: Style) {
        let indent = prefix.chars().count() + 2;
        let rows = wrap_text(text, self.width.saturating_sub(indent));
        for (i, row) in rows.into_iter().enumerate() {
            let lead = if i == 0 {
                format!("  {prefix}")
            } else {
                " ".repeat(indent)
            };
            self.lines.push(Line::from(vec![
                Span::styled(lead, prefix_style),
                Span::styled(row, style),
            ]));
        }
    }

    fn finish(self) -> Page {
        Page {
            lines: self.lines,
            anchors: self.anchors,
        }
    }
}

/// Build the analysis document for a viewport `width` columns wide.
pub(crate) fn build_page(explorer: &CaseStudyExplorer, palette: &Palette, width: u16) -> Page {
    let mut page = PageBuilder::new(palette, width);
    let body = styles::body(palette);
    let muted = styles::label(palette);

    page.heading("STRUCTURAL ANALYSIS");
    page.paragraph(
        "Detecting embedded override paths in legal structure before institutional collapse",
        0,
        Style::default().fg(palette.text_muted),
    );
    page.blank();

    page.anchor(SectionId::Modules);
    page.heading("MODULES");
    page.blank();
    for module in &MODULES {
        page.line(Line::from(vec![
            Span::styled(
                module.name,
                Style::default()
                    .fg(palette.blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", module.tagline), muted),
        ]));
        page.paragraph(module.summary, 2, body);
        page.blank();
    }

    page.anchor(SectionId::Demo);
    page.heading("CLAVIS // CLAUSE INTELLIGENCE");
    page.paragraph(PIPELINE, 0, muted);
    page.blank();
    let sample = explorer.current();
    page.label(&format!("SAMPLE CLAUSE ({})", sample.id), Style::default().fg(palette.blue));
    page.paragraph(&sample.original_clause, 2, body);
    page.label("PROJECTED OVERRIDE PATH", Style::default().fg(palette.red));
    page.paragraph(&sample.override_path.join(" → "), 2, body);
    page.blank();

    page.anchor(SectionId::Cases);
    page.heading("ENCODED RISK CASE STUDIES");
    page.paragraph(
        "Simulated retrospectives showing how structural risk was embedded in design and \
         systematically overlooked until institutional failure.",
        0,
        Style::default().fg(palette.text_muted),
    );
    page.blank();
    case_library(&mut page, explorer);
    page.blank();
    case_detail(&mut page, explorer.current());
    page.blank();

    page.anchor(SectionId::About);
    page.heading("METHODOLOGY");
    page.paragraph(
        "Clause text is projected into semantic vectors, discretionary exposure is traced \
         along override paths, and each structure receives a risk fingerprint.",
        0,
        body,
    );
    page.paragraph(
        &format!(
            "{} of catalogued cases were structurally preventable.",
            format_percent(explorer.catalog().preventable_share())
        ),
        0,
        muted,
    );

    page.finish()
}

fn case_library(page: &mut PageBuilder<'_>, explorer: &CaseStudyExplorer) {
    let palette = page.palette;
    page.label("CASE LIBRARY", Style::default().fg(palette.text_primary));
    for entry in explorer.entries() {
        let case = entry.case;
        let (marker, id_style) = if entry.selected {
            ("▸ ", styles::selected_case(palette))
        } else {
            ("  ", Style::default().fg(palette.orange))
        };
        page.line(Line::from(vec![
            Span::styled(marker, id_style),
            Span::styled(case.id.clone(), id_style),
            Span::styled(format!("  {}", case.date), styles::label(palette)),
            Span::styled(format!("  {}", case.title), styles::heading(palette)),
        ]));
        page.line(Line::from(vec![
            Span::raw("    "),
            Span::styled(case.sector.clone(), styles::key_hint(palette)),
            Span::styled(format!("  {}", case.amount), styles::body(palette)),
            Span::styled(
                format!("  Risk: {}", case.risk_level),
                Style::default().fg(palette.red),
            ),
        ]));
    }
}

fn case_detail(page: &mut PageBuilder<'_>, case: &CaseRecord) {
    let palette = page.palette;
    let body = styles::body(palette);

    page.line(Line::from(vec![
        Span::styled(case.id.clone(), Style::default().fg(palette.orange)),
        Span::styled(format!("  {}", case.typology), styles::label(palette)),
    ]));
    page.heading(&case.title);
    page.line(Line::from(vec![
        Span::styled(case.date.clone(), styles::key_hint(palette)),
        Span::styled(format!("  {}", case.amount), styles::key_hint(palette)),
        Span::styled(format!("  {}", case.status), styles::key_hint(palette)),
    ]));
    page.line(Line::from(vec![
        Span::styled("RISK LEVEL ", styles::label(palette)),
        Span::styled(
            case.risk_level.to_string(),
            Style::default()
                .fg(palette.red)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    page.blank();
    page.paragraph(&case.description, 0, body);
    page.blank();

    page.label("ORIGINAL CLAUSE", Style::default().fg(palette.blue));
    page.paragraph(&case.original_clause, 2, body);
    page.blank();

    page.label("RISK INDICATORS", Style::default().fg(palette.yellow));
    for indicator in &case.risk_indicators {
        page.item("• ", Style::default().fg(palette.yellow), indicator, body);
    }
    page.blank();

    page.label("OVERRIDE PATH", Style::default().fg(palette.red));
    for (index, step) in case.override_path.iter().enumerate() {
        page.item(
            &format!("{}. ", index + 1),
            Style::default().fg(palette.red),
            step,
            body,
        );
    }
    page.blank();

    page.label("STRUCTURAL OUTCOME", Style::default().fg(palette.orange));
    page.paragraph(&case.outcome, 2, body);
    if case.preventable {
        page.label("VIGILUM DETECTION: PREVENTABLE", Style::default().fg(palette.green));
    }
}
