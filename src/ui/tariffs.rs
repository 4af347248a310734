//! Tariff view: region toggle, rate table and notes.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Cell, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use crate::config::ColorConfig;
use crate::tariffs::{Region, CONTACT_INSTAGRAM, CONTACT_PHONE, HOW_IT_WORKS};

/// Perks listed beside the table.
const PERKS: &[&str] = &[
    "Bi-weekly flights",
    "Secure US/UK Warehousing",
    "Expert Re-packing",
    "Daily Accra Pickups",
];

/// Render the tariff view for `region`.
pub fn render_tariffs(f: &mut Frame, region: Region, colors: &ColorConfig, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Region toggle
            Constraint::Length(1),  // Hub note
            Constraint::Length(16), // Table and side panel
            Constraint::Min(0),     // How it works
        ])
        .split(area);

    f.render_widget(Paragraph::new(region_toggle(region, colors)), rows[0]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Prices cover standard shipping to our Accra hub.",
            Style::default().fg(Color::Gray),
        ))),
        rows[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);

    render_table(f, region, colors, columns[0]);
    render_side_panel(f, colors, columns[1]);
    render_process(f, colors, rows[3]);
}

fn region_toggle(selected: Region, colors: &ColorConfig) -> Line<'static> {
    let mut spans = Vec::new();
    for region in Region::all() {
        let style = if *region == selected {
            Style::default()
                .fg(Color::White)
                .bg(colors.brand_primary())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", region.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_table(f: &mut Frame, region: Region, colors: &ColorConfig, area: Rect) {
    let header_style = Style::default()
        .fg(colors.brand_primary())
        .add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(format!("Weight ({})", region.unit())),
        Cell::from(format!(
            "Tariff ({} {})",
            region.currency_code(),
            region.currency_symbol()
        )),
    ])
    .style(header_style);

    let rows: Vec<Row> = region
        .tariffs()
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.weight),
                Cell::from(Span::styled(
                    region.format_price(t.price),
                    Style::default()
                        .fg(colors.brand_primary())
                        .add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let footer = format!(
        " {} Prices may vary for fragile or heavy items. ",
        region.rate_basis()
    );

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", region.label()))
                .title(Title::from(footer).position(Position::Bottom)),
        );

    f.render_widget(table, area);
}

/// Numbered steps from booking a drop date to delivery in Ghana.
fn render_process(f: &mut Frame, colors: &ColorConfig, area: Rect) {
    let lines: Vec<Line> = HOW_IT_WORKS
        .iter()
        .enumerate()
        .map(|(i, step)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. {}", i + 1, step.title),
                    Style::default()
                        .fg(colors.brand_primary())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", step.description)),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" How it Works "),
    );
    f.render_widget(panel, area);
}

fn render_side_panel(f: &mut Frame, colors: &ColorConfig, area: Rect) {
    let accent = Style::default().fg(colors.brand_primary());

    let mut lines = vec![
        Line::from(Span::styled(
            "Consolidate & Save",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(
            "Shipping from multiple stores? We combine your UK or USA orders into one shipment.",
        ),
        Line::from(""),
    ];
    for perk in PERKS {
        lines.push(Line::from(vec![Span::styled("● ", accent), Span::raw(*perk)]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "\"Worldwide shopping, local delivery: the P2P way!\"",
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(format!("WhatsApp & Call: {}", CONTACT_PHONE)));
    lines.push(Line::from(format!("Instagram: {}", CONTACT_INSTAGRAM)));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(panel, area);
}
