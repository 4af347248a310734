use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Tabs, Wrap},
    Frame,
};

use crate::app::{App, ConnectionStatus, View};
use crate::config::Config;
use crate::message::Role;

use super::gradient::{gradient_block_with_status, gradient_color};
use super::tariffs::render_tariffs;
use super::text::{gradient_line, wrap_text};

/// Width of the `[HH:MM] ` column.
const TIME_COLUMN: usize = 8;

/// Main UI rendering function.
pub fn ui(f: &mut Frame, app: &mut App, config: &Config) {
    let colors = &config.colors;
    let bg_color = Color::Rgb(20, 20, 25);

    let background = Block::default().style(Style::default().bg(bg_color));
    f.render_widget(background, f.size());

    let inner_area = f.size().inner(&Margin {
        horizontal: 1,
        vertical: 0,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header with view tabs
            Constraint::Min(3),    // Active view
            Constraint::Length(1), // Key hints
        ])
        .split(inner_area);

    render_header(f, app, config, chunks[0]);

    match app.view {
        View::Chat => render_chat(f, app, config, chunks[1]),
        View::Tariffs => render_tariffs(f, app.region, colors, chunks[1]),
    }

    let hints = match app.view {
        View::Chat => "Enter send · ↑/↓ scroll · Tab tariffs · Esc quit",
        View::Tariffs => "←/→ region · Tab assistant · Esc quit",
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[2],
    );
}

fn render_header(f: &mut Frame, app: &App, config: &Config, area: Rect) {
    let (start, end) = config.colors.chat_gradient();

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(10)])
        .split(area);

    f.render_widget(Paragraph::new(gradient_line("P2P LOGISTICS", start, end)), halves[0]);

    let titles: Vec<Line> = View::all().iter().map(|v| Line::from(v.title())).collect();
    let selected = View::all().iter().position(|v| *v == app.view).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(config.colors.brand_primary())
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, halves[1]);
}

/// Build the transcript as rendered lines for a given inner width.
pub fn transcript_lines(app: &App, config: &Config, width: usize) -> Vec<Line<'static>> {
    let colors = &config.colors;
    let mut lines = Vec::new();

    for msg in app.session.transcript() {
        let role_prefix = msg.role.prefix();
        let indent = TIME_COLUMN + role_prefix.chars().count();
        let style = match msg.role {
            Role::User => Style::default().fg(colors.brand_navy()),
            Role::Assistant => Style::default().fg(Color::White),
        };

        let wrapped = wrap_text(&msg.content, width.saturating_sub(indent));
        for (i, line) in wrapped.into_iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", msg.time_label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(role_prefix, style.add_modifier(Modifier::BOLD)),
                    Span::styled(line, style),
                ]));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", " ".repeat(indent), line),
                    style,
                )));
            }
        }

        // Empty line between messages
        lines.push(Line::from(""));
    }

    if app.is_pending() {
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(TIME_COLUMN), Style::default()),
            Span::styled(
                Role::Assistant.prefix(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.animation.typing_dots(),
                Style::default().fg(colors.status_pending()),
            ),
        ]));
    }

    lines
}

fn render_chat(f: &mut Frame, app: &mut App, config: &Config, area: Rect) {
    let colors = &config.colors;
    let (chat_start, chat_end) = colors.chat_gradient();
    let (input_start, input_end) = colors.input_gradient();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Chat messages
            Constraint::Length(3), // Input box
        ])
        .split(area);

    let inner_width = chunks[0].width.saturating_sub(3) as usize;
    let viewport = chunks[0].height.saturating_sub(2) as usize;

    let lines = transcript_lines(app, config, inner_width);
    app.scroll.update(lines.len(), viewport);

    let status = app.status();
    let status_color = match status {
        ConnectionStatus::NotConfigured => colors.status_not_configured(),
        ConnectionStatus::Ready => colors.status_ready(),
        ConnectionStatus::Thinking => colors.status_pending(),
    };

    let messages = Paragraph::new(lines)
        .block(gradient_block_with_status(
            " Global Shipping AI ",
            status.label(),
            status_color,
            chat_start,
            chat_end,
        ))
        .scroll((app.scroll.offset.min(u16::MAX as usize) as u16, 0));
    f.render_widget(messages, chunks[0]);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("░"))
        .thumb_symbol("█")
        .style(Style::default().fg(gradient_color(chat_start, chat_end, 0.5)));
    f.render_stateful_widget(
        scrollbar,
        chunks[0].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.scroll.scrollbar,
    );

    // Input box: left border only, blinking cursor, dimmed while waiting
    let cursor_char = if app.animation.cursor_visible { "▎" } else { " " };
    let cursor_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::SLOW_BLINK);

    let draft = app.session.draft();
    let split = draft
        .char_indices()
        .nth(app.session.cursor())
        .map(|(i, _)| i)
        .unwrap_or(draft.len());

    let input_text = if draft.is_empty() {
        Line::from(vec![
            Span::styled(cursor_char, cursor_style),
            Span::styled(
                "UK or USA shipping help...",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(draft[..split].to_string()),
            Span::styled(cursor_char, cursor_style),
            Span::raw(draft[split..].to_string()),
        ])
    };

    let text_color = if app.is_pending() {
        Color::Gray
    } else {
        Color::White
    };

    let input_block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(gradient_color(input_start, input_end, 0.5)))
        .style(Style::default().bg(Color::Rgb(30, 30, 35)));

    let input = Paragraph::new(input_text)
        .style(Style::default().fg(text_color))
        .block(input_block)
        .wrap(Wrap { trim: false });

    f.render_widget(input, chunks[1]);
}
