use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::gradient::gradient_color;

/// Wrap text to fit within a given width.
///
/// Explicit newlines start a new line; blank lines are kept. Words wider
/// than `width` are broken into `width`-sized pieces. Width is counted in
/// chars.
///
/// # Arguments
/// * `text` - The text to wrap
/// * `width` - Maximum width per line
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width + word_width + 1 > width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            if word_width > width {
                let chars: Vec<char> = word.chars().collect();
                let mut pieces = chars.chunks(width).peekable();
                while let Some(piece) = pieces.next() {
                    let piece_text: String = piece.iter().collect();
                    if pieces.peek().is_some() {
                        lines.push(piece_text);
                    } else {
                        // Last piece can share its line with the next word
                        current_width = piece.len();
                        current_line = piece_text;
                    }
                }
                continue;
            }

            if !current_line.is_empty() {
                current_line.push(' ');
                current_width += 1;
            }
            current_line.push_str(word);
            current_width += word_width;
        }

        lines.push(current_line);
    }

    lines
}

/// Color each character of `text` along a two-stop gradient.
pub fn gradient_line(text: &str, start: (u8, u8, u8), end: (u8, u8, u8)) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let total_chars = chars.len();

    if total_chars == 0 {
        return Line::from("");
    }

    let spans: Vec<Span<'static>> = chars
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            let position = i as f32 / total_chars.saturating_sub(1).max(1) as f32;
            Span::styled(
                ch.to_string(),
                Style::default()
                    .fg(gradient_color(start, end, position))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    Line::from(spans)
}
