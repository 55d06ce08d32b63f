//! Instruction listing with the selection cursor

use crate::codegen::TacProgram;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colour one rendered instruction word by word
fn highlight_instruction(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();

    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(word, word_style(word)));
    }

    spans
}

fn word_style(word: &str) -> Style {
    let numbered = |prefix: char| {
        word.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    };

    match word {
        "if" | "goto" | "label" | "return" | "call" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if numbered('L') => Style::default().fg(DEFAULT_THEME.label),
        _ if numbered('t') => Style::default().fg(DEFAULT_THEME.temp),
        _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the TAC pane, scrolling so the cursor row stays visible
pub fn render_tac_pane(
    frame: &mut Frame,
    area: Rect,
    program: &TacProgram,
    cursor: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Three-Address Code ({}) ", program.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if cursor < *scroll {
        *scroll = cursor;
    } else if cursor >= *scroll + visible_height {
        *scroll = cursor + 1 - visible_height;
    }

    let rendered = program.lines();
    let visible_lines: Vec<Line> = rendered
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, text)| {
            let is_current = idx == cursor;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            // Label lines sit flush left, everything else is indented under them
            let indent = if text.starts_with("label ") { "" } else { "  " };

            let mut spans = vec![
                Span::styled(format!("{:4} ", idx), num_style),
                Span::raw(indent),
            ];
            spans.extend(highlight_instruction(text));

            if is_current {
                let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut spans {
                    span.style = span.style.patch(background);
                }
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_styles() {
        assert_eq!(word_style("L12").fg, Some(DEFAULT_THEME.label));
        assert_eq!(word_style("t3").fg, Some(DEFAULT_THEME.temp));
        assert_eq!(word_style("goto").fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(word_style("total").fg, Some(DEFAULT_THEME.fg));
        assert_eq!(word_style("L").fg, Some(DEFAULT_THEME.fg));
        assert_eq!(word_style("2.5").fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_highlight_keeps_text() {
        let spans = highlight_instruction("if t1 == false goto L1");
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "if t1 == false goto L1");
    }
}
