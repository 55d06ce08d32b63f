//! Source pane rendering with syntax highlighting
//!
//! Displays the compiled program with line numbers, highlighting the line that
//! produced the instruction under the TAC cursor. The highlighted line is held
//! at a fixed visual row while the cursor moves, so the text scrolls beneath it.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting, one line at a time.
///
/// `in_comment` carries an open `/* */` comment from one line to the next.
fn highlight_source_code<'a>(line: &'a str, in_comment: &mut bool) -> Line<'a> {
    let comment_style = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    // Index of the first char at or after byte `end`
    let char_index = |end: usize| {
        chars
            .iter()
            .position(|(offset, _)| *offset >= end)
            .unwrap_or(chars.len())
    };

    if *in_comment {
        match line.find("*/") {
            Some(close) => {
                spans.push(Span::styled(&line[..close + 2], comment_style));
                *in_comment = false;
                i = char_index(close + 2);
            }
            None => return Line::from(Span::styled(line, comment_style)),
        }
    }

    while i < chars.len() {
        let (offset, c) = chars[i];

        if c == '/' && matches!(chars.get(i + 1), Some((_, '/' | '*'))) {
            if !current_word.is_empty() {
                let style = get_keyword_style(&current_word, false);
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            // Line comment, or a block comment left open: colour the rest of the line
            let close = match chars[i + 1].1 {
                '*' => line[offset + 2..].find("*/").map(|rel| offset + 2 + rel + 2),
                _ => None,
            };
            match close {
                Some(end) => {
                    spans.push(Span::styled(&line[offset..end], comment_style));
                    i = char_index(end);
                    continue;
                }
                None => {
                    *in_comment = chars[i + 1].1 == '*';
                    spans.push(Span::styled(&line[offset..], comment_style));
                    break;
                }
            }
        }

        if !c.is_alphanumeric() && c != '_' && c != '.' {
            if !current_word.is_empty() {
                let style = get_keyword_style(&current_word, c == '(');
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "float" | "bool" => Style::default().fg(DEFAULT_THEME.type_name),
        "function" | "return" | "if" | "else" | "while" | "switch" | "case" | "default"
        | "break" | "continue" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Start centred, then clamp to the visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    // Highlight from the top so block comments opened above the view carry in
    let mut in_comment = false;
    let highlighted: Vec<Line> = lines
        .iter()
        .map(|line| highlight_source_code(line, &mut in_comment))
        .collect();

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            if is_current {
                let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(background);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content_line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &Line) -> Vec<String> {
        line.spans
            .iter()
            .map(|s| s.content.to_string())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    #[test]
    fn test_highlight_splits_words() {
        let line = highlight_source_code("int x = f(1.5); // note", &mut false);
        assert_eq!(
            words(&line),
            vec!["int", "x", "=", "f", "(", "1.5", ")", ";", "// note"]
        );
    }

    #[test]
    fn test_block_comment_ends_at_close() {
        let mut in_comment = false;
        let line = highlight_source_code("/* c */ x = 1;", &mut in_comment);
        assert_eq!(words(&line), vec!["/* c */", "x", "=", "1", ";"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.comment));
        assert!(line.spans[1..]
            .iter()
            .all(|s| s.style.fg != Some(DEFAULT_THEME.comment)));
        assert!(!in_comment);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut in_comment = false;
        let opening = highlight_source_code("x = 1; /* start", &mut in_comment);
        assert!(in_comment);
        assert_eq!(words(&opening).last().map(String::as_str), Some("/* start"));

        let middle = highlight_source_code("int y = 2;", &mut in_comment);
        assert_eq!(middle.spans.len(), 1);
        assert_eq!(middle.spans[0].style.fg, Some(DEFAULT_THEME.comment));
        assert!(in_comment);

        let closing = highlight_source_code("end */ while", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(words(&closing), vec!["end */", "while"]);
        assert_eq!(closing.spans[0].style.fg, Some(DEFAULT_THEME.comment));
        assert_eq!(closing.spans.last().unwrap().style.fg, Some(DEFAULT_THEME.keyword));
    }

    #[test]
    fn test_keyword_styles() {
        assert_eq!(
            get_keyword_style("while", false).fg,
            Some(DEFAULT_THEME.keyword)
        );
        assert_eq!(
            get_keyword_style("float", false).fg,
            Some(DEFAULT_THEME.type_name)
        );
        assert_eq!(get_keyword_style("f", true).fg, Some(DEFAULT_THEME.function));
        assert_eq!(get_keyword_style("10", false).fg, Some(DEFAULT_THEME.number));
    }
}
