use super::TextStyle;
use crate::format::PT_TO_MM;

/// Approximate Helvetica advance width of `ch`, in ems.
fn glyph_width(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '\'' | '|' | '!' => 0.28,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '/' | '-' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.86,
        'A'..='Z' | '&' => 0.68,
        '0'..='9' => 0.56,
        _ => 0.52,
    }
}

/// Estimated width of `text` in millimetres.
pub fn text_width(text: &str, style: TextStyle) -> f32 {
    let ems: f32 = text.chars().map(glyph_width).sum();
    let bold_factor = if style.bold { 1.06 } else { 1.0 };
    ems * style.size * PT_TO_MM * bold_factor
}

/// Greedy word wrap to `max_width` millimetres. Words longer than a line are
/// broken by character. Explicit newlines are kept.
pub fn wrap_text(text: &str, max_width: f32, style: TextStyle) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if text_width(&candidate, style) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if text_width(word, style) <= max_width {
                line = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut next = line.clone();
                    next.push(ch);
                    if !line.is_empty() && text_width(&next, style) > max_width {
                        lines.push(std::mem::take(&mut line));
                        line.push(ch);
                    } else {
                        line = next;
                    }
                }
            }
        }
        lines.push(line);
    }

    lines
}
