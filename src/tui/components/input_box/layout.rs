//! Wrapping and cursor geometry for the InputBox.
//!
//! Text is wrapped one logical line at a time, so an explicit newline
//! (including a trailing one) always starts a visual row of its own.

/// Border (2) + padding (2) consumed horizontally
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the box starts scrolling internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Left border + left padding
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Top border
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Visual rows of `text` at `width`. Never empty.
pub(super) fn visual_lines(text: &str, width: u16) -> Vec<String> {
    let options = wrap_options(width);
    text.split('\n')
        .flat_map(|line| {
            let wrapped = textwrap::wrap(line, &options);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped.into_iter().map(|cow| cow.into_owned()).collect()
            }
        })
        .collect()
}

pub(super) fn line_count(text: &str, width: u16) -> u16 {
    visual_lines(text, width).len() as u16
}

/// Visual (row, column) of byte offset `pos` in `text`.
pub(super) fn cursor_cell(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let before = &text[..pos];
    let (finished, current) = match before.rfind('\n') {
        Some(i) => (&before[..i], &before[i + 1..]),
        None => ("", before),
    };

    let mut row = if before.contains('\n') {
        line_count(finished, width)
    } else {
        0
    };

    let segments = textwrap::wrap(current, &wrap_options(width));
    let col = match segments.split_last() {
        None => 0,
        Some((_, earlier)) => {
            row += earlier.len() as u16;
            let consumed: usize = earlier.iter().map(|s| s.chars().count()).sum();
            // Separating spaces dropped at wrap points still count as consumed
            current
                .chars()
                .count()
                .saturating_sub(consumed + earlier.len()) as u16
        }
    };

    (row, col.min(width.saturating_sub(1)))
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_row() {
        assert_eq!(visual_lines("", 10), vec![String::new()]);
        assert_eq!(line_count("", 10), 1);
    }

    #[test]
    fn trailing_newline_opens_a_row() {
        assert_eq!(line_count("hello\n", 10), 2);
        assert_eq!(line_count("a\nb\nc", 10), 3);
    }

    #[test]
    fn long_words_break() {
        assert_eq!(line_count("aaaaaaaaaa", 5), 2);
        assert_eq!(line_count("aaaaaaaaaa\n", 5), 3);
    }

    #[test]
    fn cursor_at_start_and_end() {
        assert_eq!(cursor_cell("hello", 0, 20), (0, 0));
        assert_eq!(cursor_cell("hello", 5, 20), (0, 5));
    }

    #[test]
    fn cursor_after_newline_is_next_row() {
        assert_eq!(cursor_cell("hi\n", 3, 20), (1, 0));
        assert_eq!(cursor_cell("hi\nthere", 8, 20), (1, 5));
    }

    #[test]
    fn cursor_on_wrapped_row() {
        // "hello world" at width 6 → "hello" | "world"
        assert_eq!(cursor_cell("hello world", 11, 6), (1, 5));
    }

    #[test]
    fn char_boundaries_multibyte() {
        let s = "a🔥é";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(next_char_boundary(s, s.len()), s.len());
        assert_eq!(prev_char_boundary(s, s.len()), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 1), 0);
    }
}
