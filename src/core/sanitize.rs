//! Markup escaping for transcript text.
//!
//! Message text is stored raw and only turned into markup at render time.
//! The markup dialect is tiny: five HTML entities and a `<br>` line break.
//! `tui::markup` is the reader on the other side.

/// Line-break marker emitted by [`format_for_display`].
pub const LINE_BREAK: &str = "<br>";

/// Neutralizes every character that would be read as markup.
///
/// Total over all inputs. Newlines pass through untouched so that
/// [`format_for_display`] can still find them.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes `text`, then turns each newline into a [`LINE_BREAK`].
///
/// Bot replies only. User text is shown with [`escape`] alone.
pub fn format_for_display(text: &str) -> String {
    escape(text).replace('\n', LINE_BREAK)
}

/// Reverses [`escape`].
///
/// Only the five entities `escape` produces are decoded. Anything else that
/// looks like an entity is kept as written.
pub fn unescape(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ]
        .into_iter()
        .find(|(entity, _)| rest.starts_with(entity));

        match decoded {
            Some((entity, c)) => {
                out.push(c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_escape_rules {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(escape($input), $expected);
                }
            )+
        };
    }

    test_escape_rules! {
        escape_script_tag: "<script>alert(1)</script>" => "&lt;script&gt;alert(1)&lt;/script&gt;",
        escape_ampersand: "fish & chips" => "fish &amp; chips",
        escape_double_quotes: "say \"hi\"" => "say &quot;hi&quot;",
        escape_single_quotes: "it's" => "it&#39;s",
        escape_existing_entity_is_escaped_again: "&lt;" => "&amp;lt;",
        escape_plain_text_unchanged: "Hello world" => "Hello world",
        escape_empty: "" => "",
        escape_keeps_newlines: "a\n<b>" => "a\n&lt;b&gt;",
    }

    #[test]
    fn format_for_display_converts_newlines() {
        assert_eq!(format_for_display("a\nb"), "a<br>b");
    }

    #[test]
    fn format_for_display_escapes_before_breaking() {
        assert_eq!(format_for_display("<i>\n&"), "&lt;i&gt;<br>&amp;");
    }

    #[test]
    fn format_for_display_markup_in_text_is_not_a_break() {
        // A literal "<br>" typed by someone must not become a line break
        assert_eq!(format_for_display("<br>"), "&lt;br&gt;");
    }

    #[test]
    fn unescape_reverses_escape() {
        let samples = [
            "<script>alert('x')</script>",
            "Tom & \"Jerry\"",
            "&amp; already",
            "a & b && c;",
            "trailing &",
            "unicode ✓ <é>",
            "",
        ];
        for s in samples {
            assert_eq!(unescape(&escape(s)), s, "round trip failed for {s:?}");
        }
    }

    #[test]
    fn unescape_leaves_unknown_entities() {
        assert_eq!(unescape("&nbsp;&lt;"), "&nbsp;<");
    }
}
