//! Greedy word wrap against a width metric.
//!
//! Pure, page-unaware. A single word wider than the maximum width is never
//! split; the line is allowed to overflow. This is a known edge case of the
//! greedy algorithm, not something to hide.

/// Millimetres per PostScript point.
const MM_PER_PT: f32 = 0.352_778;

/// Average glyph advance of builtin Helvetica, as a fraction of font size.
const HELVETICA_AVG_ADVANCE: f32 = 0.5;

/// Approximate rendered width of `text` in millimetres for a font size in
/// points. An average-advance heuristic is enough for layout with the
/// builtin fonts; no font file metrics are loaded.
pub fn approx_glyph_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * HELVETICA_AVG_ADVANCE * MM_PER_PT
}

/// Break `text` into lines no wider than `max_width` under `glyph_width`.
///
/// Words are split on whitespace and appended greedily: a word joins the
/// current line if the joined line still fits, otherwise the line is closed
/// and the word starts the next one. Empty input yields no lines.
pub fn wrap<F>(text: &str, max_width: f32, font_size: f32, glyph_width: F) -> Vec<String>
where
    F: Fn(&str, f32) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if glyph_width(&candidate, font_size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_default(text: &str, max_width: f32) -> Vec<String> {
        wrap(text, max_width, 9.0, approx_glyph_width)
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap_default("", 100.0).is_empty());
        assert!(wrap_default("   \n\t ", 100.0).is_empty());
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_default("Short note", 100.0);
        assert_eq!(lines, vec!["Short note"]);
    }

    #[test]
    fn long_text_wraps_to_multiple_lines() {
        let text = "Pain intensity reported as nine out of ten on movement and five \
                    out of ten at rest with positive straight leg raise on the left";
        let lines = wrap_default(text, 60.0);
        assert!(lines.len() > 1);
    }

    #[test]
    fn joined_lines_reconstruct_normalized_input() {
        let text = "  Patient presents   with acute\nlower back pain\trated 9/10  ";
        let lines = wrap_default(text, 40.0);
        let rejoined = lines.join(" ");
        let normalized: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, normalized.join(" "));
    }

    #[test]
    fn no_line_exceeds_max_width() {
        let text = "Conservative management is recommended with staged reassessment \
                    and a structured home exercise program";
        let max_width = 50.0;
        for line in wrap_default(text, max_width) {
            assert!(
                approx_glyph_width(&line, 9.0) <= max_width,
                "line too wide: {line}"
            );
        }
    }

    #[test]
    fn single_overlong_word_is_not_split() {
        let word = "Electroencephalographically";
        let lines = wrap_default(word, 5.0);
        assert_eq!(lines, vec![word.to_string()]);
    }

    #[test]
    fn overlong_word_mid_text_gets_its_own_line() {
        let lines = wrap_default("short Electroencephalographically short", 20.0);
        assert!(lines.contains(&"Electroencephalographically".to_string()));
        // Reconstruction still holds
        assert_eq!(
            lines.join(" "),
            "short Electroencephalographically short"
        );
    }

    #[test]
    fn custom_metric_is_honored() {
        // Metric that counts characters directly
        let metric = |s: &str, _size: f32| s.len() as f32;
        let lines = wrap("aa bb cc dd", 5.0, 1.0, metric);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }
}
