//! Width-table driven word wrapping.
//!
//! The wrapper packs words greedily into lines no wider than a unit budget.
//! Explicit breaks in the source (any newline convention, or an existing
//! `\N` marker) always start a new line.

use log::trace;

use super::metrics::{FONT_SIZE, MARGIN_L, MARGIN_R, MAX_WRAP_RATIO, MIN_WRAP_RATIO};

/// ASS hard line break.
const LINE_BREAK: &str = "\\N";

/// Width of `ch` in font-size units.
///
/// # Examples
///
/// ```
/// # use squawk_core::draw::char_width_units;
/// assert_eq!(char_width_units(' '), 0.24);
/// assert_eq!(char_width_units('W'), 0.85);
/// assert_eq!(char_width_units('a'), 0.46);
/// ```
pub fn char_width_units(ch: char) -> f64 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' | '`' => 0.24,
        'i' | 'l' | 'I' | '1' | '[' | ']' | '(' | ')' => 0.30,
        'M' | 'W' | '@' | '#' | '%' => 0.85,
        c if c.is_uppercase() || c.is_numeric() => 0.62,
        _ => 0.46,
    }
}

/// Total width of `text` in font-size units.
pub fn text_width_units(text: &str) -> f64 {
    text.chars().map(char_width_units).sum()
}

/// Unit budget of one wrapped line for a frame `play_res_x` pixels wide.
///
/// `wrap_ratio` is clamped to `[0.10, 1.0]` before use.
///
/// ```
/// # use squawk_core::draw::max_units_per_line;
/// // (1920 - 40) × 0.75 = 1410 px, divided by the 56 px font size.
/// assert_eq!(max_units_per_line(1920, 0.75), 1410.0 / 56.0);
/// ```
pub fn max_units_per_line(play_res_x: u32, wrap_ratio: f64) -> f64 {
    let ratio = wrap_ratio.clamp(MIN_WRAP_RATIO, MAX_WRAP_RATIO);
    let usable_px = (i64::from(play_res_x) - MARGIN_L - MARGIN_R).max(1);
    let target_px = ((usable_px as f64 * ratio).floor() as i64).max(1);
    target_px as f64 / FONT_SIZE as f64
}

/// Text after greedy wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    text: String,
    line_count: usize,
    max_line_units: f64,
}

impl WrappedText {
    /// Wraps `text` so no line exceeds `max_units` unless it holds a single
    /// word that is wider on its own.
    ///
    /// ```
    /// # use squawk_core::draw::WrappedText;
    /// let wrapped = WrappedText::wrap("one two\nthree", 100.0);
    /// assert_eq!(wrapped.text(), "one two\\Nthree");
    /// assert_eq!(wrapped.line_count(), 2);
    /// ```
    pub fn wrap(text: &str, max_units: f64) -> Self {
        let normalized = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\n', LINE_BREAK);

        let space_units = char_width_units(' ');
        let mut lines: Vec<String> = Vec::new();
        let mut max_line_units = 0.0_f64;

        for segment in normalized.split(LINE_BREAK) {
            let mut current: Vec<&str> = Vec::new();
            let mut current_units = 0.0;

            for word in segment.split_whitespace() {
                let word_units = text_width_units(word);
                if current.is_empty() {
                    current.push(word);
                    current_units = word_units;
                } else if current_units + space_units + word_units <= max_units {
                    current.push(word);
                    current_units += space_units + word_units;
                } else {
                    lines.push(current.join(" "));
                    max_line_units = max_line_units.max(current_units);
                    current = vec![word];
                    current_units = word_units;
                }
            }

            lines.push(current.join(" "));
            max_line_units = max_line_units.max(current_units);
        }

        let line_count = lines.len().max(1);
        trace!(line_count, max_line_units; "Wrapped text");

        Self {
            text: lines.join(LINE_BREAK),
            line_count,
            max_line_units,
        }
    }

    /// The wrapped text with `\N` between lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of rendered lines, at least one.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Width of the widest line in units.
    pub fn max_line_units(&self) -> f64 {
        self.max_line_units
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_char_width_table() {
        assert_eq!(char_width_units('`'), 0.24);
        assert_eq!(char_width_units('('), 0.30);
        assert_eq!(char_width_units('%'), 0.85);
        assert_eq!(char_width_units('Q'), 0.62);
        assert_eq!(char_width_units('7'), 0.62);
        assert_eq!(char_width_units('1'), 0.30);
        assert_eq!(char_width_units('é'), 0.46);
    }

    #[test]
    fn test_text_width_units() {
        assert!(approx_eq!(f64, text_width_units("Hi."), 0.62 + 0.30 + 0.24, ulps = 4));
        assert_eq!(text_width_units(""), 0.0);
    }

    #[test]
    fn test_max_units_per_line_clamps_ratio() {
        assert_eq!(max_units_per_line(1920, 5.0), max_units_per_line(1920, 1.0));
        assert_eq!(max_units_per_line(1920, 0.0), max_units_per_line(1920, 0.10));
        assert_eq!(max_units_per_line(1920, 1.0), 1880.0 / 56.0);
    }

    #[test]
    fn test_max_units_per_line_tiny_frame() {
        assert_eq!(max_units_per_line(10, 0.75), 1.0 / 56.0);
    }

    #[test]
    fn test_wrap_greedy_packing() {
        // "aaaa" is 1.84 units; two words with a space need 3.92.
        let wrapped = WrappedText::wrap("aaaa aaaa aaaa", 4.0);
        assert_eq!(wrapped.text(), "aaaa aaaa\\Naaaa");
        assert_eq!(wrapped.line_count(), 2);
        assert!(approx_eq!(f64, wrapped.max_line_units(), 3.92, epsilon = 1e-9));
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        let wrapped = WrappedText::wrap("WWWWWWWW", 1.0);
        assert_eq!(wrapped.text(), "WWWWWWWW");
        assert_eq!(wrapped.line_count(), 1);
    }

    #[test]
    fn test_wrap_normalizes_breaks() {
        let wrapped = WrappedText::wrap("a\r\nb\rc\\Nd", 100.0);
        assert_eq!(wrapped.text(), "a\\Nb\\Nc\\Nd");
        assert_eq!(wrapped.line_count(), 4);
    }

    #[test]
    fn test_wrap_empty_text() {
        let wrapped = WrappedText::wrap("", 10.0);
        assert_eq!(wrapped.text(), "");
        assert_eq!(wrapped.line_count(), 1);
        assert_eq!(wrapped.max_line_units(), 0.0);
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let wrapped = WrappedText::wrap("  spaced   out  ", 100.0);
        assert_eq!(wrapped.text(), "spaced out");
    }

    fn words_strategy(alphabet: &'static str) -> impl Strategy<Value = String> {
        let pattern = format!("[{alphabet}]{{1,8}}( [{alphabet}]{{1,8}}){{0,12}}");
        proptest::string::string_regex(&pattern).expect("valid regex")
    }

    fn check_narrow_never_wraps_more(length: usize, words: usize, max_units: f64) -> Result<(), TestCaseError> {
        let word_narrow = ".".repeat(length);
        let word_wide = "W".repeat(length);
        let narrow = vec![word_narrow; words].join(" ");
        let wide = vec![word_wide; words].join(" ");

        let narrow_lines = WrappedText::wrap(&narrow, max_units).line_count();
        let wide_lines = WrappedText::wrap(&wide, max_units).line_count();
        prop_assert!(narrow_lines <= wide_lines);
        Ok(())
    }

    fn check_lines_fit_budget(text: &str, max_units: f64) -> Result<(), TestCaseError> {
        let wrapped = WrappedText::wrap(text, max_units);
        prop_assert!(wrapped.line_count() >= 1);
        for line in wrapped.text().split(LINE_BREAK) {
            let fits = text_width_units(line) <= max_units + 1e-9;
            let single_word = !line.contains(' ');
            prop_assert!(fits || single_word, "line {line:?} exceeds {max_units}");
        }
        Ok(())
    }

    fn check_words_preserved(text: &str, max_units: f64) -> Result<(), TestCaseError> {
        let wrapped = WrappedText::wrap(text, max_units);
        let original: Vec<&str> = text.split_whitespace().collect();
        let rewrapped = wrapped.text().replace(LINE_BREAK, " ");
        let after: Vec<&str> = rewrapped.split_whitespace().collect();
        prop_assert_eq!(original, after);
        Ok(())
    }

    proptest! {
        #[test]
        fn narrow_punctuation_never_wraps_more_than_wide_letters(
            length in 1usize..10,
            words in 1usize..20,
            max_units in 0.5f64..40.0,
        ) {
            check_narrow_never_wraps_more(length, words, max_units)?;
        }

        #[test]
        fn wrapped_lines_fit_budget(text in words_strategy("a-zA-Z.,"), max_units in 1.0f64..30.0) {
            check_lines_fit_budget(&text, max_units)?;
        }

        #[test]
        fn wrapping_preserves_words(text in words_strategy("a-zA-Z0-9"), max_units in 1.0f64..30.0) {
            check_words_preserved(&text, max_units)?;
        }
    }
}
