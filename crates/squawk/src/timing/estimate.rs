//! Spoken-length estimation.
//!
//! A line is sized in "speech units", roughly the number of characters a
//! reader would voice. Digits count as their spoken word, callsign-like
//! tokens are spelled with the phonetic alphabet, and declared acronyms
//! count as their expansion.

use squawk_core::semantic::{Acronyms, Waypoints};

/// Characters stripped from both ends of a token before classifying it.
const TOKEN_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Units of a `.` spoken as "decimal".
const DECIMAL_UNITS: u32 = 7;

fn digit_units(ch: char) -> u32 {
    match ch {
        '0' => 4, // zero
        '1' => 3, // one
        '2' => 3, // two
        '3' => 5, // three
        '4' => 4, // four
        '5' => 4, // five
        '6' => 3, // six
        '7' => 5, // seven
        '8' => 5, // eight
        '9' => 5, // niner
        _ => 1,
    }
}

fn letter_units(ch: char) -> u32 {
    match ch {
        'A' => 5, // alfa
        'B' => 5, // bravo
        'C' => 7, // charlie
        'D' => 5, // delta
        'E' => 4, // echo
        'F' => 7, // foxtrot
        'G' => 5, // golf
        'H' => 5, // hotel
        'I' => 5, // india
        'J' => 7, // juliett
        'K' => 4, // kilo
        'L' => 4, // lima
        'M' => 4, // mike
        'N' => 6, // november
        'O' => 6, // oscar
        'P' => 4, // papa
        'Q' => 7, // quebec
        'R' => 5, // romeo
        'S' => 6, // sierra
        'T' => 5, // tango
        'U' => 7, // uniform
        'V' => 6, // victor
        'W' => 7, // whiskey
        'X' => 6, // xray
        'Y' => 6, // yankee
        'Z' => 4, // zulu
        _ => 1,
    }
}

/// Estimates spoken length of text against a script's acronyms and waypoints.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    acronyms: &'a Acronyms,
    waypoints: &'a Waypoints,
}

impl<'a> Estimator<'a> {
    pub fn new(acronyms: &'a Acronyms, waypoints: &'a Waypoints) -> Self {
        Self {
            acronyms,
            waypoints,
        }
    }

    /// Returns the speech units of `text`.
    ///
    /// Every token contributes one trailing boundary unit.
    ///
    /// ```
    /// # use squawk::timing::Estimator;
    /// # use squawk_core::semantic::{Acronyms, Waypoints};
    /// let acronyms: Acronyms = [("FL", "Flight Level")].into_iter().collect();
    /// let waypoints = Waypoints::default();
    /// let estimator = Estimator::new(&acronyms, &waypoints);
    ///
    /// // "two" plus one boundary.
    /// assert_eq!(estimator.estimate("2"), 4);
    /// // "delta lima hotel" with one boundary per letter.
    /// assert_eq!(estimator.estimate("DLH"), 17);
    /// ```
    pub fn estimate(&self, text: &str) -> u32 {
        let mut visited = Vec::new();
        self.estimate_with(text, &mut visited)
    }

    /// Estimates `text` while the acronyms in `visited` are being expanded.
    ///
    /// Keys pushed while sizing a token are popped before the next token,
    /// so the chain only guards against cycles within one expansion path.
    fn estimate_with(&self, text: &str, visited: &mut Vec<String>) -> u32 {
        text.split_whitespace()
            .map(|token| self.token_units(token, visited))
            .fold(0u32, u32::saturating_add)
    }

    fn token_units(&self, token: &str, visited: &mut Vec<String>) -> u32 {
        let stripped = token.trim_matches(TOKEN_PUNCTUATION);

        if let Some(units) = self.acronym_units(stripped, visited) {
            return units;
        }

        if self.is_phonetic(stripped) {
            return stripped
                .chars()
                .map(|ch| {
                    if ch.is_ascii_digit() {
                        digit_units(ch) + 1
                    } else {
                        letter_units(ch) + 1
                    }
                })
                .sum();
        }

        literal_units(token)
    }

    /// Sizes a token whose leading uppercase run is a declared acronym.
    ///
    /// Returns `None` when there is no such acronym or it is already being
    /// expanded on the current path.
    fn acronym_units(&self, stripped: &str, visited: &mut Vec<String>) -> Option<u32> {
        let split = stripped
            .char_indices()
            .find(|(_, ch)| !(ch.is_alphabetic() && ch.is_uppercase()))
            .map_or(stripped.len(), |(idx, _)| idx);
        let (prefix, suffix) = stripped.split_at(split);

        if prefix.is_empty() || visited.iter().any(|key| key == prefix) {
            return None;
        }
        let expansion = self.acronyms.get(prefix)?;

        visited.push(prefix.to_string());
        let mut units = self.estimate_with(expansion, visited);
        if !suffix.is_empty() {
            units = units
                .saturating_add(1)
                .saturating_add(self.estimate_with(suffix, visited));
        }
        visited.pop();

        Some(units.saturating_add(1))
    }

    /// Returns `true` for callsign-like tokens that are spelled out.
    ///
    /// `DLH97V` qualifies; `A321neo` does not because an uppercase letter is
    /// followed by a lowercase one, and neither does a declared waypoint.
    fn is_phonetic(&self, stripped: &str) -> bool {
        if stripped.is_empty() {
            return false;
        }

        let chars: Vec<char> = stripped.chars().collect();
        let upper_then_lower = chars
            .windows(2)
            .any(|pair| pair[0].is_uppercase() && pair[1].is_lowercase());

        !upper_then_lower
            && chars
                .iter()
                .all(|ch| ch.is_uppercase() || ch.is_ascii_digit())
            && chars.iter().any(|ch| ch.is_alphabetic())
            && !self.waypoints.contains(stripped)
    }
}

/// Units of a token read as written: digits as words, a decimal point
/// between digits as "decimal", anything else one unit, plus a boundary.
fn literal_units(token: &str) -> u32 {
    let chars: Vec<char> = token.chars().collect();
    let body: u32 = chars
        .iter()
        .enumerate()
        .map(|(idx, &ch)| {
            let decimal_point = ch == '.'
                && idx > 0
                && chars[idx - 1].is_ascii_digit()
                && chars.get(idx + 1).is_some_and(char::is_ascii_digit);
            if decimal_point {
                DECIMAL_UNITS
            } else {
                digit_units(ch)
            }
        })
        .sum();
    body + 1
}
