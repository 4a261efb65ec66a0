//! Visual substitution of speaker keys inside dialogue text.
//!
//! A speaker key mentioned in a line (`"DLH97V, descend"`) is replaced by the
//! speaker's display name before the line is estimated or rendered, so the
//! timing reflects what is actually shown.

use log::debug;

use squawk_core::semantic::Script;

/// Replaces speaker keys with display names.
///
/// A key only matches when it is not adjacent to an ASCII letter or digit,
/// so `ATC` matches in `"(ATC),"` but not in `"ATC1"` or `"KATC"`. At each
/// position the longest matching key wins, and inserted names are never
/// scanned again.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    /// `(key, display name)` pairs, longest key first.
    replacements: Vec<(String, String)>,
}

impl Substitution {
    /// Collects the speakers of `script` whose display name differs from
    /// their key.
    pub fn new(script: &Script) -> Self {
        let pairs = script.speakers().keys().map(|key| {
            let style = script.resolve_style(*key);
            (key.as_string(), style.display_name().to_string())
        });
        Self::from_pairs(pairs)
    }

    /// Builds a substitution from explicit `(key, display name)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut replacements: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(key, name)| (key.into(), name.into()))
            .filter(|(key, name)| !key.is_empty() && !name.is_empty() && key != name)
            .collect();
        // Stable, so equal lengths keep declaration order.
        replacements.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

        debug!(replacements = replacements.len(); "Prepared speaker substitution");
        Self { replacements }
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Applies the substitution to `text` in one left-to-right pass.
    pub fn apply(&self, text: &str) -> String {
        if self.is_empty() || text.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut previous: Option<char> = None;
        let mut rest = text;

        while let Some(ch) = rest.chars().next() {
            let at_boundary = !previous.is_some_and(|p| p.is_ascii_alphanumeric());
            let matched = if at_boundary {
                self.match_at(rest)
            } else {
                None
            };

            match matched {
                Some((key, name)) => {
                    out.push_str(name);
                    previous = key.chars().next_back();
                    rest = &rest[key.len()..];
                }
                None => {
                    out.push(ch);
                    previous = Some(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }

        out
    }

    fn match_at(&self, rest: &str) -> Option<(&str, &str)> {
        self.replacements
            .iter()
            .find(|(key, _)| {
                rest.strip_prefix(key.as_str()).is_some_and(|after| {
                    !after
                        .chars()
                        .next()
                        .is_some_and(|next| next.is_ascii_alphanumeric())
                })
            })
            .map(|(key, name)| (key.as_str(), name.as_str()))
    }
}
