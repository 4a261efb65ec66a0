//! Timing of dialogue lines.
//!
//! The dialogue is cut into blocks at every marker. Each block is anchored to
//! its marker's time and, when a strictly later marker follows, has a budget
//! equal to the gap between them. Inside a block the lines are split over two
//! independent rails:
//!
//! - [`Rail::Speaker`] - Speaker lines, and any content key that is not a
//!   meta-only key.
//! - [`Rail::Meta`] - Lines of meta keys that are neither markers nor
//!   speakers.
//!
//! Both rails start at the marker time and play their lines back to back.
//! When a rail's estimated total exceeds the budget it is rescaled with
//! [`fit_to_budget`].

mod allocate;
mod estimate;

pub use allocate::{fit_to_budget, raw_duration_ms};
pub use estimate::Estimator;

use log::{debug, info};

use squawk_core::semantic::{Marker, Script, ScriptLine};

/// One of the two sequential timelines of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rail {
    Speaker,
    Meta,
}

impl Rail {
    /// The subtitle layer events on this rail are drawn on.
    pub fn layer(self) -> u8 {
        match self {
            Self::Speaker => 0,
            Self::Meta => 1,
        }
    }
}

/// The lines between one marker and the next.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    marker: &'a Marker,
    budget_ms: Option<u64>,
    lines: &'a [ScriptLine],
}

impl<'a> Block<'a> {
    pub fn marker(&self) -> &'a Marker {
        self.marker
    }

    /// Time available to the block, `None` when it is unbounded.
    pub fn budget_ms(&self) -> Option<u64> {
        self.budget_ms
    }

    /// The non-marker lines of the block.
    pub fn lines(&self) -> &'a [ScriptLine] {
        self.lines
    }
}

/// Splits the dialogue of `script` into blocks.
///
/// Lines before the first marker belong to no block; the loader rejects
/// such scripts.
pub fn blocks(script: &Script) -> Vec<Block<'_>> {
    let lines = script.lines();
    let markers = script.markers();

    markers
        .iter()
        .enumerate()
        .map(|(idx, marker)| {
            let next = markers.get(idx + 1);
            let end = next.map_or(lines.len(), Marker::line_index);
            let budget_ms = next
                .filter(|next| next.time_ms() > marker.time_ms())
                .map(|next| next.time_ms() - marker.time_ms());

            Block {
                marker,
                budget_ms,
                lines: &lines[(marker.line_index() + 1).min(end)..end],
            }
        })
        .collect()
}

/// A dialogue line placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLine {
    line_index: usize,
    rail: Rail,
    start_ms: u64,
    end_ms: u64,
}

impl TimedLine {
    /// Index of the line in [`Script::lines`].
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn rail(&self) -> Rail {
        self.rail
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }
}

/// Places every non-marker line of `script` on the timeline.
///
/// `texts` holds the prepared text of every line, indexed like
/// [`Script::lines`]; durations are estimated from it. Lines are returned
/// block by block, speaker rail before meta rail.
pub fn schedule(script: &Script, texts: &[String]) -> Vec<TimedLine> {
    let estimator = Estimator::new(script.acronyms(), script.waypoints());
    let blocks = blocks(script);
    info!(blocks = blocks.len(); "Scheduling dialogue");

    let mut timed = Vec::new();
    for block in blocks.iter().filter(|block| !block.lines().is_empty()) {
        for rail in [Rail::Speaker, Rail::Meta] {
            let rail_lines: Vec<&ScriptLine> = block
                .lines()
                .iter()
                .filter(|line| rail_of(script, line) == rail)
                .collect();
            if rail_lines.is_empty() {
                continue;
            }

            let cps = block.marker().cps();
            let raw: Vec<u64> = rail_lines
                .iter()
                .map(|line| {
                    let text = texts.get(line.index()).map_or(line.text(), String::as_str);
                    raw_duration_ms(estimator.estimate(text), cps)
                })
                .collect();
            let durations = match block.budget_ms() {
                Some(budget) => fit_to_budget(&raw, budget),
                None => raw,
            };

            debug!(
                marker_ms = block.marker().time_ms(),
                rail:? = rail,
                lines = rail_lines.len(),
                budget_ms:? = block.budget_ms();
                "Allocated rail"
            );

            let mut cursor = block.marker().time_ms();
            for (line, duration) in rail_lines.into_iter().zip(durations) {
                let end_ms = cursor.saturating_add(duration);
                timed.push(TimedLine {
                    line_index: line.index(),
                    rail,
                    start_ms: cursor,
                    end_ms,
                });
                cursor = end_ms;
            }
        }
    }

    timed
}

fn rail_of(script: &Script, line: &ScriptLine) -> Rail {
    if script.is_meta_rail_key(line.key()) {
        Rail::Meta
    } else {
        Rail::Speaker
    }
}
