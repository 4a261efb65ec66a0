//! Event assembly.
//!
//! Turns a scheduled script into a [`Track`]: one dialogue event per timed
//! line, an optional background event behind it, the style table and the
//! summary metadata handed to an encoder.

use log::{debug, info, trace};
use serde::Serialize;

use squawk_core::{
    color::Color,
    draw::{BackgroundBox, WrappedText, max_units_per_line},
    geometry::{Point, Size},
    identifier::Id,
    semantic::Script,
};

use crate::{
    config::RenderConfig,
    substitute::Substitution,
    timing::{self, Rail},
};

/// One row of the style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRow {
    /// Speaker or meta key the row is named after.
    key: Id,
    /// Primary text color.
    color: Color,
    alignment: u8,
}

impl StyleRow {
    /// Returns the speaker or meta key naming this row.
    pub fn key(&self) -> Id {
        self.key
    }

    /// Returns the primary text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Numpad alignment, 1 to 9.
    pub fn alignment(&self) -> u8 {
        self.alignment
    }
}

/// A line of dialogue shown on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEvent {
    start_ms: u64,
    end_ms: u64,
    /// Rail the line was scheduled on, which picks the layer.
    rail: Rail,
    style: Id,
    /// Display name of the speaker or meta key.
    name: String,
    text: String,
}

impl DialogueEvent {
    /// Returns the start time in milliseconds.
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Returns the end time in milliseconds.
    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    /// Layer 0 for the speaker rail, 1 for the meta rail.
    pub fn layer(&self) -> u8 {
        self.rail.layer()
    }

    /// Key of the style row the event uses.
    pub fn style(&self) -> Id {
        self.style
    }

    /// Display name written to the `Name` field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrapped text with `\N` line breaks, not yet escaped.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A filled rounded rectangle drawn behind a dialogue event.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundEvent {
    start_ms: u64,
    end_ms: u64,
    origin: Point,
    path: String,
    color: Color,
}

impl BackgroundEvent {
    /// Returns the start time, shared with the dialogue event in front.
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Returns the end time, shared with the dialogue event in front.
    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    /// Top-left corner of the box in frame pixels.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Drawing commands relative to [`origin`](Self::origin).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fill color, alpha included.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// An entry of the event list.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Box drawn on layer 0, behind the text.
    Background(BackgroundEvent),
    /// Text on the layer of its rail.
    Dialogue(DialogueEvent),
}

impl Event {
    /// Start time of either variant in milliseconds.
    pub fn start_ms(&self) -> u64 {
        match self {
            Self::Background(event) => event.start_ms,
            Self::Dialogue(event) => event.start_ms,
        }
    }

    /// End time of either variant in milliseconds.
    pub fn end_ms(&self) -> u64 {
        match self {
            Self::Background(event) => event.end_ms,
            Self::Dialogue(event) => event.end_ms,
        }
    }

    /// Tie breaker between events with the same start: backgrounds, then
    /// the speaker rail, then the meta rail.
    pub fn ordering_key(&self) -> i8 {
        match self {
            Self::Background(_) => -1,
            Self::Dialogue(event) => match event.rail {
                Rail::Speaker => 0,
                Rail::Meta => 1,
            },
        }
    }
}

/// Summary of a track for an external encoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackMetadata {
    /// Start of the earliest event in seconds, absent for an empty track.
    #[serde(skip_serializing_if = "Option::is_none")]
    start_seconds: Option<f64>,
    /// End of the latest event in seconds, absent for an empty track.
    #[serde(skip_serializing_if = "Option::is_none")]
    end_seconds: Option<f64>,
    /// Frame width in pixels.
    play_res_x: u32,
    /// Frame height in pixels.
    play_res_y: u32,
}

impl TrackMetadata {
    /// Start of the earliest event in seconds, `None` for an empty track.
    pub fn start_seconds(&self) -> Option<f64> {
        self.start_seconds
    }

    /// End of the latest event in seconds, `None` for an empty track.
    pub fn end_seconds(&self) -> Option<f64> {
        self.end_seconds
    }

    /// Frame size as `(width, height)`.
    pub fn play_res(&self) -> (u32, u32) {
        (self.play_res_x, self.play_res_y)
    }
}

/// A compiled subtitle track.
///
/// Holds everything an encoder needs: the render settings, one style row
/// per speaker and meta key, the sorted events and the summary metadata.
/// Built by [`assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    render: RenderConfig,
    /// Speaker rows first, then meta rows, each in declaration order.
    styles: Vec<StyleRow>,
    events: Vec<Event>,
    metadata: TrackMetadata,
}

impl Track {
    /// The render settings the track was laid out with.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Style rows in the order they are written out.
    pub fn styles(&self) -> &[StyleRow] {
        &self.styles
    }

    /// Events ordered by start time, then [`Event::ordering_key`].
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Summary metadata, see [`TrackMetadata`].
    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }
}

/// Prepares the text of every line for estimation and display.
///
/// Marker lines are kept as written. Content lines get speaker keys
/// substituted and, when the style asks for it, the display name prefixed.
pub fn prepare_texts(script: &Script) -> Vec<String> {
    let substitution = Substitution::new(script);

    script
        .lines()
        .iter()
        .map(|line| {
            if script.is_marker_key(line.key()) {
                return line.text().to_string();
            }
            let text = substitution.apply(line.text());
            let style = script.resolve_style(line.key());
            if style.show_name() {
                format!("{}: {text}", style.display_name())
            } else {
                text
            }
        })
        .collect()
}

/// Builds the track of `script` laid out with `render`.
///
/// Schedules every line, wraps its text to the frame width and emits a
/// dialogue event for it. A background event is emitted first when the
/// style asks for one and carries a fill color. Events are then sorted by
/// start time and [`Event::ordering_key`].
pub fn assemble(script: &Script, render: RenderConfig) -> Track {
    info!(lines = script.lines().len(); "Assembling track");

    let texts = prepare_texts(script);
    let timed = timing::schedule(script, &texts);

    let frame = Size::new(
        i64::from(render.play_res_x()),
        i64::from(render.play_res_y()),
    );
    let max_units = max_units_per_line(render.play_res_x(), render.wrap_width_ratio());
    debug!(max_units; "Wrapping dialogue");

    let mut events = Vec::with_capacity(timed.len() * 2);
    for line in &timed {
        let source = &script.lines()[line.line_index()];
        let style = script.resolve_style(source.key());
        let text = texts
            .get(line.line_index())
            .map_or(source.text(), String::as_str);
        let wrapped = WrappedText::wrap(text, max_units);

        if style.wants_background(wrapped.line_count()) {
            if let Some(color) = style.background().color() {
                let bg = BackgroundBox::new(
                    style.position(),
                    wrapped.line_count(),
                    wrapped.max_line_units(),
                    frame,
                );
                events.push(Event::Background(BackgroundEvent {
                    start_ms: line.start_ms(),
                    end_ms: line.end_ms(),
                    origin: bg.origin(),
                    path: bg.path(),
                    color,
                }));
            }
        }

        events.push(Event::Dialogue(DialogueEvent {
            start_ms: line.start_ms(),
            end_ms: line.end_ms(),
            rail: line.rail(),
            style: source.key(),
            name: style.display_name().to_string(),
            text: wrapped.text().to_string(),
        }));
    }

    // Stable, so equal keys keep block and rail order.
    events.sort_by_key(|event| (event.start_ms(), event.ordering_key()));

    let styles: Vec<StyleRow> = script
        .style_keys()
        .into_iter()
        .map(|key| {
            let style = script.resolve_style(key);
            StyleRow {
                key,
                color: style.color(),
                alignment: style.position().alignment(),
            }
        })
        .collect();

    let metadata = TrackMetadata {
        start_seconds: events.iter().map(Event::start_ms).min().map(ms_to_seconds),
        end_seconds: events.iter().map(Event::end_ms).max().map(ms_to_seconds),
        play_res_x: render.play_res_x(),
        play_res_y: render.play_res_y(),
    };

    info!(
        events = events.len(),
        styles = styles.len(),
        start_seconds:? = metadata.start_seconds,
        end_seconds:? = metadata.end_seconds;
        "Track assembled"
    );
    trace!(events:?; "Assembled events");

    Track {
        render,
        styles,
        events,
        metadata,
    }
}

/// Converts milliseconds to fractional seconds.
fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
