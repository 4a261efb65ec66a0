//! Advanced SubStation Alpha (ASS) output.

use std::{
    fmt::Write as _,
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use squawk_core::draw::metrics::{FONT_SIZE, MARGIN_L, MARGIN_R, MARGIN_V};

use crate::{
    assemble::{BackgroundEvent, DialogueEvent, Event, Track},
    export,
};

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Writes tracks as `.ass` files.
///
/// The file is written to a temporary file next to the destination and
/// moved into place once complete, so a failed export leaves no partial
/// track behind.
#[derive(Debug, Clone)]
pub struct Ass {
    path: PathBuf,
}

impl Ass {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl export::Exporter for Ass {
    fn export_track(&self, track: &Track) -> Result<(), export::Error> {
        if self.path.file_name().is_none() {
            return Err(export::Error::InvalidPath(self.path.clone()));
        }

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(export::Error::io(&dir))?;

        let content = render(track);
        info!(path:? = self.path, bytes = content.len(); "Writing ASS file");

        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(|err| {
            error!(dir:?, err:err; "Failed to create temporary file");
            export::Error::io(&dir)(err)
        })?;
        file.write_all(content.as_bytes()).map_err(|err| {
            error!(err:err; "Failed to write ASS content");
            export::Error::io(file.path())(err)
        })?;
        file.persist(&self.path).map_err(|err| {
            error!(path:? = self.path, err:err; "Failed to move ASS file into place");
            export::Error::io(&self.path)(err.error)
        })?;

        debug!(path:? = self.path; "ASS file written");
        Ok(())
    }
}

/// Serializes `track` to ASS text.
///
/// Every line, the last one included, ends with a newline.
pub fn render(track: &Track) -> String {
    let mut out = String::new();
    let render = track.render();

    out.push_str("[Script Info]\n");
    push_line(&mut out, format_args!("Title: {}", render.title()));
    out.push_str("ScriptType: v4.00+\n");
    out.push_str("WrapStyle: 2\n");
    push_line(&mut out, format_args!("PlayResX: {}", render.play_res_x()));
    push_line(&mut out, format_args!("PlayResY: {}", render.play_res_y()));
    out.push('\n');

    out.push_str("[V4+ Styles]\n");
    push_line(&mut out, format_args!("{STYLE_FORMAT}"));
    push_line(
        &mut out,
        format_args!(
            "Style: Default,{},{FONT_SIZE},&H00FFFFFF,&H000000FF,&H00000000,&H00000000,\
             0,0,0,0,100,100,0,0,1,2,2,1,10,10,10,1",
            render.font_name()
        ),
    );
    for row in track.styles() {
        push_line(
            &mut out,
            format_args!(
                "Style: {},{},{FONT_SIZE},{},&H000000FF,&H00000000,&H00000000,\
                 0,0,0,0,100,100,0,0,1,2,2,{},{MARGIN_L},{MARGIN_R},{MARGIN_V},1",
                row.key(),
                render.font_name(),
                row.color().to_ass(),
                row.alignment()
            ),
        );
    }
    out.push('\n');

    out.push_str("[Events]\n");
    push_line(&mut out, format_args!("{EVENT_FORMAT}"));
    for event in track.events() {
        match event {
            Event::Background(bg) => push_background(&mut out, bg),
            Event::Dialogue(dialogue) => push_dialogue(&mut out, dialogue),
        }
    }

    out
}

fn push_line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing to a String cannot fail.
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn push_dialogue(out: &mut String, event: &DialogueEvent) {
    push_line(
        out,
        format_args!(
            "Dialogue: {},{},{},{},{},0,0,0,,{{\\q2}}{}",
            event.layer(),
            format_time(event.start_ms()),
            format_time(event.end_ms()),
            event.style(),
            escape_text(event.name()),
            escape_text(event.text())
        ),
    );
}

fn push_background(out: &mut String, event: &BackgroundEvent) {
    let origin = event.origin();
    push_line(
        out,
        format_args!(
            "Dialogue: 0,{},{},Default,,0,0,0,,\
             {{\\p1\\pos({},{})\\an7\\bord0\\shad0\\1c&H{}&\\1a&H{}&}}{}{{\\p0}}",
            format_time(event.start_ms()),
            format_time(event.end_ms()),
            origin.x(),
            origin.y(),
            event.color().ass_bgr(),
            event.color().ass_alpha(),
            event.path()
        ),
    );
}

/// Formats milliseconds as `H:MM:SS.cc`, truncated to centiseconds.
///
/// ```
/// # use squawk::export::ass::format_time;
/// assert_eq!(format_time(0), "0:00:00.00");
/// assert_eq!(format_time(3_723_459), "1:02:03.45");
/// ```
pub fn format_time(ms: u64) -> String {
    let centis = ms / 10;
    let hours = centis / 360_000;
    let minutes = centis / 6_000 % 60;
    let seconds = centis / 100 % 60;
    format!("{hours}:{minutes:02}:{seconds:02}.{:02}", centis % 100)
}

/// Escapes override-block braces so text renders literally.
///
/// ```
/// # use squawk::export::ass::escape_text;
/// assert_eq!(escape_text("a {b} c"), "a \\{b\\} c");
/// ```
pub fn escape_text(text: &str) -> String {
    text.replace('{', "\\{").replace('}', "\\}")
}
