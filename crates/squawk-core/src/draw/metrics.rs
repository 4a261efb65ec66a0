//! Fixed layout constants shared by the wrapper and the box geometry.

/// Font size in pixels, also the size of one width unit.
pub const FONT_SIZE: i64 = 56;

/// Left margin of every styled row.
pub const MARGIN_L: i64 = 20;

/// Right margin of every styled row.
pub const MARGIN_R: i64 = 20;

/// Vertical margin of every styled row.
pub const MARGIN_V: i64 = 20;

/// Height of one rendered line inside a background box: `floor(56 × 1.10)`.
pub const LINE_HEIGHT: i64 = FONT_SIZE * 110 / 100;

/// Vertical padding between the text and the box edge.
pub const PAD_Y: i64 = 15;

/// Horizontal padding between the text and the box edge.
pub const PAD_X: i64 = 20;

/// Requested corner radius of a background box.
pub const CORNER_RADIUS: i64 = 18;

/// Control point distance for approximating a quarter circle with a cubic Bézier.
pub const KAPPA: f64 = 0.552_284_749_8;

/// Lower bound of the wrap width ratio.
pub const MIN_WRAP_RATIO: f64 = 0.10;

/// Upper bound of the wrap width ratio.
pub const MAX_WRAP_RATIO: f64 = 1.0;
