/// Minimum output pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Smallest zoom a viewport accepts.
pub const MIN_ZOOM: f32 = 0.5;

/// Largest zoom a viewport accepts.
pub const MAX_ZOOM: f32 = 32.0;

/// The shared zoom slider is integer valued; slider value = zoom * multiplier.
pub const SLIDER_MULTIPLIER: f32 = 100.0;

/// Wheel delta units per doubling of the zoom (two notches of 120).
pub const WHEEL_ZOOM_STEP: f32 = 240.0;

/// Wheel delta reported for one notch of a standard mouse wheel.
pub const WHEEL_NOTCH_DELTA: f32 = 120.0;

/// Background behind every pane, `#999999`.
pub const BACKGROUND_RGB: [u8; 3] = [0x99, 0x99, 0x99];

/// Minimum number of images a comparison needs.
pub const MIN_IMAGE_COUNT: usize = 2;

/// Flicker interval implied by `--timer`.
pub const DEFAULT_FLICKER: &str = "1s";

/// Default external diff tool (ImageMagick).
pub const DEFAULT_DIFF_COMMAND: &str = "compare";

/// Highlight colour passed to the external diff tool.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "blue";

/// Fuzz tolerance passed to the external diff tool.
pub const DEFAULT_FUZZ: &str = "2%";
