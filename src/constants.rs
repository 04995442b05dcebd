/// Page wiring, drawing proportions and pointer tuning for the canvas wheel.
///
/// Sizes ending in `_FRAC` are fractions of the wheel radius unless noted,
/// so the drawing scales with the canvas backing store.
// DOM hooks
pub const DEFAULT_CANVAS_ID: &str = "wheel-canvas";
pub const CONFIG_ATTRIBUTE: &str = "data-wheel-config";
pub const RESULT_ELEMENT_ID: &str = "wheel-result";
pub const SPIN_COMPLETE_EVENT: &str = "wheel:spin-complete";
pub const HIDDEN_CLASS: &str = "hidden";

// Pointer travel (canvas px) before a press stops being a tap
pub const TAP_SLOP_PX: f32 = 6.0;

// Wheel placement
pub const WHEEL_MARGIN_FRAC: f64 = 0.12; // of half the shorter canvas side
pub const HUB_RADIUS_FRAC: f64 = 0.09;
pub const RIM_WIDTH_FRAC: f64 = 0.025;
pub const LABEL_RADIUS_FRAC: f64 = 0.62;
pub const LABEL_FONT_FRAC: f64 = 0.075;
pub const LABEL_MAX_CHARS: usize = 14;

// Pointer (drawn above the wheel at 12 o'clock)
pub const POINTER_LENGTH_FRAC: f64 = 0.14;
pub const POINTER_HALF_WIDTH_FRAC: f64 = 0.05;
pub const POINTER_MAX_TILT_DEG: f64 = 22.0;
pub const KICK_DECAY_PER_SEC: f64 = 10.0; // exponential, 1/e in 100ms
pub const KICK_FLOOR: f64 = 1e-3;

// Longest frame step fed to the pointer decay (tab switches, breakpoints)
pub const MAX_FRAME_DT_SEC: f64 = 0.1;

// Colors
pub const SEGMENT_PALETTE: &[&str] = &[
    "#f25f5c", "#ffe066", "#247ba0", "#70c1b3", "#9b5de5", "#f15bb5",
];
pub const BACKGROUND_COLOR: &str = "#0f1724";
pub const RIM_COLOR: &str = "#e9eef5";
pub const HUB_COLOR: &str = "#1b2638";
pub const LABEL_COLOR: &str = "#10151f";
pub const POINTER_COLOR: &str = "#fdfdfd";
pub const POINTER_OUTLINE_COLOR: &str = "#1b2638";
