/// Spin and input tuning defaults.
///
/// Apart from the angle unit and the two capacity/ceiling limits, every value is the
/// default for a `WheelConfig` field, so feel can be tuned per wheel.

// Full turn in degrees; the unit every angle in the engine is expressed in.
pub const FULL_TURN_DEG: f64 = 360.0;

// Spin animation
pub const DEFAULT_SPIN_DURATION_SEC: f64 = 4.0;
pub const DEFAULT_MIN_ROTATIONS: u32 = 5;
pub const DEFAULT_MAX_ROTATIONS: u32 = 8;

// Landing jitter as a fraction of one segment angle (k)
pub const DEFAULT_JITTER_FACTOR: f64 = 0.3;
// Hard ceiling for k; keeps |jitter| <= 0.225 * segment angle
pub const MAX_JITTER_FACTOR: f64 = 0.45;

// Peg feedback: distance from a segment boundary that still counts as a bump
pub const DEFAULT_PEG_EPSILON_DEG: f64 = 1.5;

// Drag / fling
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 2.0; // degrees per normalised frame
pub const DEFAULT_FRAME_RATE_BASIS: f64 = 60.0; // frames per second
pub const DEFAULT_DRAG_HISTORY_DEPTH: usize = 5;
// Inline capacity of the drag history; deeper histories spill to the heap
pub const DRAG_HISTORY_INLINE: usize = 8;

// Post-spin reset
pub const DEFAULT_RESET_DELAY_SEC: f64 = 1.5;
pub const DEFAULT_RESET_DURATION_SEC: f64 = 0.6;

// Weight given to a segment when none is specified
pub const DEFAULT_SEGMENT_WEIGHT: f64 = 1.0;
