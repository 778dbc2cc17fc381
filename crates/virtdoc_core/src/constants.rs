//! Shared constants used across virtdoc crates.

/// Default fixed height of one document node, in pixels.
pub const DEFAULT_NODE_HEIGHT: f32 = 30.0;

/// Default number of nodes materialized above and below the viewport.
pub const DEFAULT_WINDOW_BUFFER: usize = 5;

/// Default number of leading content chars hashed into a cache fingerprint.
pub const DEFAULT_FINGERPRINT_CHARS: usize = 50;

/// Default advance of one display column, in pixels.
pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

/// Default trailing-edge throttle window for scroll events, in milliseconds.
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 16;

/// Default upper bound on render cache entries.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 4096;

/// Default viewport size used before the host reports a real one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
/// Default viewport height used before the host reports a real one.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

/// Source text given to freshly inserted formula nodes.
pub const DEFAULT_FORMULA_CONTENT: &str = "f(x) = ?";

/// Heading levels are clamped into `1..=MAX_HEADING_LEVEL`.
pub const MAX_HEADING_LEVEL: u8 = 3;
