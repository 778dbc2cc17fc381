//! Windowed rendering engine for long node documents.
//!
//! Only the nodes inside the viewport (plus a buffer) are materialized;
//! the logical cursor and the document model are independent of what is
//! drawn.

/// Virtual cursor engine.
pub mod cursor;
/// Caret geometry.
pub mod metrics;
mod perf_trace;
/// Node materialization and render caching.
pub mod render;
/// Single-owner editing session.
pub mod session;
/// Trailing-edge throttle for scroll events.
pub mod throttle;
/// Visible-window math.
pub mod window;

pub use cursor::{point_to_position, position_to_pixel, CaretPixel, VirtualCursor};
pub use metrics::TextMetrics;
pub use render::{
    render_node, CacheStats, Fingerprint, RenderCache, RenderHandle, RenderHandles, RenderedNode,
    VisibleNode,
};
pub use session::{DocumentSession, ViewportSize};
pub use throttle::TrailingThrottle;
pub use window::{compute_window, VisibleWindow, WindowParams};

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `virtdoc=info`. Calling it again after a
/// subscriber is already installed is a no-op.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("virtdoc=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}
