//! Root crate facade for the virtdoc document model and windowed renderer.

pub use virtdoc_core::{
    config, constants, document, error, models, text, CursorPosition, DocEditDelta, DocError,
    Document, FormulaInsert, Node, NodeId, NodeKind, NodeSpec, Selection, ViewConfig,
};
pub use virtdoc_view::{
    compute_window, cursor, init_tracing, metrics, render, session, throttle, window,
    DocumentSession, RenderedNode, TextMetrics, TrailingThrottle, ViewportSize, VirtualCursor,
    VisibleNode, VisibleWindow, WindowParams,
};
