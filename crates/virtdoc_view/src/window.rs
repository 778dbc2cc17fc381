//! Visible-window math for fixed-height node virtualization.
//!
//! Pure: the same inputs always produce the same range.

use std::ops::Range;
use tracing::debug;
use virtdoc_core::DocError;

/// Inputs to [`compute_window`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowParams {
    /// Pixels scrolled from the top of the content.
    pub scroll_offset: f32,
    pub viewport_height: f32,
    /// Fixed height of every node, in pixels.
    pub node_height: f32,
    /// Extra nodes materialized on each side of the viewport.
    pub buffer: usize,
    /// Document length in nodes.
    pub len: usize,
}

/// Contiguous `start..end` index range of nodes to materialize.
///
/// Always satisfies `start <= end <= len` for the length it was built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    /// Validate raw bounds against a document length.
    ///
    /// # Errors
    /// [`DocError::OutOfRange`] when `end > len`, and
    /// [`DocError::DegenerateRange`] when `end < start`.
    pub fn checked(start: usize, end: usize, len: usize) -> Result<Self, DocError> {
        if end > len {
            return Err(DocError::OutOfRange { index: end, len });
        }
        if end < start {
            return Err(DocError::DegenerateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Force raw bounds into `start <= end <= len`.
    pub fn clamped(start: usize, end: usize, len: usize) -> Self {
        let start = start.min(len);
        let end = end.min(len).max(start);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn non_negative(value: f32) -> f64 {
    if value.is_finite() {
        f64::from(value.max(0.0))
    } else {
        0.0
    }
}

/// Compute the node range covering the viewport plus `buffer` on each side.
///
/// ```text
/// start = max(0, floor(scroll / node_height) - buffer)
/// end   = min(len, ceil((scroll + viewport) / node_height) + buffer)
/// ```
///
/// Negative or non-finite scroll and viewport values are treated as zero;
/// a node height that is not a positive finite number is treated as one
/// pixel. A scroll offset past the end of the content
/// yields an empty window at `len`.
pub fn compute_window(params: WindowParams) -> VisibleWindow {
    let node_height = if params.node_height.is_finite() && params.node_height > 0.0 {
        f64::from(params.node_height)
    } else {
        1.0
    };
    let scroll = non_negative(params.scroll_offset);
    let viewport = non_negative(params.viewport_height);

    let first = (scroll / node_height).floor() as usize;
    let last = ((scroll + viewport) / node_height).ceil() as usize;
    let start = first.saturating_sub(params.buffer);
    let end = last.saturating_add(params.buffer).min(params.len);

    match VisibleWindow::checked(start, end, params.len) {
        Ok(window) => window,
        Err(err) => {
            debug!(
                target: "virtdoc_view::window",
                error = %err,
                kind = err.kind(),
                "clamping visible window"
            );
            VisibleWindow::clamped(start, end, params.len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(scroll_offset: f32, viewport_height: f32, len: usize) -> WindowParams {
        WindowParams {
            scroll_offset,
            viewport_height,
            node_height: 40.0,
            buffer: 8,
            len,
        }
    }

    #[test]
    fn window_matches_formula_with_buffer() {
        struct Case {
            scroll: f32,
            viewport: f32,
            len: usize,
            expected: VisibleWindow,
        }

        let cases = [
            Case {
                scroll: 0.0,
                viewport: 600.0,
                len: 15_000,
                expected: VisibleWindow { start: 0, end: 23 },
            },
            Case {
                scroll: 4_000.0,
                viewport: 600.0,
                len: 15_000,
                expected: VisibleWindow { start: 92, end: 123 },
            },
            Case {
                scroll: 4_020.0,
                viewport: 600.0,
                len: 15_000,
                expected: VisibleWindow { start: 92, end: 124 },
            },
            Case {
                scroll: 0.0,
                viewport: 600.0,
                len: 10,
                expected: VisibleWindow { start: 0, end: 10 },
            },
        ];

        for case in cases {
            assert_eq!(
                compute_window(params(case.scroll, case.viewport, case.len)),
                case.expected,
                "scroll={} viewport={}",
                case.scroll,
                case.viewport
            );
        }
    }

    #[test]
    fn window_is_deterministic() {
        let p = params(1_234.5, 321.0, 500);
        assert_eq!(compute_window(p), compute_window(p));
    }

    #[test]
    fn pathological_inputs_clamp_instead_of_failing() {
        let past_end = compute_window(params(1_000_000.0, 600.0, 10));
        assert_eq!(past_end, VisibleWindow { start: 10, end: 10 });
        assert!(past_end.is_empty());

        let negative = compute_window(params(-500.0, -20.0, 10));
        assert_eq!(negative, VisibleWindow { start: 0, end: 8 });

        let nan = compute_window(WindowParams {
            scroll_offset: f32::NAN,
            viewport_height: f32::INFINITY,
            node_height: 0.0,
            buffer: 0,
            len: 4,
        });
        assert_eq!(nan, VisibleWindow { start: 0, end: 0 });

        let empty_doc = compute_window(params(0.0, 600.0, 0));
        assert_eq!(empty_doc, VisibleWindow::default());
    }

    #[test]
    fn fractional_node_height_follows_formula() {
        let window = compute_window(WindowParams {
            scroll_offset: 10.0,
            viewport_height: 2.0,
            node_height: 0.5,
            buffer: 0,
            len: 100,
        });
        assert_eq!(window, VisibleWindow { start: 20, end: 24 });

        let negative_height = compute_window(WindowParams {
            scroll_offset: 10.0,
            viewport_height: 2.0,
            node_height: -3.0,
            buffer: 0,
            len: 100,
        });
        assert_eq!(negative_height, VisibleWindow { start: 10, end: 12 });
    }

    #[test]
    fn window_covers_every_intersecting_node() {
        let node_height = 30.0f32;
        let len = 200usize;
        for buffer in [0usize, 3] {
            for scroll_step in 0..=260 {
                let scroll = scroll_step as f32 * 23.5;
                for viewport in [0.0f32, 1.0, 29.0, 30.0, 31.0, 450.0, 7_000.0] {
                    let window = compute_window(WindowParams {
                        scroll_offset: scroll,
                        viewport_height: viewport,
                        node_height,
                        buffer,
                        len,
                    });
                    assert!(window.start <= window.end && window.end <= len);
                    for index in 0..len {
                        let top = index as f32 * node_height;
                        let bottom = top + node_height;
                        if top < scroll + viewport && bottom > scroll {
                            assert!(
                                window.contains(index),
                                "gap at node {} for scroll={} viewport={} window={:?}",
                                index,
                                scroll,
                                viewport,
                                window
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn checked_reports_taxonomy() {
        assert_eq!(
            VisibleWindow::checked(0, 12, 10),
            Err(DocError::OutOfRange { index: 12, len: 10 })
        );
        assert_eq!(
            VisibleWindow::checked(7, 3, 10),
            Err(DocError::DegenerateRange { start: 7, end: 3 })
        );
        assert_eq!(
            VisibleWindow::clamped(7, 3, 10),
            VisibleWindow { start: 7, end: 7 }
        );
    }
}
