//! Window and materialization perf tracing, split out of the session.

use crate::session::DocumentSession;
use std::time::Instant;
use tracing::info;

fn elapsed_ms(started: Instant) -> f32 {
    started.elapsed().as_secs_f32() * 1000.0
}

impl DocumentSession {
    pub(crate) fn trace_window(&self, started: Instant) {
        if !self.config.perf_log {
            return;
        }
        info!(
            target: "virtdoc_view::perf",
            event = "window_recompute",
            start = self.window.start,
            end = self.window.end,
            len = self.document.len(),
            recompute_ms = elapsed_ms(started),
            "visible window recomputed"
        );
    }

    pub(crate) fn trace_materialize(&mut self, started: Instant) {
        if !self.config.perf_log {
            return;
        }
        let stats = self.cache.take_stats();
        info!(
            target: "virtdoc_view::perf",
            event = "materialize",
            visible = self.window.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            cache_entries = self.cache.len(),
            materialize_ms = elapsed_ms(started),
            "visible nodes materialized"
        );
    }
}
