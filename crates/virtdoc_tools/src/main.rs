//! Headless driver for the virtualized document engine.
//!
//! Builds a generated document, replays a throttled scroll sweep through a
//! `DocumentSession`, then inserts and deletes a formula to exercise the
//! split/merge path.
//!
//! # Usage
//!
//! ```bash
//! # 15000 nodes (default)
//! cargo run -p virtdoc_tools --bin virtdoc-demo
//!
//! # Bigger document, reproducible content, perf events on
//! VIRTDOC_PERF_LOG=1 RUST_LOG=virtdoc_view=info \
//!     cargo run -p virtdoc_tools --bin virtdoc-demo -- --nodes 100000 --seed 7
//!
//! # Geometry from a TOML file (missing keys keep their defaults)
//! cargo run -p virtdoc_tools --bin virtdoc-demo -- --config view.toml
//! ```

use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use virtdoc_core::{NodeSpec, ViewConfig};
use virtdoc_view::{init_tracing, DocumentSession};

#[derive(Parser)]
#[command(
    name = "virtdoc-demo",
    about = "Drive a virtualized document session headlessly"
)]
struct Args {
    /// Number of nodes to generate
    #[arg(short, long, default_value = "15000")]
    nodes: usize,

    /// Seed for generated content and scroll jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Number of scroll events to replay
    #[arg(long, default_value = "400")]
    steps: usize,

    /// Average scroll distance per event, in pixels
    #[arg(long, default_value = "90")]
    step_px: f32,

    /// Simulated time between scroll events, in milliseconds
    #[arg(long, default_value = "4")]
    event_interval_ms: u64,

    /// Log a status line every N scroll events
    #[arg(long, default_value = "50")]
    progress_interval: usize,

    /// TOML file with view settings; `VIRTDOC_*` env vars are used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,
}

const SENTENCES: &[&str] = &[
    "with some sample text to demonstrate the virtualized editor.",
    "covers the windowing math used for long documents.",
    "is materialized only while it sits inside the viewport.",
    "keeps its identity while neighbours are split and merged.",
    "mixes ASCII with wide glyphs like 数式 and emoji 🙂.",
];

const FORMULAS: &[&str] = &["E = mc^2", "a^2 + b^2 = c^2", "f(x) = x^2", "e^{iπ} + 1 = 0"];

/// Parse view settings from TOML; absent keys take their defaults.
fn parse_config(raw: &str) -> Result<ViewConfig, toml::de::Error> {
    toml::from_str::<ViewConfig>(raw).map(ViewConfig::sanitized)
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let config = parse_config(&raw)?;
            info!("loaded view config from {}", path.display());
            Ok(config)
        }
        None => Ok(ViewConfig::from_env()),
    }
}

fn generate_document(rng: &mut impl Rng, count: usize) -> Vec<NodeSpec> {
    (0..count)
        .map(|i| {
            if i % 50 == 0 {
                let level = rng.gen_range(1..=3);
                NodeSpec::heading(level, format!("Section {}", i / 50 + 1))
            } else if i % 7 == 0 {
                let formula = FORMULAS.choose(rng).copied().unwrap_or("x = 1");
                NodeSpec::formula(formula)
            } else {
                let sentence = SENTENCES.choose(rng).copied().unwrap_or_default();
                NodeSpec::text(format!("This is paragraph {} {}", i + 1, sentence))
            }
        })
        .collect()
}

fn scroll_sweep(session: &mut DocumentSession, rng: &mut impl Rng, args: &Args) {
    let base = Instant::now();
    let interval = Duration::from_millis(args.event_interval_ms);
    let mut offset = 0.0f32;
    let mut applied = 0usize;
    let mut materialized = 0usize;

    for step in 0..args.steps {
        offset += args.step_px * rng.gen_range(0.5..1.5);
        let now = base + interval * step as u32;
        let ran = session.on_scroll(offset, now);
        let flushed = session.tick(now);
        if ran || flushed {
            applied += 1;
            materialized += session.visible_nodes().len();
        }
        if args.progress_interval > 0 && (step + 1) % args.progress_interval == 0 {
            info!("step {}/{}: {}", step + 1, args.steps, session.status_line());
        }
    }

    if let Some(deadline) = session.next_tick_deadline() {
        if session.tick(deadline) {
            applied += 1;
            materialized += session.visible_nodes().len();
        }
    }

    info!(
        events = args.steps,
        applied,
        materialized,
        cache_entries = session.cache_len(),
        "scroll sweep finished at offset {:.0}",
        session.scroll_offset()
    );
}

fn split_and_merge(session: &mut DocumentSession, rng: &mut impl Rng) {
    let window = session.window();
    let text_index = session
        .visible_nodes()
        .iter()
        .filter(|visible| visible.node.is_text())
        .map(|visible| visible.index)
        .choose(rng);
    let Some(index) = text_index else {
        warn!("no text node inside window {:?}; skipping edit", window.range());
        return;
    };

    let before = session.document().len();
    let original = session
        .document()
        .node_at(index)
        .map(|node| node.content().to_string())
        .unwrap_or_default();
    // Interior click so both split fragments are non-empty.
    let char_width = session.config().char_width;
    let width = original.chars().count() as f32 * char_width;
    let click_x = rng.gen_range(char_width..(width - char_width).max(char_width + 1.0));
    let position = session.click_node(index, click_x);
    let formula = session.insert_formula_at_cursor();
    info!(
        "inserted formula {} at {:?}; document grew {} -> {}",
        formula,
        position,
        before,
        session.document().len()
    );

    if !session.delete_node(formula) {
        warn!("formula {} vanished before delete", formula);
        return;
    }
    let restored = session
        .document()
        .node_at(index)
        .map(|node| node.content() == original)
        .unwrap_or(false);
    if session.document().len() == before && restored {
        info!("delete merged the split back into node {}", index);
    } else {
        warn!(
            len = session.document().len(),
            expected = before,
            "split/merge did not restore the original node"
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let specs = generate_document(&mut rng, args.nodes);
    let mut session = DocumentSession::new(specs, config);
    info!(
        "built {} nodes in {:.2}ms; total height {:.0}px",
        session.document().len(),
        start.elapsed().as_secs_f64() * 1000.0,
        session.total_height()
    );

    scroll_sweep(&mut session, &mut rng, &args);
    split_and_merge(&mut session, &mut rng);

    session.click_background();
    let caret = session.caret_pixel();
    info!(
        "caret parked at end of document ({:.0}, {:.0}); {}",
        caret.x,
        caret.y,
        session.status_line()
    );
    info!("done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_keys() {
        let config = parse_config("node_height = 40.0\nwindow_buffer = 8\n").expect("parse");
        assert_eq!(config.node_height, 40.0);
        assert_eq!(config.window_buffer, 8);
        assert_eq!(config.char_width, ViewConfig::default().char_width);
        assert_eq!(config.scroll_throttle_ms, ViewConfig::default().scroll_throttle_ms);
        assert!(!config.perf_log);
    }

    #[test]
    fn parsed_config_is_sanitized() {
        let config = parse_config("node_height = 0.25\nfingerprint_chars = 0\nperf_log = true\n")
            .expect("parse");
        assert_eq!(config.node_height, 1.0);
        assert_eq!(config.fingerprint_chars, 1);
        assert!(config.perf_log);
    }

    #[test]
    fn mistyped_config_is_rejected() {
        assert!(parse_config("node_height = \"tall\"\n").is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let missing = Path::new("/nonexistent/virtdoc/view.toml");
        assert!(load_config(Some(missing)).is_err());
    }
}
