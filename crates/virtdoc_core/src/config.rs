//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CHAR_WIDTH, DEFAULT_FINGERPRINT_CHARS, DEFAULT_NODE_HEIGHT,
    DEFAULT_SCROLL_THROTTLE_MS, DEFAULT_WINDOW_BUFFER,
};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Geometry and tuning knobs for the windowed renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Fixed height of every node, in pixels.
    pub node_height: f32,
    /// Extra nodes materialized above and below the viewport.
    pub window_buffer: usize,
    /// Leading content chars folded into a cache fingerprint.
    pub fingerprint_chars: usize,
    /// Advance of one display column, in pixels.
    pub char_width: f32,
    pub scroll_throttle_ms: u64,
    pub cache_max_entries: usize,
    /// Emit per-frame timing events on the `virtdoc_view::perf` target.
    pub perf_log: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            node_height: DEFAULT_NODE_HEIGHT,
            window_buffer: DEFAULT_WINDOW_BUFFER,
            fingerprint_chars: DEFAULT_FINGERPRINT_CHARS,
            char_width: DEFAULT_CHAR_WIDTH,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            perf_log: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}

fn finite_at_least(value: f32, min: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.max(min)
    } else {
        fallback
    }
}

impl ViewConfig {
    /// Load configuration from `VIRTDOC_*` environment variables.
    ///
    /// # Returns
    /// A sanitized [`ViewConfig`] with defaults applied when env vars are
    /// missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            node_height: env_parsed("VIRTDOC_NODE_HEIGHT").unwrap_or(defaults.node_height),
            window_buffer: env_parsed("VIRTDOC_WINDOW_BUFFER").unwrap_or(defaults.window_buffer),
            fingerprint_chars: env_parsed("VIRTDOC_FINGERPRINT_CHARS")
                .unwrap_or(defaults.fingerprint_chars),
            char_width: env_parsed("VIRTDOC_CHAR_WIDTH").unwrap_or(defaults.char_width),
            scroll_throttle_ms: env_parsed("VIRTDOC_SCROLL_THROTTLE_MS")
                .unwrap_or(defaults.scroll_throttle_ms),
            cache_max_entries: env_parsed("VIRTDOC_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            perf_log: env_flag_enabled("VIRTDOC_PERF_LOG"),
        }
        .sanitized()
    }

    /// Clamp values that would make window or caret math degenerate.
    ///
    /// Node height and char width stay at least one pixel; non-finite values
    /// fall back to the defaults.
    pub fn sanitized(self) -> Self {
        Self {
            node_height: finite_at_least(self.node_height, 1.0, DEFAULT_NODE_HEIGHT),
            char_width: finite_at_least(self.char_width, 1.0, DEFAULT_CHAR_WIDTH),
            fingerprint_chars: self.fingerprint_chars.max(1),
            cache_max_entries: self.cache_max_entries.max(1),
            ..self
        }
    }

    /// Scroll throttle window as a [`Duration`].
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    /// Restores a variable's previous value when dropped.
    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvGuard {
        #[allow(unused_unsafe)]
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var(key).ok();
            // SAFETY: env mutation in this module is serialized by `env_lock`.
            unsafe { env::set_var(key, value) };
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        #[allow(unused_unsafe)]
        fn drop(&mut self) {
            // SAFETY: env mutation in this module is serialized by `env_lock`.
            unsafe {
                match self.previous.as_deref() {
                    Some(previous) => env::set_var(self.key, previous),
                    None => env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn from_env_reads_overrides_and_ignores_garbage() {
        let _lock = env_lock().lock().expect("env lock");
        let _height = EnvGuard::set("VIRTDOC_NODE_HEIGHT", "40");
        let _buffer = EnvGuard::set("VIRTDOC_WINDOW_BUFFER", "8");
        let _chars = EnvGuard::set("VIRTDOC_FINGERPRINT_CHARS", "not-a-number");
        let _perf = EnvGuard::set("VIRTDOC_PERF_LOG", "on");

        let config = ViewConfig::from_env();
        assert_eq!(config.node_height, 40.0);
        assert_eq!(config.window_buffer, 8);
        assert_eq!(config.fingerprint_chars, DEFAULT_FINGERPRINT_CHARS);
        assert!(config.perf_log);
    }

    #[test]
    fn sanitized_clamps_degenerate_geometry() {
        let config = ViewConfig {
            node_height: 0.0,
            char_width: f32::NAN,
            fingerprint_chars: 0,
            cache_max_entries: 0,
            ..ViewConfig::default()
        }
        .sanitized();
        assert_eq!(config.node_height, 1.0);
        assert_eq!(config.char_width, DEFAULT_CHAR_WIDTH);
        assert_eq!(config.fingerprint_chars, 1);
        assert_eq!(config.cache_max_entries, 1);
    }
}
