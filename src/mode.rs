//! Runtime mode configuration.
//!
//! Debug and preview flags are passed explicitly into each cache instead
//! of being read from ambient globals, so callers (and tests) control
//! exactly which bypasses are active.

/// Environment variable that enables preview mode in debug builds.
pub const PREVIEW_ENV: &str = "SQUIRREL_PREVIEW";

/// Execution-mode flags consumed by [`SecretCache`](crate::cache::SecretCache).
///
/// `debug` suppresses persistence on `set` so development runs never write
/// to the real store. `preview` suppresses store reads on `reload`, for
/// design-time or sandboxed contexts where touching the store is unwanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeMode {
    pub debug: bool,
    pub preview: bool,
}

impl RuntimeMode {
    /// Production mode: persistence and store reads both active.
    pub const RELEASE: Self = Self {
        debug: false,
        preview: false,
    };

    /// Development mode: store reads active, persistence skipped.
    pub const DEBUG: Self = Self {
        debug: true,
        preview: false,
    };

    /// Preview mode: store never read, persistence skipped.
    pub const PREVIEW: Self = Self {
        debug: true,
        preview: true,
    };

    /// Detect the mode from the build profile and process environment.
    ///
    /// `debug` follows `cfg!(debug_assertions)`. `preview` requires a debug
    /// build with `SQUIRREL_PREVIEW=1` set; release builds never report
    /// preview mode.
    pub fn detect() -> Self {
        let debug = cfg!(debug_assertions);
        let preview = debug
            && std::env::var(PREVIEW_ENV)
                .map(|v| v == "1")
                .unwrap_or(false);
        Self { debug, preview }
    }
}
