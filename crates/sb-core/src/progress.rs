//! Progress-reporting callback shared by the analyzer, mixer, and pipeline

/// A `(message) -> ()` callback for one-line progress reporting. Call sites
/// also log the same message via `log`, so a host may rely on either.
pub type ProgressFn<'a> = dyn Fn(&str) + 'a;

/// Emit a progress message to an optional callback and to the log.
pub fn report(progress: Option<&ProgressFn<'_>>, message: &str) {
    if let Some(cb) = progress {
        cb(message);
    }
    log::debug!("{message}");
}
