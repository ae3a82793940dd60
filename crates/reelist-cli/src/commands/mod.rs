pub mod add;
pub mod config;
pub mod list;
pub mod remove;
pub mod search;

use crate::output::{Output, OutputFormat};
use indicatif::{ProgressBar, ProgressDrawTarget};
use std::time::Duration;

/// Spinner shown while a catalog request is in flight. Hidden when output is
/// quiet or machine-readable.
pub(crate) fn spinner(output: &Output, msg: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if output.is_quiet() || output.format() != OutputFormat::Human {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
