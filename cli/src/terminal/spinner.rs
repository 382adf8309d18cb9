use std::future::Future;

use indicatif::ProgressStyle;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

pub const SPINNER_TARGET: &str = "fleetdash::spinner";

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// Shows a spinner with `message` while `future` runs.
pub async fn run<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let span = info_span!(target: SPINNER_TARGET, "round_trip", indicatif.pb_show = true);
    span.pb_set_message(message);
    future.instrument(span).await
}
