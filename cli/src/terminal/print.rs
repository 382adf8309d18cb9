use std::{cell::Cell, fmt::Display};

use crate::terminal::{banner, colors};
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

/// Events on this target are written verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "fleetdash::print";
/// `[+]` confirmations after a write went through.
pub const STATUS_TARGET: &str = "fleetdash::status";

thread_local! {
    /// Key column of [`aligned_line`], set per block by [`align_keys`].
    static KEY_WIDTH: Cell<usize> = const { Cell::new(0) }
}

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Status line prefixed with `[+]`.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: $crate::terminal::print::STATUS_TARGET, $($arg)*)
    };
}

/// Values printed in key/value lines; plain text takes the given color.
pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// `fill` repeated to [`TOTAL_WIDTH`] columns with `title` centered in it.
fn rule(fill: &str, title: Option<&ColoredString>) -> String {
    let title_width: usize = title.map_or(0, |t| UnicodeWidthStr::width(&**t));
    let dashes: usize = TOTAL_WIDTH.saturating_sub(title_width);
    let left: usize = dashes / 2;

    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        title.map(ToString::to_string).unwrap_or_default(),
        fill.repeat(dashes - left).color(colors::SEPARATOR)
    )
}

/// Dots and colon between a key and its value, padded to `width` columns.
fn leader(key: &str, width: usize) -> String {
    let dots: usize = (width + 1).saturating_sub(UnicodeWidthStr::width(key));
    format!(
        "{}{}",
        ".".repeat(dots).color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

fn key_width<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let title: ColoredString = format!("⟦ FLEETDASH v{} ⟧", env!("CARGO_PKG_VERSION"))
        .color(colors::PRIMARY)
        .bold();
    print(&rule("═", Some(&title)));
    banner::print();
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: ColoredString = format!("⟦ {} ⟧", msg.to_uppercase()).color(colors::PRIMARY);
    print(&rule("─", Some(&title)));
}

/// Closing line of a listing: a heavy rule and a centered one-line total.
pub fn summary(msg: &str) {
    print(&rule("═", None));
    let pad: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

/// Sets the key column width used by [`aligned_line`] to fit `keys`.
pub fn align_keys(keys: &[&str]) {
    KEY_WIDTH.set(key_width(keys.iter().copied()));
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    note(format!(
        "{}{} {}",
        key.color(colors::PRIMARY),
        leader(key, KEY_WIDTH.get()),
        value
    ));
}

/// Single `>`-prefixed line.
pub fn note<T: AsRef<str>>(msg: T) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

/// `[idx] name` line opening a numbered record.
pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

/// Fields of the record opened by [`tree_head`], one branch each.
pub fn as_tree_one_level(fields: Vec<(String, ColoredString)>) {
    let width: usize = key_width(fields.iter().map(|(key, _)| key.as_str()));
    let last: usize = fields.len().saturating_sub(1);

    for (i, (key, value)) in fields.iter().enumerate() {
        let branch: &str = if i == last { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            leader(key, width),
            value
        ));
    }
}

const NO_RESULTS: &str = r#"
     _  _  ___    ___ ___ ___ ___  ___ ___  ___
    | \| |/ _ \  | _ \ __/ __/ _ \| _ \   \/ __|
    | .` | (_) | |   / _| (_| (_) |   / |) \__ \
    |_|\_|\___/  |_|_\___\___\___/|_|_\___/|___/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}

pub fn end_of_program() {
    print(&rule("═", None));
}
