use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use pwalink_core::response::CallbackResult;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Print a callback result as pretty JSON or as a colored human line.
pub fn print_result(result: &CallbackResult) -> anyhow::Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(if result.is_success() {
        Color::Green
    } else {
        Color::Red
    }));
    out.set_color(&spec)?;
    write!(out, "{}", if result.is_success() { "ok" } else { "failed" })?;
    out.reset()?;
    writeln!(out, "  {result}")?;
    Ok(())
}
