use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use pdaforge_core::PdaError;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    if is_json() {
        let s = serde_json::to_string(value)?;
        println!("{s}");
        return Ok(());
    }
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Human-facing hint on stderr. Suppressed in JSON mode.
pub fn note(label: &str, msg: &str) {
    if is_json() {
        return;
    }
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = write!(err, "{label}");
    let _ = err.reset();
    let _ = writeln!(err, " {msg}");
}

#[derive(Debug, Serialize)]
struct ErrorOut<'a> {
    ok: bool,
    code: &'a str,
    error: String,
}

/// Report a failed command. In JSON mode the error is a JSON object on
/// stdout carrying the stable error code.
pub fn error(err: &anyhow::Error) {
    if is_json() {
        let code = err.downcast_ref::<PdaError>().map(PdaError::code).unwrap_or("error");
        let out = ErrorOut { ok: false, code, error: format!("{err:#}") };
        if let Ok(s) = serde_json::to_string(&out) {
            println!("{s}");
            return;
        }
    }
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "error:");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {err:#}");
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}
