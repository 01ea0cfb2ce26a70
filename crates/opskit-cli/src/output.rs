use opskit_core::render::{self, Column};
use opskit_core::{OpsError, Result};
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render::table(headers, rows));
}

pub fn print_json_table(rows: &[Value], columns: &[Column]) {
    print!("{}", render::json_table(rows, columns));
}

pub fn print_kv(value: &Value, fields: &[(&str, &str)]) {
    print!("{}", render::kv_block(value, fields));
}

/// Ask before a destructive action. `--yes` skips the prompt; anything but
/// an explicit yes is a declined confirmation, which exits cleanly.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    match line.trim() {
        "y" | "Y" | "yes" | "YES" => Ok(()),
        _ => Err(OpsError::Declined),
    }
}

/// Poll timeouts are warnings, not failures: report and carry on.
pub fn warn_on_timeout(result: Result<()>) -> anyhow::Result<()> {
    match result {
        Err(err @ OpsError::PollTimeout { .. }) => {
            eprintln!("warning: {err}");
            Ok(())
        }
        other => Ok(other?),
    }
}
