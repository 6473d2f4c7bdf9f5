//! Large tool-context smoke test.
//!
//! Sends a user message plus 50 synthetic tool definitions and prints the
//! length of the reply. Always exits 0; the printed marker carries the verdict.
//!
//! Usage:
//!   cargo run --bin large_tools_smoke

use chat_smoke::payload::Scenario;

fn main() -> anyhow::Result<()> {
    chat_smoke::logging::init().map_err(|e| anyhow::anyhow!(e))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    chat_smoke::run_from_env(Scenario::LargeTools, &mut out)?;
    Ok(())
}
