//! Large-prompt smoke test.
//!
//! Sends one 60 KiB user message to the chat-completions endpoint and prints
//! the first 200 characters of the reply. Always exits 0; the printed marker
//! carries the verdict.
//!
//! Usage:
//!   cargo run --bin large_prompt_smoke
//!   CHAT_SMOKE_ENDPOINT=http://127.0.0.1:9000/v1/chat/completions cargo run --bin large_prompt_smoke

use chat_smoke::payload::Scenario;

fn main() -> anyhow::Result<()> {
    chat_smoke::logging::init().map_err(|e| anyhow::anyhow!(e))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    chat_smoke::run_from_env(Scenario::LargePrompt, &mut out)?;
    Ok(())
}
