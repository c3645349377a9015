use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;

pub trait Checkpoint {
    fn wait(&self, message: &str) -> Result<()>;
}

pub struct ConsolePrompt;

impl Checkpoint for ConsolePrompt {
    // Any input advances, including an empty line.
    fn wait(&self, message: &str) -> Result<()> {
        print!("{message}");
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation input")?;
        Ok(())
    }
}

pub struct AutoResume;

impl Checkpoint for AutoResume {
    fn wait(&self, message: &str) -> Result<()> {
        info!(action = "skip", component = "checkpoint", prompt = message, "Checkpoint auto-resumed");
        Ok(())
    }
}
