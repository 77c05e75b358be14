use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder.interact().map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`; returns its index
pub fn prompt_select(prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}

/// Prompt for a TCP port, asking again until the input parses
pub fn prompt_port(prompt: &str, default: u16, output: &Output) -> Result<u16> {
    loop {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| eyre!("Failed to read input: {}", e))?;

        match parse_port(&input) {
            Some(port) => return Ok(port),
            None => output.error("Invalid input. Please enter a port between 1 and 65535."),
        }
    }
}

fn parse_port(input: &str) -> Option<u16> {
    input.trim().parse::<u16>().ok().filter(|p| *p > 0)
}
