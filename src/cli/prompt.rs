use crate::error::{AppError, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::net::IpAddr;

/// Address looked up when the user gives none.
pub const DEFAULT_IP: &str = "8.8.8.8";

/// Parses user input as an IPv4 or IPv6 address, falling back to
/// [`DEFAULT_IP`] when the input is blank.
pub fn resolve_ip(input: &str) -> Result<IpAddr> {
    let input = input.trim();
    let input = if input.is_empty() { DEFAULT_IP } else { input };
    input
        .parse::<IpAddr>()
        .map_err(|_| AppError::Cli(format!("'{}' is not a valid IP address", input)))
}

/// Asks for an address on the terminal, re-prompting until it parses.
pub fn prompt_ip() -> Result<IpAddr> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("IP address to look up")
        .default(DEFAULT_IP.to_string())
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            resolve_ip(s).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    resolve_ip(&input)
}
