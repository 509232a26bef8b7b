// ABOUTME: Parsing of the boolean-ish debug_mode setting.
// ABOUTME: Accepts true/false/1/0 in any case; anything else is rejected.

use super::ConfigError;

/// Parse the raw `debug_mode` value. Unset or blank means `false`.
pub fn parse_debug_mode(raw: Option<&str>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        _ => Err(ConfigError::InvalidDebugMode(raw.to_string())),
    }
}
