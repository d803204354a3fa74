//! Configuration validation.
//!
//! Validates the config file before a run starts. Absent keys are fine here;
//! defaults and CLI overrides are applied later in `cli`.

use crate::domain::error::BarsimError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), BarsimError> {
    validate_data(config)?;
    validate_agent(config)?;
    validate_simulation(config)?;
    Ok(())
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), BarsimError> {
    if let Some(path) = config.get_string("data", "path") {
        if path.trim().is_empty() {
            return Err(BarsimError::invalid("data", "path", "path must not be empty"));
        }
    }
    for key in ["base_volume_column", "quote_volume_column"] {
        if let Some(name) = config.get_string("data", key) {
            if name.is_empty() {
                return Err(BarsimError::invalid("data", key, "column name must not be empty"));
            }
        }
    }
    Ok(())
}

fn validate_agent(config: &dyn ConfigPort) -> Result<(), BarsimError> {
    for key in ["buy_len", "sell_len"] {
        if config.get_string("agent", key).is_some() {
            let value = parse_int(config, "agent", key)?;
            if value <= 0 {
                return Err(BarsimError::invalid(
                    "agent",
                    key,
                    format!("{key} must be a positive integer"),
                ));
            }
        }
    }

    if let Some(raw) = config.get_string("agent", "amount") {
        let amount: f64 = raw
            .trim()
            .parse()
            .map_err(|_| BarsimError::invalid("agent", "amount", format!("not a number: {raw}")))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BarsimError::invalid(
                "agent",
                "amount",
                "amount must be a positive number",
            ));
        }
    }
    Ok(())
}

fn validate_simulation(config: &dyn ConfigPort) -> Result<(), BarsimError> {
    for key in ["max_iterations", "show_transactions"] {
        if config.get_string("simulation", key).is_some() {
            let value = parse_int(config, "simulation", key)?;
            if value < 0 {
                return Err(BarsimError::invalid(
                    "simulation",
                    key,
                    format!("{key} must be non-negative"),
                ));
            }
        }
    }
    Ok(())
}

fn parse_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<i64, BarsimError> {
    let raw = config.get_string(section, key).unwrap_or_default();
    raw.trim()
        .parse()
        .map_err(|_| BarsimError::invalid(section, key, format!("not an integer: {raw}")))
}
