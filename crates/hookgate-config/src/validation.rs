// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, positive limits, and
//! well-formed allowlist entries.

use crate::diagnostic::ConfigError;
use crate::model::HookgateConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HookgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate bind host is not empty and looks like an IP or hostname
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` is not one of: {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Throttle parameters must describe a usable window
    if config.throttle.window_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "throttle.window_secs must be at least 1".to_string(),
        });
    }
    if config.throttle.max_requests == 0 {
        errors.push(ConfigError::Validation {
            message: "throttle.max_requests must be at least 1".to_string(),
        });
    }

    // Egress timeouts: default must fit under the ceiling
    if config.egress.max_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "egress.max_timeout_ms must be at least 1".to_string(),
        });
    }
    if config.egress.default_timeout_ms > config.egress.max_timeout_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "egress.default_timeout_ms ({}) exceeds egress.max_timeout_ms ({})",
                config.egress.default_timeout_ms, config.egress.max_timeout_ms
            ),
        });
    }

    // Allowlist entries are bare lowercase hostnames, not URLs
    for (i, domain) in config.egress.allowed_domains.iter().enumerate() {
        let d = domain.trim();
        if d.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("egress.allowed_domains[{i}] must not be empty"),
            });
        } else if d.contains('/') || d.contains("://") {
            errors.push(ConfigError::Validation {
                message: format!(
                    "egress.allowed_domains[{i}] `{d}` must be a bare hostname, not a URL"
                ),
            });
        }
    }

    // Private-IP exemptions must parse as IP addresses
    for (i, ip) in config.egress.allowed_private_ips.iter().enumerate() {
        if ip.parse::<std::net::IpAddr>().is_err() {
            errors.push(ConfigError::Validation {
                message: format!(
                    "egress.allowed_private_ips[{i}] `{ip}` is not a valid IP address"
                ),
            });
        }
    }

    // Service key, when set, must not be blank (a blank key would match
    // a blank apikey header)
    if let Some(key) = &config.auth.service_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "auth.service_key must not be blank when set".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = HookgateConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_window_fails_validation() {
        let mut config = HookgateConfig::default();
        config.throttle.window_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("window_secs"))
        ));
    }

    #[test]
    fn zero_limit_fails_validation() {
        let mut config = HookgateConfig::default();
        config.throttle.max_requests = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_requests"))
        ));
    }

    #[test]
    fn default_timeout_above_ceiling_fails_validation() {
        let mut config = HookgateConfig::default();
        config.egress.default_timeout_ms = 60_000;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("default_timeout_ms"))
        ));
    }

    #[test]
    fn url_shaped_allowlist_entry_fails_validation() {
        let mut config = HookgateConfig::default();
        config.egress.allowed_domains = vec!["https://hooks.slack.com/services".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("bare hostname"))
        ));
    }

    #[test]
    fn invalid_private_ip_exemption_fails_validation() {
        let mut config = HookgateConfig::default();
        config.egress.allowed_private_ips = vec!["not-an-ip".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("not-an-ip"))
        ));
    }

    #[test]
    fn blank_service_key_fails_validation() {
        let mut config = HookgateConfig::default();
        config.auth.service_key = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("service_key"))
        ));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = HookgateConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = HookgateConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.auth.service_key = Some("svc-key-1".to_string());
        config.egress.allowed_private_ips = vec!["127.0.0.1".to_string()];
        assert!(validate_config(&config).is_ok());
    }
}
