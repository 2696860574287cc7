use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};

use crate::dispatch::routes::Module;

/// Binding between every `Store` and the one physical table.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub table_name: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or empty.
#[derive(Debug, Clone)]
pub struct Config {
    pub table: TableConfig,
    pub anthropic_api_key: String,
    /// DynamoDB endpoint override for local development.
    pub aws_endpoint_url: Option<String>,
    /// Modules whose routes this deployment serves.
    pub modules: BTreeSet<Module>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            table: TableConfig {
                table_name: require_env("TABLE_NAME")?,
            },
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            aws_endpoint_url: optional_env("AWS_ENDPOINT_URL"),
            modules: match optional_env("ROUTE_MODULES") {
                Some(list) => parse_modules(&list)?,
                None => Module::ALL.into_iter().collect(),
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a comma-separated module list such as `user,resume`.
pub fn parse_modules(list: &str) -> Result<BTreeSet<Module>> {
    let mut modules = BTreeSet::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let module = Module::from_name(name)
            .with_context(|| format!("Unknown module '{name}' in ROUTE_MODULES"))?;
        modules.insert(module);
    }
    if modules.is_empty() {
        bail!("ROUTE_MODULES must name at least one module");
    }
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modules_accepts_known_names() {
        let modules = parse_modules("user, cover-letter ,industry").unwrap();
        assert_eq!(
            modules.into_iter().collect::<Vec<_>>(),
            vec![Module::User, Module::CoverLetter, Module::Industry]
        );
    }

    #[test]
    fn test_parse_modules_rejects_unknown_name() {
        let err = parse_modules("user,billing").unwrap_err();
        assert!(err.to_string().contains("billing"));
    }

    #[test]
    fn test_parse_modules_rejects_empty_list() {
        assert!(parse_modules(" , ").is_err());
    }
}
