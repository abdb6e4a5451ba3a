use std::collections::HashMap;
use std::path::PathBuf;

use launcher_core::{
    DEFAULT_PRIMARY_LABEL, DEFAULT_SEARCH_TEMPLATE, DEFAULT_SECONDARY_LABEL, DispatchSettings,
    PLACEHOLDER,
};
use thiserror::Error;

const PICKER_ENV: &str = "LAUNCHER_PICKER";
const PICKER_ARGS_ENV: &str = "LAUNCHER_PICKER_ARGS";
const OPENER_ENV: &str = "LAUNCHER_OPENER";
const SEARCH_URL_ENV: &str = "LAUNCHER_SEARCH_URL";
const PROMPT_ENV: &str = "LAUNCHER_PROMPT";
const SUBPROMPT_ENV: &str = "LAUNCHER_SUBPROMPT";
const CATALOG_ENV: &str = "LAUNCHER_CATALOG";

pub const DEFAULT_PICKER: &str = "rofi";
pub const DEFAULT_PICKER_ARGS: &str = "-dmenu -i -p";
pub const DEFAULT_OPENER: &str = "xdg-open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub picker_program: String,
    pub picker_args: Vec<String>,
    pub opener_program: String,
    pub catalog_path: Option<PathBuf>,
    pub dispatch: DispatchSettings,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let lookup = |key: &str| lookup_non_blank(&env_map, key);

        let picker_program = lookup(PICKER_ENV).unwrap_or(DEFAULT_PICKER).to_string();
        let picker_args = lookup(PICKER_ARGS_ENV)
            .unwrap_or(DEFAULT_PICKER_ARGS)
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect();
        let opener_program = lookup(OPENER_ENV).unwrap_or(DEFAULT_OPENER).to_string();
        let search_template = parse_search_template(lookup(SEARCH_URL_ENV))?;
        let home = env_map.get("HOME").map(String::as_str).unwrap_or_default();
        let catalog_path =
            lookup(CATALOG_ENV).map(|raw| PathBuf::from(expand_home_tokens(raw, home)));

        Ok(Self {
            picker_program,
            picker_args,
            opener_program,
            catalog_path,
            dispatch: DispatchSettings {
                search_template,
                primary_label: lookup(PROMPT_ENV)
                    .unwrap_or(DEFAULT_PRIMARY_LABEL)
                    .to_string(),
                secondary_label: lookup(SUBPROMPT_ENV)
                    .unwrap_or(DEFAULT_SECONDARY_LABEL)
                    .to_string(),
            },
        })
    }
}

fn lookup_non_blank<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_search_template(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(value) = raw else {
        return Ok(DEFAULT_SEARCH_TEMPLATE.to_string());
    };

    if value.matches(PLACEHOLDER).count() != 1 {
        return Err(ConfigError::InvalidSearchTemplate(value.to_string()));
    }

    Ok(value.to_string())
}

pub fn expand_home_tokens(raw: &str, home: &str) -> String {
    let trimmed = raw.trim();
    let mut expanded = trimmed.replace("$HOME", home);

    if expanded == "~" {
        expanded = home.to_string();
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        expanded = format!("{home}/{rest}");
    }

    expanded
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid LAUNCHER_SEARCH_URL: {0} (expected exactly one {{}} placeholder)")]
    InvalidSearchTemplate(String),
}
