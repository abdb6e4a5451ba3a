use std::fs;
use std::path::{Path, PathBuf};

use launcher_core::{Catalog, CatalogError, Entry};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "entry")]
    entries: Vec<EntryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryRecord {
    name: String,
    target: Option<String>,
    choices: Option<Vec<ChoiceLabel>>,
    template: Option<String>,
}

/// Port groups are usually written as bare integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceLabel {
    Text(String),
    Number(i64),
}

impl ChoiceLabel {
    fn into_label(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file: {0}")]
    Parse(String),
    #[error("catalog entry {name}: {reason}")]
    Shape { name: String, reason: &'static str },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogFileError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&raw)
}

pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogFileError> {
    let file: CatalogFile =
        toml::from_str(raw).map_err(|error| CatalogFileError::Parse(error.to_string()))?;

    let entries = file
        .entries
        .into_iter()
        .map(record_to_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(entries)?)
}

fn record_to_entry(record: EntryRecord) -> Result<Entry, CatalogFileError> {
    let EntryRecord {
        name,
        target,
        choices,
        template,
    } = record;

    match (target, choices, template) {
        (Some(target), None, None) => Ok(Entry::literal(name, target)),
        (None, Some(choices), Some(template)) => Ok(Entry::nested(
            name,
            choices.into_iter().map(ChoiceLabel::into_label),
            template,
        )),
        (Some(_), _, _) => Err(CatalogFileError::Shape {
            name,
            reason: "target cannot be combined with choices or template",
        }),
        (None, Some(_), None) => Err(CatalogFileError::Shape {
            name,
            reason: "choices require a template",
        }),
        (None, None, _) => Err(CatalogFileError::Shape {
            name,
            reason: "expected target or choices",
        }),
    }
}
