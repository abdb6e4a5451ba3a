use std::collections::HashSet;

use crate::error::CatalogError;
use crate::input::RawInput;

/// Placeholder substituted by nested choice labels and search queries.
pub const PLACEHOLDER: &str = "{}";

const LOCALHOST_TEMPLATE: &str = "http://localhost:{}";
const LOCALHOST_PORTS: [&str; 8] = ["80", "443", "3000", "3001", "4000", "4040", "8080", "8081"];

const BUILTIN_LITERALS: [(&str, &str); 15] = [
    ("Gmail", "https://gmail.com"),
    ("Drive", "https://drive.google.com"),
    ("Keep", "https://keep.google.com"),
    ("Photos", "https://photos.google.com"),
    ("Calendar", "https://calendar.google.com"),
    ("GitHub", "https://github.com"),
    ("BitBucket", "https://bitbucket.org"),
    ("DockerHub", "https://hub.docker.com"),
    ("Reddit", "https://reddit.com"),
    ("Hastebin", "https://hastebin.com"),
    ("YouTube", "https://youtube.com"),
    ("Netflix", "https://www.netflix.com"),
    ("Sheets", "https://sheets.google.com"),
    ("Twitter", "https://twitter.com"),
    ("WakaTime", "https://wakatime.com"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubChoices {
    pub choices: Vec<String>,
    pub template: String,
}

impl SubChoices {
    pub fn resolve(&self, label: &str) -> String {
        fill_template(&self.template, label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    Literal(String),
    Nested(SubChoices),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: EntryValue,
}

impl Entry {
    pub fn literal(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: EntryValue::Literal(target.into()),
        }
    }

    pub fn nested<I, S>(name: impl Into<String>, choices: I, template: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value: EntryValue::Nested(SubChoices {
                choices: choices.into_iter().map(Into::into).collect(),
                template: template.into(),
            }),
        }
    }
}

/// Immutable, ordered shortcut table fed to the first picker round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The compiled-in catalog. Its validity is pinned by tests, so it is
    /// built without the fallible path.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    pub fn list_names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replaces the first placeholder in `template` with `value`.
pub fn fill_template(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}

fn builtin_entries() -> Vec<Entry> {
    let mut entries = vec![Entry::nested("Localhost", LOCALHOST_PORTS, LOCALHOST_TEMPLATE)];
    entries.extend(
        BUILTIN_LITERALS
            .iter()
            .map(|(name, target)| Entry::literal(*name, *target)),
    );
    entries
}

fn validate_entry(entry: &Entry) -> Result<(), CatalogError> {
    if entry.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    // A name the picker reply normalization rewrites could never be looked up.
    if RawInput::new(&entry.name).as_str() != entry.name {
        return Err(CatalogError::UnreachableName(entry.name.clone()));
    }

    match &entry.value {
        EntryValue::Literal(target) if target.trim().is_empty() => {
            Err(CatalogError::EmptyTarget(entry.name.clone()))
        }
        EntryValue::Literal(_) => Ok(()),
        EntryValue::Nested(sub) => {
            if sub.choices.is_empty() {
                return Err(CatalogError::EmptyChoices(entry.name.clone()));
            }
            if sub.template.matches(PLACEHOLDER).count() != 1 {
                return Err(CatalogError::InvalidTemplate {
                    name: entry.name.clone(),
                    template: sub.template.clone(),
                });
            }
            Ok(())
        }
    }
}
