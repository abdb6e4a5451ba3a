use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, EntryValue, SubChoices};
use crate::input::RawInput;

// Checked in order; the first match wins.
const URI_SCHEME_PATTERNS: &[&str] = &[r"^https?:/+", r"^file:/+"];

const IPV4_PATTERN: &str = r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$";
const HOSTNAME_PATTERN: &str = r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$";

/// What one picker reply means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Cancelled,
    StaticDirect { target: String },
    StaticNested(SubChoices),
    ExactUri(String),
    HostLike(String),
    FreeText(String),
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::StaticDirect { .. } => "static-direct",
            Self::StaticNested(_) => "static-nested",
            Self::ExactUri(_) => "exact-uri",
            Self::HostLike(_) => "host-like",
            Self::FreeText(_) => "free-text",
        }
    }
}

// The patterns are constants pinned by `pattern_constants_compile`.
#[allow(clippy::expect_used)]
static URI_SCHEMES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    URI_SCHEME_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("scheme pattern compiles"))
        .collect()
});
#[allow(clippy::expect_used)]
static IPV4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IPV4_PATTERN).expect("ipv4 pattern compiles"));
#[allow(clippy::expect_used)]
static HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HOSTNAME_PATTERN).expect("hostname pattern compiles"));

/// Precedence ladder over a reply. Regexes are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, input: &RawInput, catalog: &Catalog) -> Decision {
        let text = input.as_str();
        if input.is_cancelled() {
            return Decision::Cancelled;
        }

        if let Some(entry) = catalog.lookup(text) {
            return match &entry.value {
                EntryValue::Nested(sub) => Decision::StaticNested(sub.clone()),
                EntryValue::Literal(target) => Decision::StaticDirect {
                    target: target.clone(),
                },
            };
        }

        if self.is_exact_uri(text) {
            return Decision::ExactUri(text.to_string());
        }

        if self.is_host_like(text) {
            return Decision::HostLike(text.to_string());
        }

        Decision::FreeText(text.to_string())
    }

    pub fn is_exact_uri(&self, text: &str) -> bool {
        URI_SCHEMES.iter().any(|scheme| scheme.is_match(text))
    }

    pub fn is_host_like(&self, text: &str) -> bool {
        if text.chars().any(char::is_whitespace) || !text.contains('.') {
            return false;
        }

        IPV4.is_match(text) || HOSTNAME.is_match(text)
    }
}

pub fn classify(input: &RawInput, catalog: &Catalog) -> Decision {
    Classifier.classify(input, catalog)
}
