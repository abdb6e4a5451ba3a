/// One reply from the picker, trimmed and stripped of leading/trailing dots.
///
/// An empty value is the canonical cancel signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInput(String);

impl RawInput {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().trim_matches('.').to_string())
    }

    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for RawInput {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
