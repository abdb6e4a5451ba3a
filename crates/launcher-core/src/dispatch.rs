use log::{info, warn};

use crate::catalog::{Catalog, fill_template};
use crate::classify::{Classifier, Decision};
use crate::error::GatewayError;
use crate::gateway::{Opener, Picker};
use crate::input::RawInput;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q={}";
pub const DEFAULT_PRIMARY_LABEL: &str = "xdg-open";
pub const DEFAULT_SECONDARY_LABEL: &str = "Port";

const HOST_SCHEME: &str = "https://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub search_template: String,
    pub primary_label: String,
    pub secondary_label: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            primary_label: DEFAULT_PRIMARY_LABEL.to_string(),
            secondary_label: DEFAULT_SECONDARY_LABEL.to_string(),
        }
    }
}

/// Position in one launcher flow. `Cancelled` and `Resolved` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    PrimaryPrompted,
    SecondaryPrompted,
    Cancelled,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Cancelled,
    Opened { target: String },
    OpenFailed { target: String, reason: String },
}

impl DispatchOutcome {
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Cancelled => None,
            Self::Opened { target } | Self::OpenFailed { target, .. } => Some(target),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: Catalog,
    classifier: Classifier,
    settings: DispatchSettings,
    state: State,
}

impl Dispatcher {
    pub fn new(catalog: Catalog, settings: DispatchSettings) -> Self {
        Self {
            catalog,
            classifier: Classifier::new(),
            settings,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    pub fn classify(&self, input: &RawInput) -> Decision {
        self.classifier.classify(input, &self.catalog)
    }

    /// Runs one full flow: primary prompt over the catalog names, then
    /// classification and dispatch. Picker failures abort the flow.
    pub fn run<P, O>(
        &mut self,
        picker: &mut P,
        opener: &mut O,
    ) -> Result<DispatchOutcome, GatewayError>
    where
        P: Picker + ?Sized,
        O: Opener + ?Sized,
    {
        self.state = State::PrimaryPrompted;
        let names = self.catalog.list_names();
        let input = picker.prompt(&names, &self.settings.primary_label)?;
        let decision = self.classify(&input);
        self.dispatch(decision, picker, opener)
    }

    pub fn dispatch<P, O>(
        &mut self,
        decision: Decision,
        picker: &mut P,
        opener: &mut O,
    ) -> Result<DispatchOutcome, GatewayError>
    where
        P: Picker + ?Sized,
        O: Opener + ?Sized,
    {
        match decision {
            Decision::Cancelled => {
                info!("detected user cancel, bailing out");
                self.state = State::Cancelled;
                Ok(DispatchOutcome::Cancelled)
            }
            Decision::StaticNested(sub) => {
                self.state = State::SecondaryPrompted;
                let reply = picker.prompt(&sub.choices, &self.settings.secondary_label)?;
                // The secondary reply is trusted as-is; only cancellation is checked.
                let next = if reply.is_cancelled() {
                    Decision::Cancelled
                } else {
                    Decision::StaticDirect {
                        target: sub.resolve(reply.as_str()),
                    }
                };
                self.dispatch(next, picker, opener)
            }
            Decision::StaticDirect { target } => {
                info!("static entry selected: {target}");
                Ok(self.launch(target, opener))
            }
            Decision::ExactUri(text) => {
                info!("exact URI detected");
                Ok(self.launch(text, opener))
            }
            Decision::HostLike(host) => {
                info!("{host} matched host but not uri");
                Ok(self.launch(host_url(&host), opener))
            }
            Decision::FreeText(text) => {
                info!("no shortcut, uri or host matched; searching");
                let target = search_url(&self.settings.search_template, &text);
                Ok(self.launch(target, opener))
            }
        }
    }

    /// Target for decisions that need no further prompt.
    pub fn resolve_target(&self, decision: &Decision) -> Option<String> {
        match decision {
            Decision::Cancelled | Decision::StaticNested(_) => None,
            Decision::StaticDirect { target } => Some(target.clone()),
            Decision::ExactUri(text) => Some(text.clone()),
            Decision::HostLike(host) => Some(host_url(host)),
            Decision::FreeText(text) => Some(search_url(&self.settings.search_template, text)),
        }
    }

    fn launch<O>(&mut self, target: String, opener: &mut O) -> DispatchOutcome
    where
        O: Opener + ?Sized,
    {
        info!("launching {target}");
        self.state = State::Resolved;
        match opener.open(&target) {
            Ok(()) => DispatchOutcome::Opened { target },
            Err(error) => {
                warn!("{error}");
                DispatchOutcome::OpenFailed {
                    target,
                    reason: error.to_string(),
                }
            }
        }
    }
}

/// Builds a search URL with the query percent-encoded and spaces as `+`.
pub fn search_url(template: &str, text: &str) -> String {
    let encoded = urlencoding::encode(text).replace("%20", "+");
    fill_template(template, &encoded)
}

fn host_url(host: &str) -> String {
    format!("{HOST_SCHEME}{host}")
}
