use thiserror::Error;

/// Failures at the two external-process boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("picker unavailable: {0}")]
    PickerUnavailable(String),
    #[error("failed to start opener {program}: {message}")]
    OpenerStartFailed { program: String, message: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog entry name must not be empty")]
    EmptyName,
    #[error("catalog entry {0:?} cannot be picked: edge dots and whitespace are stripped from replies")]
    UnreachableName(String),
    #[error("duplicate catalog entry: {0}")]
    DuplicateName(String),
    #[error("catalog entry {0} has an empty target")]
    EmptyTarget(String),
    #[error("catalog entry {0} has no choices")]
    EmptyChoices(String),
    #[error("catalog entry {name} template must contain exactly one {{}}: {template}")]
    InvalidTemplate { name: String, template: String },
}
