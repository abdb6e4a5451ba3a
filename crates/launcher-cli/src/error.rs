use launcher_core::GatewayError;

use crate::{catalog_file::CatalogFileError, config::ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::user(error.to_string())
    }
}

impl From<CatalogFileError> for AppError {
    fn from(error: CatalogFileError) -> Self {
        Self::user(error.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(error: GatewayError) -> Self {
        Self::runtime(error.to_string())
    }
}
