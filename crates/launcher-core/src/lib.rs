//! Picker launcher core.
//!
//! - `catalog`: named shortcuts, either literal targets or nested choice groups.
//! - `input`: normalization of the picker's raw reply.
//! - `classify`: precedence rules that turn one line into a `Decision`.
//! - `dispatch`: drives picker round-trips and hands targets to the opener.
//! - `gateway`: capability traits for the external picker and opener.

pub mod catalog;
pub mod classify;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod input;

pub use catalog::{Catalog, Entry, EntryValue, PLACEHOLDER, SubChoices, fill_template};
pub use classify::{Classifier, Decision, classify};
pub use dispatch::{
    DEFAULT_PRIMARY_LABEL, DEFAULT_SEARCH_TEMPLATE, DEFAULT_SECONDARY_LABEL, DispatchOutcome,
    DispatchSettings, Dispatcher, State, search_url,
};
pub use error::{CatalogError, GatewayError};
pub use gateway::{Opener, Picker};
pub use input::RawInput;
