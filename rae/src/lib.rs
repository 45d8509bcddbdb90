//! Look up Spanish words in the Diccionario de la lengua española.
//!
//! A lookup goes through the offline [`Cache`] first and the dictionary site second, and always
//! ends in a list of [`ResultEntry`] values ready to be shown by a launcher or a terminal.

// Allow repetition of structure name instead of replacing with self as the output from
// rust-analyzer becomes more readable
#![allow(clippy::use_self)]

pub mod cache;
pub mod classify;
pub mod config;
pub mod consts;
mod error;
pub mod http;
pub mod lookup;
pub mod query;
pub mod render;
pub mod result;
pub mod tracing;
pub mod wrap;

pub use cache::Cache;
pub use classify::Case;
pub use config::{Config, Preferences};
pub use error::Error;
pub use lookup::{Coordinator, PageSource};
pub use result::{Action, ResultEntry};
