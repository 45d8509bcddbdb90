//! A client and parser for the Diccionario de la lengua española (<https://dle.rae.es>).
//!
//! Pages are parsed into a [`DictionaryPage`], holding the senses of a headword when there is
//! an exact match, or the list of related headwords the site suggests when there isn't.

// Allow repetition of structure name instead of replacing with self as the output from
// rust-analyzer becomes more readable
#![allow(clippy::use_self)]

#[cfg(feature = "client")]
pub mod client;
mod error;
pub mod markup;
pub mod types;

#[cfg(feature = "client")]
pub use client::Client;
pub use error::Error;
pub use markup::{Child, Element, Page};
pub use types::{DefinitionEntry, DictionaryPage, SuggestionEntry};
