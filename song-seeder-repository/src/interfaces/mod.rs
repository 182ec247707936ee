//! Interface definitions for the search backend.
//!
//! This module defines the abstract `SearchIndexProvider` trait that allows
//! the bulk driver to be tested against a mock backend.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
