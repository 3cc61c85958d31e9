//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for recipe names, member names, and fixed vocabularies
pub mod autocomplete;
