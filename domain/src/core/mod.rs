//! Core domain concepts shared across all subdomains.
//!
//! - [`string`]: UTF-8 safe truncation helpers

pub mod string;
