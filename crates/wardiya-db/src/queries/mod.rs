//! Database query modules.

pub mod kv;
