//! Resource map: every captured asset, classified and decoded
//!
//! This module turns an asset directory into the lookup table the stylesheet
//! and HTML passes read from, and picks the document those passes rewrite.

pub mod builder;
pub mod script_format;
pub mod types;

pub use builder::{BuiltResources, build_resource_map, build_resource_map_with};
pub use script_format::{IndentFormatter, ScriptFormatter};
pub use types::{PrimaryDocument, ResourceMap, ResourceRecord};
