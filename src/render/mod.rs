//! Release note rendering.
//!
//! This module provides:
//!
//! - **Template**: literal `{{token}}` substitution
//! - **Context**: the resolved token values for one project release
//!
//! # Template Syntax
//!
//! ```text
//! # {{projectName}} {{version}}
//!
//! ![card]({{imageUrl}})
//!
//! {{notes}}
//! ```
//!
//! Tokens without a value in the context are copied to the output verbatim.

mod context;
mod template;

pub use context::{DEFAULT_NOTES, RenderContext};
pub use template::render_template;
