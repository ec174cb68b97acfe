//! Kernel utilities shared by applications built on the common crates.
//! Keep this crate lightweight; it holds configuration loading and the
//! top-level configuration shape.
//!
//! ## Config loading
//! ```rust,ignore
//! use sn_kernel::config::{ToolkitConfig, load_config};
//!
//! let cfg: ToolkitConfig = load_config(Some("config/local")).unwrap_or_default();
//! ```
pub mod config;

pub use config::{ConfigError, ConfigErrorExt, ToolkitConfig, load_config};
