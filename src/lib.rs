//! # zoneedit-ddns
//!
//! A ZoneEdit Dynamic DNS updater written in Rust.
//!
//! ## Features
//!
//! - Public IPv4 auto-detection with fallback echo services
//! - Updates any number of hostnames in one run
//! - Configuration merged from CLI flags, `ZONEEDIT_*` environment
//!   variables, and an optional TOML file
//! - Exit code distinguishes update failures from configuration errors
//!
//! ## Usage
//!
//! ```bash
//! # Auto-detect the public IPv4 and update a single host
//! zoneedit-ddns --user USER --token TOKEN --host home.example.com
//!
//! # Multiple hosts with an explicit IP
//! zoneedit-ddns --user USER --token TOKEN \
//!     --host home.example.com --host nas.example.com --ip 203.0.113.10
//!
//! # Using a config file and environment variables
//! export ZONEEDIT_USER=USER
//! export ZONEEDIT_TOKEN=TOKEN
//! zoneedit-ddns --config config/zoneedit.toml
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod zoneedit;

pub use config::{EnvConfig, Settings};
pub use detector::IpDetector;
pub use error::{DdnsError, Result};
pub use zoneedit::{UpdateResult, ZoneEditClient};
