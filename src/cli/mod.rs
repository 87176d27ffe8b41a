//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `view` | Render a workspace tab as a table or JSON |
//! | `assess` | Run a privacy impact assessment for a described data practice |
//! | `config` | Show the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Dashboard with consent histogram and DSR backlog
//! guardia view
//!
//! # Audit trail as JSON
//! guardia view audit --format json
//!
//! # Assess a data practice
//! guardia assess "Share purchase history with an ad network"
//! ```
//!
//! # Provider Factory
//!
//! The `llm_factory` submodule builds the configured text-generation
//! provider and the assessment gateway.

mod assess;
mod config;
mod llm_factory;
mod view;

pub use assess::cmd_assess;
pub use config::cmd_config_show;
pub use llm_factory::{
    build_gateway, build_gemini_client, build_http_config, build_openai_client,
    build_text_generator,
};
pub use view::{
    ReportView, StatusCount, ViewFormat, cmd_view, write_audit, write_dashboard, write_histogram,
    write_policies, write_records, write_report, write_requests,
};
