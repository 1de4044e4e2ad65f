mod config;
mod serve;
mod stats;
mod token;

pub use config::{cmd_check_config, cmd_init};
pub use serve::cmd_serve;
pub use stats::cmd_stats;
pub use token::cmd_issue_token;
