pub mod config;
pub mod naming;
pub mod types;

pub use config::{ApiServerConfig, HostCredentials};
pub use naming::{
    DEFAULT_BRANCH, archive_file_name, download_url, is_valid_agent_name, publish_folder_name,
    validate_agent_name, validate_archive_file_name, validate_env_var_name, validate_tool_name,
};
pub use types::*;
