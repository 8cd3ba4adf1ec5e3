pub mod environment;
pub mod paths;

pub use environment::get_config_path;
pub use paths::{file_extension, format_path_with_tilde, record_path};
