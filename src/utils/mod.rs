pub mod dirs;
pub mod http;
