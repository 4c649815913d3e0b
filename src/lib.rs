#[macro_use]
pub mod macros;

pub mod api;
pub mod archive;
pub mod chrono_util;
pub mod config;
pub mod data_collector;
pub mod fs_json_util;
pub mod schema;
