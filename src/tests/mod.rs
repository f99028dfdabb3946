pub mod common;

mod config_loading;
mod outbound_timeouts;
