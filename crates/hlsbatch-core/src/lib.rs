pub mod config;
pub mod logging;

pub mod driver;
pub mod extract;
pub mod fetcher;
pub mod job;
pub mod naming;
