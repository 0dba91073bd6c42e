mod builders;
mod errors;
mod placeholders;
mod transactions;
mod types;

use crate::{builders::builders, errors::errors, placeholders::placeholders, types::types};
use flame::{Connection, Driver};
use log::LevelFilter;
use std::env;
#[cfg(not(feature = "disable-transactions"))]
use transactions::transactions;

#[doc(hidden)]
pub use log;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against a freshly opened connection.
pub fn execute_tests<D: Driver>(mut connection: Connection<D>) {
    placeholders(&mut connection);
    types(&mut connection);
    builders(&mut connection);
    errors(&mut connection);
    #[cfg(not(feature = "disable-transactions"))]
    transactions(&mut connection);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        $($code)+
        $crate::log::set_max_level(level);
    }};
}
