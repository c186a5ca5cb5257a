use std::{env, io::Write};

use chrono::Utc;
use env_logger::Builder;
use log::LevelFilter;

use crate::participation::Participation;

/// Logs to stderr. `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init_logger(verbose: bool) {
    let mut builder = Builder::new();

    builder.format(|formatter, record| {
        writeln!(
            formatter,
            "{} [{}] ({}): {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S %z"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else if verbose {
        builder.filter(None, LevelFilter::Debug);
    } else {
        builder.filter(None, LevelFilter::Info);
    }

    builder.init();
}

/// Joins the names of `participations` for log messages and output.
#[must_use]
pub fn join_names<P: Participation>(participations: &[P], separator: &str) -> String {
    participations
        .iter()
        .map(P::name)
        .collect::<Vec<_>>()
        .join(separator)
}
