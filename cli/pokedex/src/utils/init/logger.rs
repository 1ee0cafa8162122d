use std::sync::OnceLock;

use tracing::error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::commands::Verbosity;

static LOGGER_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// Install the global subscriber on first use and set its filter for `verbosity`.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub(crate) fn init_logger(verbosity: Option<Verbosity>) {
    let log_filter = log_filter(verbosity.unwrap_or_default());

    let filter_handle = LOGGER_HANDLE.get_or_init(|| {
        let (subscriber, reload_handle) = create_registry_and_filter_reload_handle();
        subscriber.init();
        reload_handle
    });

    update_filters(filter_handle, log_filter);
}

fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,pokedex=error,pokedex_catalog=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,pokedex=warn,pokedex_catalog=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,pokedex=info,pokedex_catalog=info",
        Verbosity::Verbose(2) => "off,pokedex=debug,pokedex_catalog=debug",
        Verbosity::Verbose(3) => "off,pokedex=trace,pokedex_catalog=trace",
        // Also show debug from the http stack
        Verbosity::Verbose(4) => "debug,pokedex=trace,pokedex_catalog=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

pub fn update_filters(filter_handle: &Handle<EnvFilter, Registry>, log_filter: &str) {
    let result = filter_handle.modify(|layer| {
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_filter)) {
            Ok(new_filter) => *layer = new_filter,
            Err(err) => {
                error!("Updating logger filter failed: {}", err);
            },
        };
    });
    if let Err(err) = result {
        error!("Updating logger filter failed: {}", err);
    }
}

pub fn create_registry_and_filter_reload_handle() -> (
    impl SubscriberInitExt,
    Handle<EnvFilter, Registry>,
) {
    // Start silent, the actual filter is set right after by [update_filters].
    let filter = EnvFilter::new("off");
    let (filter, filter_reload_handle) = tracing_subscriber::reload::Layer::new(filter);
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let registry = tracing_subscriber::registry().with(log_layer);

    (registry, filter_reload_handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert!(log_filter(Verbosity::Quiet).contains("pokedex=error"));
        assert!(log_filter(Verbosity::default()).contains("pokedex=warn"));
        assert!(log_filter(Verbosity::Verbose(2)).contains("pokedex_catalog=debug"));
        assert_eq!(log_filter(Verbosity::Verbose(9)), "trace");
    }

    #[test]
    fn filters_are_valid_directives() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Verbose(0),
            Verbosity::Verbose(1),
            Verbosity::Verbose(2),
            Verbosity::Verbose(3),
            Verbosity::Verbose(4),
            Verbosity::Verbose(5),
        ] {
            EnvFilter::try_new(log_filter(verbosity)).unwrap();
        }
    }
}
