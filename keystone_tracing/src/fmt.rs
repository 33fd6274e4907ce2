use crate::{FormatFlavor, TracingConfig};
use tracing_core::{LevelFilter, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Applies the display toggles of the config to a formatted layer, attaches
/// the per-target filter, and returns the boxed result from the enclosing
/// function.
macro_rules! return_finished_layer {
    ($layer:expr, $config:expr, $targets:expr) => {{
        let layer = $layer
            .with_ansi($config.color())
            .with_target($config.show_target())
            .with_file($config.show_file())
            .with_line_number($config.show_line_number())
            .with_level($config.show_level())
            .with_thread_ids($config.show_thread_id())
            .with_thread_names($config.show_thread_name());

        if $config.show_timestamp() {
            return Box::new(layer.with_filter($targets));
        }

        return Box::new(layer.without_time().with_filter($targets));
    }};
}

/// Creates a [formatted layer](fmt::Layer) for the given
/// [config](TracingConfig), filtered by the root and the per-target
/// verbosity.
pub fn make_layer<S>(config: impl AsRef<TracingConfig>) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let config = config.as_ref();
    let targets = make_targets(config);

    match config.flavor() {
        FormatFlavor::Full => return_finished_layer!(fmt::layer::<S>(), config, targets),
        FormatFlavor::Compact => {
            return_finished_layer!(fmt::layer::<S>().compact(), config, targets)
        }
        FormatFlavor::Pretty => {
            return_finished_layer!(fmt::layer::<S>().pretty(), config, targets)
        }
        #[cfg(feature = "json")]
        FormatFlavor::Json => return_finished_layer!(fmt::layer::<S>().json(), config, targets),
    }
}

/// Installs the [layer](make_layer) for the given config as the global
/// default subscriber. Fails if a global subscriber is already set.
pub fn install(config: impl AsRef<TracingConfig>) -> Result<(), TryInitError> {
    Registry::default()
        .with(make_layer::<Registry>(config))
        .try_init()
}

/// Creates the [per-target filter](Targets) of the given config.
fn make_targets(config: &TracingConfig) -> Targets {
    Targets::new()
        .with_default(LevelFilter::from(config.verbosity()))
        .with_targets(
            config
                .targets()
                .iter()
                .map(|(target, verbosity)| (target.clone(), LevelFilter::from(*verbosity))),
        )
}
