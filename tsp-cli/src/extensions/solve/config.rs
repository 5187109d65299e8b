//! Solver configuration.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/config_test.rs"]
mod config_test;

extern crate serde_json;

use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;
use tsp_core::models::Cycle;
use tsp_core::solver::{Builder, ClusteringConfig, TelemetryMode};
use tsp_core::utils::{Float, GenericError, InfoLogger};

/// A solver configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Forces symmetric or directed formulation. Default is detected from the cost matrix.
    pub symmetric: Option<bool>,
    /// Delivers subtour constraints lazily. Default is false.
    pub lazy_constraints: Option<bool>,
    /// Seeds optimizer with a heuristic tour. Default is false.
    pub heuristic_warmstart: Option<bool>,
    /// Suppresses optimizer's own output. Default is true.
    pub silent: Option<bool>,
    /// Time limit in seconds for a single optimizer call.
    pub time_limit: Option<Float>,
    /// Solution pool size. Default is 1.
    pub solution_pool_size: Option<usize>,
    /// Subtours eliminated before the first optimization.
    pub initial_subtours: Option<Vec<Cycle>>,
    /// Clustering warm start configuration.
    pub clustering: Option<ClusteringSettings>,
    /// Telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// A clustering warm start configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringSettings {
    /// Enables clustering. Default is true.
    pub enabled: Option<bool>,
    /// Clustering is used when amount of cities exceeds this value. Default is 10.
    pub min_problem_size: Option<usize>,
    /// Average amount of cities per cluster. Default is 10.
    pub cities_per_cluster: Option<usize>,
    /// Only clusters with more cities are solved. Default is 3.
    pub min_cluster_size: Option<usize>,
    /// Only clusters with less than this share of cities are solved. Default is 0.8.
    pub max_cluster_ratio: Option<Float>,
    /// Solves clusters in parallel. Default is false.
    pub parallel: Option<bool>,
}

/// A telemetry configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct TelemetryConfig {
    /// Logging configuration.
    pub logging: Option<LoggingConfig>,
    /// Metrics configuration.
    pub metrics: Option<MetricsConfig>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled. Default is false.
    pub enabled: bool,
}

/// A metrics configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct MetricsConfig {
    /// Specifies whether metrics collection is enabled. Default is false.
    pub enabled: bool,
}

/// Creates telemetry mode from flags using given logger.
pub fn create_telemetry_mode(is_logging: bool, is_metrics: bool, logger: InfoLogger) -> TelemetryMode {
    match (is_logging, is_metrics) {
        (true, true) => TelemetryMode::All { logger },
        (true, false) => TelemetryMode::OnlyLogging { logger },
        (false, true) => TelemetryMode::OnlyMetrics,
        (false, false) => TelemetryMode::None,
    }
}

/// Returns a logger which writes into standard error stream, so standard output keeps result only.
pub fn get_default_logger() -> InfoLogger {
    Arc::new(|msg: &str| eprintln!("{msg}"))
}

fn configure_clustering(settings: &ClusteringSettings) -> ClusteringConfig {
    let default = ClusteringConfig::default();

    ClusteringConfig {
        is_enabled: settings.enabled.unwrap_or(default.is_enabled),
        min_problem_size: settings.min_problem_size.unwrap_or(default.min_problem_size),
        cities_per_cluster: settings.cities_per_cluster.unwrap_or(default.cities_per_cluster),
        min_cluster_size: settings.min_cluster_size.unwrap_or(default.min_cluster_size),
        max_cluster_ratio: settings.max_cluster_ratio.unwrap_or(default.max_cluster_ratio),
        is_parallel: settings.parallel.unwrap_or(default.is_parallel),
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, GenericError> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Applies config to the builder, unset options keep builder's values.
pub fn create_builder_from_config(builder: Builder, config: &Config) -> Builder {
    let mut builder = builder;

    if config.symmetric.is_some() {
        builder = builder.with_symmetric(config.symmetric);
    }

    if let Some(lazy_constraints) = config.lazy_constraints {
        builder = builder.with_lazy_constraints(lazy_constraints);
    }

    if let Some(heuristic_warmstart) = config.heuristic_warmstart {
        builder = builder.with_heuristic_warmstart(heuristic_warmstart);
    }

    if let Some(silent) = config.silent {
        builder = builder.with_silent(silent);
    }

    if config.time_limit.is_some() {
        builder = builder.with_time_limit(config.time_limit);
    }

    if let Some(solution_pool_size) = config.solution_pool_size {
        builder = builder.with_solution_pool_size(solution_pool_size);
    }

    if let Some(initial_subtours) = config.initial_subtours.clone() {
        builder = builder.with_initial_subtours(initial_subtours);
    }

    if let Some(clustering) = config.clustering.as_ref() {
        builder = builder.with_clustering(configure_clustering(clustering));
    }

    if let Some(telemetry) = config.telemetry.as_ref() {
        let is_logging = telemetry.logging.as_ref().is_some_and(|logging| logging.enabled);
        let is_metrics = telemetry.metrics.as_ref().is_some_and(|metrics| metrics.enabled);

        builder = builder.with_telemetry(create_telemetry_mode(is_logging, is_metrics, get_default_logger()));
    }

    builder
}

/// Creates a builder from config file.
pub fn create_builder_from_config_file<R: Read>(
    builder: Builder,
    reader: BufReader<R>,
) -> Result<Builder, GenericError> {
    read_config(reader).map(|config| create_builder_from_config(builder, &config))
}
