pub mod rules;

use crate::normalizer::CanonicalConfiguration;
use thiserror::Error;

/// Outcome of a single rule: success, or one or more violation messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Validator {
    pub success: bool,
    pub messages: Vec<String>,
}

impl Validator {
    pub fn pass() -> Self {
        Validator {
            success: true,
            messages: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Validator {
            success: false,
            messages: vec![message.into()],
        }
    }

    pub fn fail_all(messages: Vec<String>) -> Self {
        Validator {
            success: false,
            messages,
        }
    }
}

/// Aggregate outcome of running every rule: success is the AND of every
/// rule's success, messages the in-order concatenation of every rule's
/// violations. Empty messages iff success.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub success: bool,
    pub messages: Vec<String>,
}

impl ValidationReport {
    fn new() -> Self {
        ValidationReport {
            success: true,
            messages: Vec::new(),
        }
    }

    fn record(&mut self, outcome: Validator) {
        self.success = self.success && outcome.success;
        self.messages.extend(outcome.messages);
    }

    /// Convert a failing report into a typed error for the calling boundary.
    pub fn into_result(self) -> Result<(), InvalidConfiguration> {
        if self.success {
            Ok(())
        } else {
            Err(InvalidConfiguration {
                messages: self.messages,
            })
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid configuration:\n{}", .messages.join("\n"))]
pub struct InvalidConfiguration {
    pub messages: Vec<String>,
}

/// Validate a canonical configuration
///
/// Every rule runs regardless of earlier failures, so the report lists every
/// problem in one pass. The configuration is only read, never mutated.
pub fn validate_config(config: &CanonicalConfiguration) -> ValidationReport {
    let infra = &config.infrastructure;
    let mut report = ValidationReport::new();

    report.record(rules::validate_nodes(&infra.nodes));
    report.record(rules::validate_cores(&infra.nodes, &infra.cores));
    report.record(rules::validate_quota(&infra.nodes, &infra.quota));
    report.record(rules::validate_memory(&infra.nodes, &infra.memory));
    report.record(rules::validate_read_write_speed(Some(
        &infra.read_write_speed,
    )));

    report.record(rules::validate_connection(
        "cloud",
        Some(&infra.cloud_connection),
    ));
    report.record(rules::validate_connection(
        "edge",
        Some(&infra.edge_connection),
    ));
    report.record(rules::validate_connection(
        "cloud-edge",
        Some(&infra.cloud_edge_connection),
    ));
    report.record(rules::validate_connection(
        "cloud-endpoint",
        Some(&infra.cloud_endpoint_connection),
    ));
    report.record(rules::validate_connection(
        "edge-endpoint",
        Some(&infra.edge_endpoint_connection),
    ));

    report.record(rules::validate_prefix_ip(infra.prefix_ip));
    report.record(rules::validate_8bit_field("middleIP", infra.middle_ip));
    report.record(rules::validate_8bit_field(
        "middleIP_base",
        infra.middle_ip_base,
    ));

    // Benchmark rules only apply when a benchmark is present
    if let Some(benchmark) = &config.benchmark {
        report.record(rules::validate_unsigned_number(
            "applicationWorkerCPU",
            benchmark.application_worker_cpu,
            false,
            0.1,
        ));
        report.record(rules::validate_unsigned_number(
            "applicationWorkerMemory",
            benchmark.application_worker_memory,
            false,
            0.1,
        ));
        report.record(rules::validate_unsigned_number(
            "applicationEndpointCPU",
            benchmark.application_endpoint_cpu,
            false,
            0.1,
        ));
        report.record(rules::validate_unsigned_number(
            "applicationEndpointMemory",
            benchmark.application_endpoint_memory,
            false,
            0.1,
        ));
        report.record(rules::validate_unsigned_number(
            "applicationsPerWorker",
            benchmark.applications_per_worker,
            true,
            1.0,
        ));
    }

    report
}
