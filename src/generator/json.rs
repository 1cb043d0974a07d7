use anyhow::Result;
use serde_json::{Map, Value};

use crate::normalizer::{BenchmarkSpec, CanonicalConfiguration, DeploymentMode};
use crate::parser::{Provider, ResourceManager, WirelessNetworkPreset};

// Flat snake_case mirror of the resolved infrastructure; this is the key set
// the provisioning backend consumes.
#[derive(Debug, serde::Serialize)]
struct FlatInfrastructure {
    provider: Provider,
    infra_only: bool,

    cloud_nodes: f64,
    edge_nodes: f64,
    endpoint_nodes: f64,

    cloud_cores: f64,
    edge_cores: f64,
    endpoint_cores: f64,

    cloud_memory: f64,
    edge_memory: f64,
    endpoint_memory: f64,

    cloud_quota: f64,
    edge_quota: f64,
    endpoint_quota: f64,

    cloud_read_speed: f64,
    edge_read_speed: f64,
    endpoint_read_speed: f64,

    cloud_write_speed: f64,
    edge_write_speed: f64,
    endpoint_write_speed: f64,

    cpu_pin: bool,
    network_emulation: bool,

    wireless_network_preset: WirelessNetworkPreset,

    cloud_latency_avg: f64,
    cloud_latency_var: f64,
    cloud_throughput: f64,

    edge_latency_avg: f64,
    edge_latency_var: f64,
    edge_throughput: f64,

    cloud_edge_latency_avg: f64,
    cloud_edge_latency_var: f64,
    cloud_edge_throughput: f64,

    cloud_endpoint_latency_avg: f64,
    cloud_endpoint_latency_var: f64,
    cloud_endpoint_throughput: f64,

    edge_endpoint_latency_avg: f64,
    edge_endpoint_latency_var: f64,
    edge_endpoint_throughput: f64,

    external_physical_machines: Vec<String>,

    netperf: bool,
    base_path: String,

    #[serde(rename = "prefixIP")]
    prefix_ip: f64,
    #[serde(rename = "middleIP")]
    middle_ip: f64,
    #[serde(rename = "middleIP_base")]
    middle_ip_base: f64,

    delete: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_cloud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_edge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_credentials: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct FlatBenchmark {
    resource_manager: ResourceManager,
    resource_manager_only: bool,
    docker_pull: bool,
    application: String,

    application_worker_cpu: f64,
    application_worker_memory: f64,
    application_endpoint_cpu: f64,
    application_endpoint_memory: f64,

    applications_per_worker: f64,

    cache_worker: bool,
    observability: bool,
}

#[derive(Debug, serde::Serialize)]
struct FlatConfiguration {
    infrastructure: FlatInfrastructure,
    mode: DeploymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<Map<String, Value>>,
}

fn flatten_infrastructure(config: &CanonicalConfiguration) -> FlatInfrastructure {
    let infra = &config.infrastructure;
    let gcp = infra.gcp_config.as_ref();

    FlatInfrastructure {
        provider: infra.provider,
        infra_only: infra.infra_only,

        cloud_nodes: infra.nodes.cloud,
        edge_nodes: infra.nodes.edge,
        endpoint_nodes: infra.nodes.endpoint,

        cloud_cores: infra.cores.cloud,
        edge_cores: infra.cores.edge,
        endpoint_cores: infra.cores.endpoint,

        cloud_memory: infra.memory.cloud,
        edge_memory: infra.memory.edge,
        endpoint_memory: infra.memory.endpoint,

        cloud_quota: infra.quota.cloud,
        edge_quota: infra.quota.edge,
        endpoint_quota: infra.quota.endpoint,

        cloud_read_speed: infra.read_write_speed.read_speed.cloud,
        edge_read_speed: infra.read_write_speed.read_speed.edge,
        endpoint_read_speed: infra.read_write_speed.read_speed.endpoint,

        cloud_write_speed: infra.read_write_speed.write_speed.cloud,
        edge_write_speed: infra.read_write_speed.write_speed.edge,
        endpoint_write_speed: infra.read_write_speed.write_speed.endpoint,

        cpu_pin: infra.cpu_pin,
        network_emulation: infra.network_emulation,

        wireless_network_preset: infra.wireless_network_preset,

        cloud_latency_avg: infra.cloud_connection.latency_avg,
        cloud_latency_var: infra.cloud_connection.latency_var,
        cloud_throughput: infra.cloud_connection.throughput,

        edge_latency_avg: infra.edge_connection.latency_avg,
        edge_latency_var: infra.edge_connection.latency_var,
        edge_throughput: infra.edge_connection.throughput,

        cloud_edge_latency_avg: infra.cloud_edge_connection.latency_avg,
        cloud_edge_latency_var: infra.cloud_edge_connection.latency_var,
        cloud_edge_throughput: infra.cloud_edge_connection.throughput,

        cloud_endpoint_latency_avg: infra.cloud_endpoint_connection.latency_avg,
        cloud_endpoint_latency_var: infra.cloud_endpoint_connection.latency_var,
        cloud_endpoint_throughput: infra.cloud_endpoint_connection.throughput,

        edge_endpoint_latency_avg: infra.edge_endpoint_connection.latency_avg,
        edge_endpoint_latency_var: infra.edge_endpoint_connection.latency_var,
        edge_endpoint_throughput: infra.edge_endpoint_connection.throughput,

        external_physical_machines: infra.external_physical_machines.clone(),

        netperf: infra.netperf,
        base_path: infra.base_path.clone(),

        prefix_ip: infra.prefix_ip,
        middle_ip: infra.middle_ip,
        middle_ip_base: infra.middle_ip_base,

        delete: infra.delete,

        gcp_cloud: gcp.map(|g| g.cloud.clone()),
        gcp_edge: gcp.map(|g| g.edge.clone()),
        gcp_endpoint: gcp.map(|g| g.endpoint.clone()),
        gcp_region: gcp.map(|g| g.region.clone()),
        gcp_zone: gcp.map(|g| g.zone.clone()),
        gcp_project: gcp.map(|g| g.project.clone()),
        gcp_credentials: gcp.map(|g| g.credentials.clone()),
    }
}

// The free-form workload variables are merged into the same object as the
// typed benchmark fields, at the top level of `benchmark`.
fn flatten_benchmark(benchmark: &BenchmarkSpec) -> Result<Map<String, Value>> {
    let flat = FlatBenchmark {
        resource_manager: benchmark.resource_manager,
        resource_manager_only: benchmark.resource_manager_only,
        docker_pull: benchmark.docker_pull,
        application: benchmark.application.clone(),
        application_worker_cpu: benchmark.application_worker_cpu,
        application_worker_memory: benchmark.application_worker_memory,
        application_endpoint_cpu: benchmark.application_endpoint_cpu,
        application_endpoint_memory: benchmark.application_endpoint_memory,
        applications_per_worker: benchmark.applications_per_worker,
        cache_worker: benchmark.cache_worker,
        observability: benchmark.observability,
    };

    let Value::Object(mut map) = serde_json::to_value(flat)? else {
        anyhow::bail!("benchmark did not serialize to an object");
    };

    for (key, value) in &benchmark.application_vars {
        map.insert(key.clone(), value.clone());
    }

    Ok(map)
}

/// Serialize a canonical configuration to the flat JSON document the
/// provisioning backend consumes.
pub fn generate_canonical_json(config: &CanonicalConfiguration) -> Result<String> {
    let flat = FlatConfiguration {
        infrastructure: flatten_infrastructure(config),
        mode: config.mode,
        benchmark: config
            .benchmark
            .as_ref()
            .map(flatten_benchmark)
            .transpose()?,
    };

    let json = serde_json::to_string_pretty(&flat)?;
    Ok(json)
}
