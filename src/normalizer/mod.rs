use serde::Serialize;

use crate::parser::{
    GcpConfig, Provider, RawBenchmark, RawConfig, RawConnection, RawInfrastructure,
    ResourceManager, TierMap, WirelessNetworkPreset,
};

/// Fully-resolved network path characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub latency_avg: f64,
    pub latency_var: f64,
    pub throughput: f64,
}

/// Fully-resolved disk throughput, one map per direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadWriteSpeed {
    pub read_speed: TierMap,
    pub write_speed: TierMap,
}

/// Deployment mode derived from the node counts: the highest populated tier
/// wins, endpoint-only otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Cloud,
    Edge,
    Endpoint,
}

/// Fully-resolved infrastructure description. Every field carries either the
/// user-supplied value or a default; only the GCP sub-configuration remains
/// conditional on the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct InfrastructureSpec {
    pub provider: Provider,
    pub infra_only: bool,

    pub nodes: TierMap,
    pub cores: TierMap,
    pub memory: TierMap,
    pub quota: TierMap,

    pub read_write_speed: ReadWriteSpeed,
    pub wireless_network_preset: WirelessNetworkPreset,

    pub cpu_pin: bool,
    pub network_emulation: bool,

    pub cloud_connection: Connection,
    pub edge_connection: Connection,
    pub cloud_edge_connection: Connection,
    pub cloud_endpoint_connection: Connection,
    pub edge_endpoint_connection: Connection,

    pub external_physical_machines: Vec<String>,
    pub netperf: bool,
    pub base_path: String,

    pub prefix_ip: f64,
    pub middle_ip: f64,
    pub middle_ip_base: f64,

    pub delete: bool,

    pub gcp_config: Option<GcpConfig>,
}

/// Fully-resolved benchmark description.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSpec {
    pub resource_manager: ResourceManager,
    pub resource_manager_only: bool,
    pub docker_pull: bool,
    pub application: String,

    pub application_worker_cpu: f64,
    pub application_worker_memory: f64,
    pub application_endpoint_cpu: f64,
    pub application_endpoint_memory: f64,

    pub applications_per_worker: f64,

    pub application_vars: serde_json::Map<String, serde_json::Value>,

    pub cache_worker: bool,
    pub observability: bool,
}

/// The artifact handed downstream: a resolved infrastructure plus, unless the
/// deployment is infra-only, a resolved benchmark. Constructed once by
/// `normalize` and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalConfiguration {
    pub infrastructure: InfrastructureSpec,
    pub mode: DeploymentMode,
    pub benchmark: Option<BenchmarkSpec>,
}

// Per-path connection defaults. The intra-cloud path is assumed local and
// fast; any path touching an endpoint is bandwidth-constrained.
const CLOUD_CONNECTION: Connection = Connection {
    latency_avg: 0.0,
    latency_var: 0.0,
    throughput: 1000.0,
};
const EDGE_CONNECTION: Connection = Connection {
    latency_avg: 7.5,
    latency_var: 2.5,
    throughput: 1000.0,
};
const CLOUD_EDGE_CONNECTION: Connection = Connection {
    latency_avg: 7.5,
    latency_var: 2.5,
    throughput: 1000.0,
};
const CLOUD_ENDPOINT_CONNECTION: Connection = Connection {
    latency_avg: 45.0,
    latency_var: 5.0,
    throughput: 7.21,
};
const EDGE_ENDPOINT_CONNECTION: Connection = Connection {
    latency_avg: 7.5,
    latency_var: 2.5,
    throughput: 7.21,
};

const DEFAULT_PREFIX_IP: f64 = 192.168;
const DEFAULT_MIDDLE_IP: f64 = 100.0;
const DEFAULT_MIDDLE_IP_BASE: f64 = 90.0;
const DEFAULT_BASE_PATH: &str = "~";

// Headroom subtracted from the cloud core count when deriving worker
// resource requests.
const WORKER_HEADROOM: f64 = 0.5;

/// GCP settings used when provider = gcp and the user supplied none.
pub fn default_gcp_config() -> GcpConfig {
    GcpConfig {
        cloud: "e2-medium".to_string(),
        edge: "e2-small".to_string(),
        endpoint: "e2-micro".to_string(),
        region: "europe-west4".to_string(),
        zone: "europe-west4-a".to_string(),
        project: "continuum-123456".to_string(),
        credentials: "~/.ssh/continuum-123456-12a34b56c78d".to_string(),
    }
}

// Field-level merge: supplied values win, including explicit zeros.
fn resolve_connection(raw: Option<&RawConnection>, defaults: Connection) -> Connection {
    match raw {
        Some(connection) => Connection {
            latency_avg: connection.latency_avg.unwrap_or(defaults.latency_avg),
            latency_var: connection.latency_var.unwrap_or(defaults.latency_var),
            throughput: connection.throughput.unwrap_or(defaults.throughput),
        },
        None => defaults,
    }
}

fn resolve_mode(nodes: &TierMap) -> DeploymentMode {
    if nodes.edge > 0.0 {
        DeploymentMode::Edge
    } else if nodes.cloud > 0.0 {
        DeploymentMode::Cloud
    } else {
        DeploymentMode::Endpoint
    }
}

fn normalize_infrastructure(raw: &RawInfrastructure) -> InfrastructureSpec {
    let read_write_speed = match &raw.read_write_speed {
        Some(speed) => ReadWriteSpeed {
            read_speed: speed.read_speed.unwrap_or(TierMap::ZERO),
            write_speed: speed.write_speed.unwrap_or(TierMap::ZERO),
        },
        None => ReadWriteSpeed {
            read_speed: TierMap::ZERO,
            write_speed: TierMap::ZERO,
        },
    };

    // The GCP sub-configuration only exists for the gcp provider; for any
    // other provider it is dropped even when supplied.
    let gcp_config = match raw.provider {
        Provider::Gcp => Some(raw.gcp_config.clone().unwrap_or_else(default_gcp_config)),
        _ => None,
    };

    InfrastructureSpec {
        provider: raw.provider,
        infra_only: raw.infra_only.unwrap_or(false),

        nodes: raw.nodes,
        cores: raw.cores,
        memory: raw.memory,
        quota: raw.quota,

        read_write_speed,
        wireless_network_preset: raw
            .wireless_network_preset
            .unwrap_or(WirelessNetworkPreset::FourG),

        cpu_pin: raw.cpu_pin.unwrap_or(false),
        network_emulation: raw.network_emulation.unwrap_or(false),

        cloud_connection: resolve_connection(raw.cloud_connection.as_ref(), CLOUD_CONNECTION),
        edge_connection: resolve_connection(raw.edge_connection.as_ref(), EDGE_CONNECTION),
        cloud_edge_connection: resolve_connection(
            raw.cloud_edge_connection.as_ref(),
            CLOUD_EDGE_CONNECTION,
        ),
        cloud_endpoint_connection: resolve_connection(
            raw.cloud_endpoint_connection.as_ref(),
            CLOUD_ENDPOINT_CONNECTION,
        ),
        edge_endpoint_connection: resolve_connection(
            raw.edge_endpoint_connection.as_ref(),
            EDGE_ENDPOINT_CONNECTION,
        ),

        external_physical_machines: raw.external_physical_machines.clone().unwrap_or_default(),
        netperf: raw.netperf.unwrap_or(false),
        base_path: raw
            .base_path
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),

        prefix_ip: raw.prefix_ip.unwrap_or(DEFAULT_PREFIX_IP),
        middle_ip: raw.middle_ip.unwrap_or(DEFAULT_MIDDLE_IP),
        middle_ip_base: raw.middle_ip_base.unwrap_or(DEFAULT_MIDDLE_IP_BASE),

        delete: raw.delete.unwrap_or(false),

        gcp_config,
    }
}

// Requires the already-resolved infrastructure: worker requests derive from
// the cloud core count, endpoint requests from the endpoint core count.
fn normalize_benchmark(raw: &RawBenchmark, infrastructure: &InfrastructureSpec) -> BenchmarkSpec {
    BenchmarkSpec {
        resource_manager: raw.resource_manager,
        resource_manager_only: raw.resource_manager_only.unwrap_or(false),
        docker_pull: raw.docker_pull.unwrap_or(false),
        application: raw.application.clone(),

        application_worker_cpu: raw
            .application_worker_cpu
            .unwrap_or(infrastructure.cores.cloud - WORKER_HEADROOM),
        application_worker_memory: raw
            .application_worker_memory
            .unwrap_or(infrastructure.cores.cloud - WORKER_HEADROOM),
        application_endpoint_cpu: raw
            .application_endpoint_cpu
            .unwrap_or(infrastructure.cores.endpoint),
        application_endpoint_memory: raw
            .application_endpoint_memory
            .unwrap_or(infrastructure.cores.endpoint),

        applications_per_worker: raw.applications_per_worker.unwrap_or(1.0),

        application_vars: raw.application_vars.clone().unwrap_or_default(),

        cache_worker: raw.cache_worker.unwrap_or(false),
        observability: raw.observability.unwrap_or(false),
    }
}

/// Resolve a raw configuration into a canonical one. Pure and infallible:
/// every defaultable field that is unset receives its default, present values
/// (including explicit zeros) are preserved, and no semantic checks happen
/// here. Infrastructure is resolved first, then the benchmark, whose derived
/// defaults read the resolved infrastructure.
pub fn normalize(raw: &RawConfig) -> CanonicalConfiguration {
    let infrastructure = normalize_infrastructure(&raw.infrastructure);
    let mode = resolve_mode(&infrastructure.nodes);

    // An infra-only deployment carries no benchmark, even if one was supplied.
    let benchmark = if infrastructure.infra_only {
        None
    } else {
        raw.benchmark
            .as_ref()
            .map(|benchmark| normalize_benchmark(benchmark, &infrastructure))
    };

    CanonicalConfiguration {
        infrastructure,
        mode,
        benchmark,
    }
}
