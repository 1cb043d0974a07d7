use serde::{Deserialize, Serialize};
use std::fmt;

pub mod json;
pub mod yaml;

/// The three deployment tiers resources are distributed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cloud,
    Edge,
    Endpoint,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Cloud, Tier::Edge, Tier::Endpoint];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Cloud => write!(f, "cloud"),
            Tier::Edge => write!(f, "edge"),
            Tier::Endpoint => write!(f, "endpoint"),
        }
    }
}

/// One numeric quantity per tier (node counts, cores, memory, quota, disk speed).
/// All three entries are required wherever a TierMap appears; values stay f64 so
/// that integrality is checked by the validator, not by deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMap {
    pub cloud: f64,
    pub edge: f64,
    pub endpoint: f64,
}

impl TierMap {
    pub const ZERO: TierMap = TierMap {
        cloud: 0.0,
        edge: 0.0,
        endpoint: 0.0,
    };

    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Cloud => self.cloud,
            Tier::Edge => self.edge,
            Tier::Endpoint => self.endpoint,
        }
    }

    pub fn sum(&self) -> f64 {
        self.cloud + self.edge + self.endpoint
    }
}

/// Provisioning backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Qemu,
    Gcp,
    Baremetal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WirelessNetworkPreset {
    #[serde(rename = "4g")]
    FourG,
    #[serde(rename = "5g")]
    FiveG,
}

/// Resource manager deployed on top of the infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceManager {
    Kubernetes,
    Kubeedge,
    Mist,
    None,
    Kubecontrol,
}

/// GCP-specific settings, required only when provider = gcp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpConfig {
    pub cloud: String,
    pub edge: String,
    pub endpoint: String,
    pub region: String,
    pub zone: String,
    pub project: String,
    pub credentials: String,
}

/// Raw per-path network characteristics; every field is defaultable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConnection {
    pub latency_avg: Option<f64>,
    pub latency_var: Option<f64>,
    pub throughput: Option<f64>,
}

/// Raw disk throughput; each side is defaultable independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReadWriteSpeed {
    pub read_speed: Option<TierMap>,
    pub write_speed: Option<TierMap>,
}

/// User-authored infrastructure description. Only provider and the four
/// resource TierMaps are mandatory; everything else is filled in by the
/// normalizer when unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInfrastructure {
    pub provider: Provider,
    pub infra_only: Option<bool>,

    pub nodes: TierMap,
    pub cores: TierMap,
    pub memory: TierMap,
    pub quota: TierMap,

    pub read_write_speed: Option<RawReadWriteSpeed>,
    pub wireless_network_preset: Option<WirelessNetworkPreset>,

    pub cpu_pin: Option<bool>,
    pub network_emulation: Option<bool>,

    pub cloud_connection: Option<RawConnection>,
    pub edge_connection: Option<RawConnection>,
    pub cloud_edge_connection: Option<RawConnection>,
    #[serde(rename = "cloudEndPointConnection")]
    pub cloud_endpoint_connection: Option<RawConnection>,
    #[serde(rename = "edgeEndPointConnection")]
    pub edge_endpoint_connection: Option<RawConnection>,

    pub external_physical_machines: Option<Vec<String>>,
    pub netperf: Option<bool>,
    pub base_path: Option<String>,

    // A two-octet address prefix encoded as one decimal number (XXX.XXX),
    // plus the two single-octet fields of the addressing scheme.
    #[serde(rename = "prefixIP")]
    pub prefix_ip: Option<f64>,
    #[serde(rename = "middleIP")]
    pub middle_ip: Option<f64>,
    #[serde(rename = "middleIPBase")]
    pub middle_ip_base: Option<f64>,

    pub delete: Option<bool>,

    pub gcp_config: Option<GcpConfig>,
}

/// User-authored benchmark description. The resource manager and the workload
/// identifier are mandatory; resource requests are defaultable, some derived
/// from the resolved infrastructure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBenchmark {
    pub resource_manager: ResourceManager,
    pub resource_manager_only: Option<bool>,
    pub docker_pull: Option<bool>,

    // Must name an existing workload module; membership is checked by the
    // application loader, not here.
    pub application: String,

    #[serde(rename = "applicationWorkerCPU")]
    pub application_worker_cpu: Option<f64>,
    pub application_worker_memory: Option<f64>,
    #[serde(rename = "applicationEndpointCPU")]
    pub application_endpoint_cpu: Option<f64>,
    pub application_endpoint_memory: Option<f64>,

    pub applications_per_worker: Option<f64>,

    /// Free-form workload variables, merged into the benchmark object on output.
    pub application_vars: Option<serde_json::Map<String, serde_json::Value>>,

    pub cache_worker: Option<bool>,
    pub observability: Option<bool>,
}

/// Top-level raw configuration as authored by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    pub infrastructure: RawInfrastructure,
    pub benchmark: Option<RawBenchmark>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "infrastructure": {
                "provider": "qemu",
                "nodes": { "cloud": 2, "edge": 0, "endpoint": 0 },
                "cores": { "cloud": 2, "edge": 2, "endpoint": 2 },
                "memory": { "cloud": 5, "edge": 1, "endpoint": 8 },
                "quota": { "cloud": 0.5, "edge": 0.8, "endpoint": 0.4 }
            }
        }"#
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: RawConfig = serde_json::from_str(minimal_json()).unwrap();
        assert_eq!(config.infrastructure.provider, Provider::Qemu);
        assert_eq!(config.infrastructure.nodes.cloud, 2.0);
        assert!(config.infrastructure.read_write_speed.is_none());
        assert!(config.benchmark.is_none());
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let config: RawConfig = serde_json::from_str(
            r#"{
                "infrastructure": {
                    "provider": "gcp",
                    "nodes": { "cloud": 1, "edge": 0, "endpoint": 0 },
                    "cores": { "cloud": 2, "edge": 0, "endpoint": 0 },
                    "memory": { "cloud": 4, "edge": 0, "endpoint": 0 },
                    "quota": { "cloud": 1.0, "edge": 0, "endpoint": 0 },
                    "infraOnly": true,
                    "cpuPin": false,
                    "cloudEndPointConnection": { "latencyAvg": 40 },
                    "prefixIP": 10.20,
                    "middleIP": 101,
                    "middleIPBase": 91
                }
            }"#,
        )
        .unwrap();

        let infra = &config.infrastructure;
        assert_eq!(infra.infra_only, Some(true));
        assert_eq!(infra.cpu_pin, Some(false));
        assert_eq!(
            infra.cloud_endpoint_connection.unwrap().latency_avg,
            Some(40.0)
        );
        assert_eq!(infra.prefix_ip, Some(10.20));
        assert_eq!(infra.middle_ip, Some(101.0));
        assert_eq!(infra.middle_ip_base, Some(91.0));
    }

    #[test]
    fn test_explicit_zero_stays_present() {
        let config: RawConfig = serde_json::from_str(
            r#"{
                "infrastructure": {
                    "provider": "qemu",
                    "nodes": { "cloud": 1, "edge": 0, "endpoint": 0 },
                    "cores": { "cloud": 2, "edge": 0, "endpoint": 0 },
                    "memory": { "cloud": 4, "edge": 0, "endpoint": 0 },
                    "quota": { "cloud": 1.0, "edge": 0, "endpoint": 0 },
                    "cloudConnection": { "latencyAvg": 0 }
                }
            }"#,
        )
        .unwrap();

        let connection = config.infrastructure.cloud_connection.unwrap();
        assert_eq!(connection.latency_avg, Some(0.0));
        assert_eq!(connection.throughput, None);
    }

    #[test]
    fn test_unknown_resource_manager_rejected() {
        let result: Result<RawBenchmark, _> = serde_json::from_str(
            r#"{ "resourceManager": "nomad", "application": "empty" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_map_requires_all_tiers() {
        let result: Result<TierMap, _> =
            serde_json::from_str(r#"{ "cloud": 1, "edge": 0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wireless_preset_renames() {
        let preset: WirelessNetworkPreset = serde_json::from_str(r#""5g""#).unwrap();
        assert_eq!(preset, WirelessNetworkPreset::FiveG);
    }
}
