use super::Validator;
use crate::normalizer::{Connection, ReadWriteSpeed};
use crate::parser::{Tier, TierMap};

fn is_unsigned_int(value: f64) -> bool {
    value == value.floor() && value >= 0.0
}

fn is_unsigned(value: f64) -> bool {
    value >= 0.0
}

fn is_octet(value: f64) -> bool {
    is_unsigned_int(value) && value <= 255.0
}

// Tiers with zero nodes are exempt from per-tier resource rules.
fn active_tiers(nodes: &TierMap) -> impl Iterator<Item = Tier> + '_ {
    Tier::ALL.into_iter().filter(|tier| nodes.get(*tier) >= 1.0)
}

fn tier_map_unsigned_int(map: &TierMap, name: &str) -> Validator {
    if Tier::ALL.iter().all(|tier| is_unsigned_int(map.get(*tier))) {
        Validator::pass()
    } else {
        Validator::fail(format!(
            "Invalid values passed in {}: cloud, edge and endpoint values must be non-negative integers",
            name
        ))
    }
}

/// Validate the node counts: at least one node across all tiers, and every
/// count a non-negative integer. Both checks report independently.
pub fn validate_nodes(nodes: &TierMap) -> Validator {
    let mut messages = Vec::new();

    if nodes.sum() <= 0.0 {
        messages.push(
            "At least 1 node needs to be created across the cloud, edge and endpoint tiers"
                .to_string(),
        );
    }

    let well_formed = tier_map_unsigned_int(nodes, "nodes");
    messages.extend(well_formed.messages);

    if messages.is_empty() {
        Validator::pass()
    } else {
        Validator::fail_all(messages)
    }
}

/// Validate the core counts: non-negative integers everywhere, and at least
/// one core for every tier that has at least one node.
pub fn validate_cores(nodes: &TierMap, cores: &TierMap) -> Validator {
    let mut messages = Vec::new();

    let well_formed = tier_map_unsigned_int(cores, "cores");
    messages.extend(well_formed.messages);

    for tier in active_tiers(nodes) {
        if cores.get(tier) < 1.0 {
            messages.push(format!("At least one core is needed per {} node", tier));
        }
    }

    if messages.is_empty() {
        Validator::pass()
    } else {
        Validator::fail_all(messages)
    }
}

/// Validate the CPU quota: within [0.1, 1.0] for every active tier.
pub fn validate_quota(nodes: &TierMap, quota: &TierMap) -> Validator {
    let violations: Vec<String> = active_tiers(nodes)
        .filter(|tier| {
            let value = quota.get(*tier);
            !(0.1..=1.0).contains(&value)
        })
        .map(|tier| tier.to_string())
        .collect();

    if violations.is_empty() {
        Validator::pass()
    } else {
        Validator::fail(format!(
            "Quota values must be: 0.1 <= x <= 1.0 (violated by: {})",
            violations.join(", ")
        ))
    }
}

/// Validate the memory sizes: at least 1 GB for every active tier.
pub fn validate_memory(nodes: &TierMap, memory: &TierMap) -> Validator {
    let violations: Vec<String> = active_tiers(nodes)
        .filter(|tier| memory.get(*tier) < 1.0)
        .map(|tier| tier.to_string())
        .collect();

    if violations.is_empty() {
        Validator::pass()
    } else {
        Validator::fail(format!(
            "Memory values must be at least 1 (violated by: {})",
            violations.join(", ")
        ))
    }
}

/// Validate disk throughput: both maps must hold non-negative integers.
/// Fails closed when the whole structure is missing; missing never means
/// unlimited, only the normalizer's explicit zero default does.
pub fn validate_read_write_speed(speed: Option<&ReadWriteSpeed>) -> Validator {
    let Some(speed) = speed else {
        return Validator::fail("Invalid read/write speed: no values set");
    };

    let mut messages = Vec::new();
    let read = tier_map_unsigned_int(&speed.read_speed, "read speed");
    let write = tier_map_unsigned_int(&speed.write_speed, "write speed");
    messages.extend(read.messages);
    messages.extend(write.messages);

    if messages.is_empty() {
        Validator::pass()
    } else {
        Validator::fail_all(messages)
    }
}

/// Validate one network path's characteristics. The path label ends up in the
/// violation message so the user knows which connection to fix.
pub fn validate_connection(path: &str, connection: Option<&Connection>) -> Validator {
    let message = format!(
        "Invalid connection settings for the {} path. The following needs to hold: latency avg >= 0, latency var >= 0 and throughput >= 1",
        path
    );

    let Some(connection) = connection else {
        return Validator::fail(message);
    };

    if is_unsigned(connection.latency_avg)
        && is_unsigned(connection.latency_var)
        && connection.throughput >= 1.0
    {
        Validator::pass()
    } else {
        Validator::fail(message)
    }
}

/// Validate the two-octet address prefix encoded as one decimal number: the
/// integer part and the x1000-scaled fractional part are each one octet.
/// A value of 0 fails; octet 0 in the integer position is not representable
/// through this encoding.
pub fn validate_prefix_ip(prefix_ip: f64) -> Validator {
    let message = format!(
        "prefixIP needs to be of the format XXX.XXX where each XXX is between 0 and 255, actual value: {}",
        prefix_ip
    );

    // Anything below 1 would need octet 0 in the integer position.
    if prefix_ip < 1.0 {
        return Validator::fail(message);
    }

    // Tolerate f64 representation error in the scaled fraction (192.168 * 1000
    // is not exactly 192168), but reject anything beyond three decimals.
    let millis = prefix_ip * 1000.0;
    if (millis - millis.round()).abs() > 1e-6 {
        return Validator::fail(message);
    }

    let first = prefix_ip.floor();
    let second = millis.round() % 1000.0;
    if is_octet(first) && is_octet(second) {
        Validator::pass()
    } else {
        Validator::fail(message)
    }
}

/// Validate a single-octet field of the addressing scheme.
pub fn validate_8bit_field(name: &str, value: f64) -> Validator {
    if is_octet(value) {
        Validator::pass()
    } else {
        Validator::fail(format!(
            "{} needs to be an integer between 0 and 255, actual value: {}",
            name, value
        ))
    }
}

/// Validate a benchmark resource field against its floor. Integer fields are
/// additionally checked for integrality.
pub fn validate_unsigned_number(name: &str, value: f64, integer: bool, minimum: f64) -> Validator {
    let well_formed = if integer {
        is_unsigned_int(value)
    } else {
        is_unsigned(value)
    };

    if well_formed && value >= minimum {
        Validator::pass()
    } else {
        let kind = if integer { "Integer" } else { "numeric" };
        Validator::fail(format!(
            "{} needs to have a non-negative {} value of at least {}, actual value: {}",
            name, kind, minimum, value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_map(cloud: f64, edge: f64, endpoint: f64) -> TierMap {
        TierMap {
            cloud,
            edge,
            endpoint,
        }
    }

    #[test]
    fn test_nodes_at_least_one() {
        let outcome = validate_nodes(&tier_map(0.0, 0.0, 0.0));
        assert!(!outcome.success);
        assert_eq!(outcome.messages.len(), 1);
    }

    #[test]
    fn test_nodes_non_integer_and_empty_reports_both() {
        let outcome = validate_nodes(&tier_map(0.0, -1.0, 0.5));
        assert!(!outcome.success);
        assert_eq!(outcome.messages.len(), 2);
    }

    #[test]
    fn test_nodes_valid() {
        assert!(validate_nodes(&tier_map(2.0, 0.0, 1.0)).success);
    }

    #[test]
    fn test_cores_exempt_inactive_tiers() {
        // edge has no nodes, so edge cores 0 is fine
        let outcome = validate_cores(&tier_map(1.0, 0.0, 1.0), &tier_map(2.0, 0.0, 1.0));
        assert!(outcome.success);
    }

    #[test]
    fn test_cores_missing_for_active_tier() {
        let outcome = validate_cores(&tier_map(1.0, 1.0, 0.0), &tier_map(2.0, 0.0, 0.0));
        assert!(!outcome.success);
        assert_eq!(outcome.messages.len(), 1);
        assert!(outcome.messages[0].contains("edge"));
    }

    #[test]
    fn test_cores_non_integer_rejected() {
        let outcome = validate_cores(&tier_map(1.0, 0.0, 0.0), &tier_map(2.5, 0.0, 0.0));
        assert!(!outcome.success);
    }

    #[test]
    fn test_quota_bounds() {
        let nodes = tier_map(1.0, 1.0, 1.0);
        assert!(validate_quota(&nodes, &tier_map(0.1, 0.5, 1.0)).success);
        assert!(!validate_quota(&nodes, &tier_map(0.05, 0.5, 1.0)).success);
        assert!(!validate_quota(&nodes, &tier_map(0.5, 1.2, 1.0)).success);
    }

    #[test]
    fn test_quota_exempt_when_no_nodes() {
        // all values out of range, but no tier is active
        let outcome = validate_quota(&tier_map(0.0, 0.0, 0.0), &tier_map(5.0, -1.0, 0.0));
        assert!(outcome.success);
    }

    #[test]
    fn test_memory_floor() {
        let nodes = tier_map(1.0, 0.0, 1.0);
        assert!(validate_memory(&nodes, &tier_map(1.0, 0.0, 4.0)).success);
        let outcome = validate_memory(&nodes, &tier_map(0.5, 0.0, 4.0));
        assert!(!outcome.success);
        assert!(outcome.messages[0].contains("cloud"));
    }

    #[test]
    fn test_read_write_speed_fails_closed_when_absent() {
        assert!(!validate_read_write_speed(None).success);
    }

    #[test]
    fn test_read_write_speed_sides_reported_independently() {
        let speed = ReadWriteSpeed {
            read_speed: tier_map(-1.0, 0.0, 0.0),
            write_speed: tier_map(0.0, 0.5, 0.0),
        };
        let outcome = validate_read_write_speed(Some(&speed));
        assert!(!outcome.success);
        assert_eq!(outcome.messages.len(), 2);
        assert!(outcome.messages[0].contains("read speed"));
        assert!(outcome.messages[1].contains("write speed"));
    }

    #[test]
    fn test_read_write_speed_zero_is_valid() {
        let speed = ReadWriteSpeed {
            read_speed: TierMap::ZERO,
            write_speed: TierMap::ZERO,
        };
        assert!(validate_read_write_speed(Some(&speed)).success);
    }

    #[test]
    fn test_connection_bounds() {
        let valid = Connection {
            latency_avg: 0.0,
            latency_var: 0.0,
            throughput: 1.0,
        };
        assert!(validate_connection("cloud", Some(&valid)).success);

        let slow = Connection {
            throughput: 0.5,
            ..valid
        };
        let outcome = validate_connection("edge-endpoint", Some(&slow));
        assert!(!outcome.success);
        assert!(outcome.messages[0].contains("edge-endpoint path"));

        let negative = Connection {
            latency_avg: -1.0,
            ..valid
        };
        assert!(!validate_connection("cloud", Some(&negative)).success);
    }

    #[test]
    fn test_connection_fails_closed_when_absent() {
        let outcome = validate_connection("cloud-endpoint", None);
        assert!(!outcome.success);
        assert!(outcome.messages[0].contains("cloud-endpoint"));
    }

    #[test]
    fn test_prefix_ip_default_is_valid() {
        assert!(validate_prefix_ip(192.168).success);
    }

    #[test]
    fn test_prefix_ip_zero_fails() {
        assert!(!validate_prefix_ip(0.0).success);
    }

    #[test]
    fn test_prefix_ip_integer_octet_zero_rejected() {
        // a fractional octet alone cannot stand in for the integer one
        assert!(!validate_prefix_ip(0.1).success);
        assert!(!validate_prefix_ip(0.255).success);
        assert!(!validate_prefix_ip(-0.5).success);
        assert!(validate_prefix_ip(1.1).success);
    }

    #[test]
    fn test_prefix_ip_octet_out_of_range() {
        assert!(!validate_prefix_ip(256.1).success);
        assert!(!validate_prefix_ip(10.999).success);
        assert!(validate_prefix_ip(10.255).success);
    }

    #[test]
    fn test_prefix_ip_too_many_decimals() {
        assert!(!validate_prefix_ip(192.1684).success);
    }

    #[test]
    fn test_prefix_ip_trailing_zeros_assumed() {
        // 200.0 reads as 200.000
        assert!(validate_prefix_ip(200.0).success);
    }

    #[test]
    fn test_8bit_field() {
        assert!(validate_8bit_field("middleIP", 0.0).success);
        assert!(validate_8bit_field("middleIP", 255.0).success);
        assert!(!validate_8bit_field("middleIP", 256.0).success);
        assert!(!validate_8bit_field("middleIP", -1.0).success);
        assert!(!validate_8bit_field("middleIP", 10.5).success);
    }

    #[test]
    fn test_unsigned_number_float_floor() {
        assert!(validate_unsigned_number("applicationWorkerCPU", 0.1, false, 0.1).success);
        assert!(!validate_unsigned_number("applicationWorkerCPU", 0.05, false, 0.1).success);
        assert!(!validate_unsigned_number("applicationWorkerCPU", -1.0, false, 0.1).success);
    }

    #[test]
    fn test_unsigned_number_integer_floor() {
        assert!(validate_unsigned_number("applicationsPerWorker", 1.0, true, 1.0).success);
        assert!(!validate_unsigned_number("applicationsPerWorker", 1.5, true, 1.0).success);
        assert!(!validate_unsigned_number("applicationsPerWorker", 0.0, true, 1.0).success);
    }
}
