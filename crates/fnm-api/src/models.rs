//! Host group and FlowSpec models mirroring the appliance wire format.
//!
//! Field names are the appliance's own and must not be renamed. The read
//! shape ([`HostGroup`]) mandates every field; the write shape
//! ([`HostGroupSettings`]) allows any subset, because host group
//! configuration is written one option at a time.

use serde::{Deserialize, Serialize};

use fnm_core::options::{
    HostGroupBoolOption, HostGroupIntOption, HostGroupOption, HostGroupStrOption,
};

/// A host group as returned by the appliance, with every field present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostGroup {
    /// Unique group name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Monitored networks in CIDR form.
    pub networks: Vec<String>,
    /// Master ban toggle.
    pub enable_ban: bool,
    /// Ban on total packet rate.
    pub ban_for_pps: bool,
    /// Ban on total bandwidth.
    pub ban_for_bandwidth: bool,
    /// Ban on total flows.
    pub ban_for_flows: bool,
    /// Ban on TCP bandwidth.
    pub ban_for_tcp_bandwidth: bool,
    /// Ban on TCP SYN bandwidth.
    pub ban_for_tcp_syn_bandwidth: bool,
    /// Ban on UDP bandwidth.
    pub ban_for_udp_bandwidth: bool,
    /// Ban on ICMP bandwidth.
    pub ban_for_icmp_bandwidth: bool,
    /// Ban on TCP packet rate.
    pub ban_for_tcp_pps: bool,
    /// Ban on TCP SYN packet rate.
    pub ban_for_tcp_syn_pps: bool,
    /// Ban on UDP packet rate.
    pub ban_for_udp_pps: bool,
    /// Ban on ICMP packet rate.
    pub ban_for_icmp_pps: bool,
    /// Total packet-rate threshold.
    pub threshold_pps: u64,
    /// Total bandwidth threshold in mbps.
    pub threshold_mbps: u64,
    /// Total flow threshold.
    pub threshold_flows: u64,
    /// TCP bandwidth threshold in mbps.
    pub threshold_tcp_mbps: u64,
    /// TCP SYN bandwidth threshold in mbps.
    pub threshold_tcp_syn_mbps: u64,
    /// UDP bandwidth threshold in mbps.
    pub threshold_udp_mbps: u64,
    /// ICMP bandwidth threshold in mbps.
    pub threshold_icmp_mbps: u64,
    /// TCP packet-rate threshold.
    pub threshold_tcp_pps: u64,
    /// TCP SYN packet-rate threshold.
    pub threshold_tcp_syn_pps: u64,
    /// UDP packet-rate threshold.
    pub threshold_udp_pps: u64,
    /// ICMP packet-rate threshold.
    pub threshold_icmp_pps: u64,
}

/// Host group settings for creation or update; any subset may be supplied.
///
/// The appliance stages each option through its own PUT call, so
/// [`HostGroupSettings::to_options`] expands the populated fields into one
/// kind-tagged option per call. The `networks` list expands to one option
/// per network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostGroupSettings {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Monitored networks in CIDR form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<String>>,
    /// Master ban toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_ban: Option<bool>,
    /// Ban on total packet rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_pps: Option<bool>,
    /// Ban on total bandwidth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_bandwidth: Option<bool>,
    /// Ban on total flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_flows: Option<bool>,
    /// Ban on TCP bandwidth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_tcp_bandwidth: Option<bool>,
    /// Ban on TCP SYN bandwidth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_tcp_syn_bandwidth: Option<bool>,
    /// Ban on UDP bandwidth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_udp_bandwidth: Option<bool>,
    /// Ban on ICMP bandwidth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_icmp_bandwidth: Option<bool>,
    /// Ban on TCP packet rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_tcp_pps: Option<bool>,
    /// Ban on TCP SYN packet rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_tcp_syn_pps: Option<bool>,
    /// Ban on UDP packet rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_udp_pps: Option<bool>,
    /// Ban on ICMP packet rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_for_icmp_pps: Option<bool>,
    /// Total packet-rate threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_pps: Option<u64>,
    /// Total bandwidth threshold in mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_mbps: Option<u64>,
    /// Total flow threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_flows: Option<u64>,
    /// TCP bandwidth threshold in mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_tcp_mbps: Option<u64>,
    /// TCP SYN bandwidth threshold in mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_tcp_syn_mbps: Option<u64>,
    /// UDP bandwidth threshold in mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_udp_mbps: Option<u64>,
    /// ICMP bandwidth threshold in mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_icmp_mbps: Option<u64>,
    /// TCP packet-rate threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_tcp_pps: Option<u64>,
    /// TCP SYN packet-rate threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_tcp_syn_pps: Option<u64>,
    /// UDP packet-rate threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_udp_pps: Option<u64>,
    /// ICMP packet-rate threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_icmp_pps: Option<u64>,
}

impl HostGroupSettings {
    /// Expand the populated fields into per-call options, list values one
    /// option per element.
    #[must_use]
    pub fn to_options(&self) -> Vec<HostGroupOption> {
        let mut options = Vec::new();

        if let Some(description) = &self.description {
            options.push(HostGroupOption::Str(
                HostGroupStrOption::Description,
                description.clone(),
            ));
        }
        if let Some(networks) = &self.networks {
            for network in networks {
                options.push(HostGroupOption::Str(
                    HostGroupStrOption::Networks,
                    network.clone(),
                ));
            }
        }

        let bools = [
            (HostGroupBoolOption::EnableBan, self.enable_ban),
            (HostGroupBoolOption::BanForPps, self.ban_for_pps),
            (HostGroupBoolOption::BanForBandwidth, self.ban_for_bandwidth),
            (HostGroupBoolOption::BanForFlows, self.ban_for_flows),
            (
                HostGroupBoolOption::BanForTcpBandwidth,
                self.ban_for_tcp_bandwidth,
            ),
            (
                HostGroupBoolOption::BanForTcpSynBandwidth,
                self.ban_for_tcp_syn_bandwidth,
            ),
            (
                HostGroupBoolOption::BanForUdpBandwidth,
                self.ban_for_udp_bandwidth,
            ),
            (
                HostGroupBoolOption::BanForIcmpBandwidth,
                self.ban_for_icmp_bandwidth,
            ),
            (HostGroupBoolOption::BanForTcpPps, self.ban_for_tcp_pps),
            (
                HostGroupBoolOption::BanForTcpSynPps,
                self.ban_for_tcp_syn_pps,
            ),
            (HostGroupBoolOption::BanForUdpPps, self.ban_for_udp_pps),
            (HostGroupBoolOption::BanForIcmpPps, self.ban_for_icmp_pps),
        ];
        for (key, value) in bools {
            if let Some(value) = value {
                options.push(HostGroupOption::Bool(key, value));
            }
        }

        let ints = [
            (HostGroupIntOption::ThresholdPps, self.threshold_pps),
            (HostGroupIntOption::ThresholdMbps, self.threshold_mbps),
            (HostGroupIntOption::ThresholdFlows, self.threshold_flows),
            (HostGroupIntOption::ThresholdTcpMbps, self.threshold_tcp_mbps),
            (
                HostGroupIntOption::ThresholdTcpSynMbps,
                self.threshold_tcp_syn_mbps,
            ),
            (HostGroupIntOption::ThresholdUdpMbps, self.threshold_udp_mbps),
            (
                HostGroupIntOption::ThresholdIcmpMbps,
                self.threshold_icmp_mbps,
            ),
            (HostGroupIntOption::ThresholdTcpPps, self.threshold_tcp_pps),
            (
                HostGroupIntOption::ThresholdTcpSynPps,
                self.threshold_tcp_syn_pps,
            ),
            (HostGroupIntOption::ThresholdUdpPps, self.threshold_udp_pps),
            (
                HostGroupIntOption::ThresholdIcmpPps,
                self.threshold_icmp_pps,
            ),
        ];
        for (key, value) in ints {
            if let Some(value) = value {
                options.push(HostGroupOption::Int(key, value));
            }
        }

        options
    }
}

/// Rate-limit action of a FlowSpec announcement. A rate of zero drops
/// matching traffic entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowSpecAction {
    /// Rate limit in bytes per second; zero means drop.
    pub rate: u64,
}

/// A BGP FlowSpec announcement, immutable once written.
///
/// All match fields are optional; the appliance echoes rules back in the
/// same shape under a mitigation UUID it assigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowSpecRule {
    /// Source prefix in CIDR form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prefix: Option<String>,
    /// Destination prefix in CIDR form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_prefix: Option<String>,
    /// Destination ports to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_ports: Option<Vec<u16>>,
    /// Source ports to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ports: Option<Vec<u16>>,
    /// Packet lengths to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_lengths: Option<Vec<u32>>,
    /// Protocol names to match (e.g. `tcp`, `udp`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<String>>,
    /// Fragmentation flags to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragmentation_flags: Option<Vec<String>>,
    /// TCP flags to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_flags: Option<Vec<String>>,
    /// TTL values to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttls: Option<Vec<u8>>,
    /// VLAN identifiers to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlans: Option<Vec<u16>>,
    /// Action type (e.g. `rate-limit`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// Rate-limit action parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<FlowSpecAction>,
    /// IPv4 next hops for redirected traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_nexthops: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_expand_lists_to_one_option_per_element() {
        let settings = HostGroupSettings {
            networks: Some(vec!["10.0.0.0/24".to_string(), "10.0.1.0/24".to_string()]),
            ..HostGroupSettings::default()
        };

        let options = settings.to_options();
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|opt| opt.key() == "networks"));
        assert_eq!(options[0].value().to_string(), "10.0.0.0/24");
        assert_eq!(options[1].value().to_string(), "10.0.1.0/24");
    }

    #[test]
    fn settings_expand_scalars_with_their_keys() {
        let settings = HostGroupSettings {
            description: Some("edge customers".to_string()),
            enable_ban: Some(true),
            ban_for_pps: Some(false),
            threshold_mbps: Some(500),
            ..HostGroupSettings::default()
        };

        let options = settings.to_options();
        let rendered: Vec<(&str, String)> = options
            .iter()
            .map(|opt| (opt.key(), opt.value().to_string()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("description", "edge customers".to_string()),
                ("enable_ban", "enable".to_string()),
                ("ban_for_pps", "disable".to_string()),
                ("threshold_mbps", "500".to_string()),
            ]
        );
    }

    #[test]
    fn empty_settings_expand_to_nothing() {
        assert!(HostGroupSettings::default().to_options().is_empty());
    }

    #[test]
    fn settings_serialization_skips_unset_fields() {
        let settings = HostGroupSettings {
            enable_ban: Some(true),
            ..HostGroupSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"enable_ban":true}"#);
    }

    #[test]
    fn host_group_requires_every_field() {
        // Dropping a threshold key must fail deserialization.
        let mut value = serde_json::to_value(sample_host_group()).unwrap();
        value.as_object_mut().unwrap().remove("threshold_pps");
        assert!(serde_json::from_value::<HostGroup>(value).is_err());
    }

    #[test]
    fn host_group_round_trips() {
        let group = sample_host_group();
        let json = serde_json::to_string(&group).unwrap();
        let back: HostGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn flowspec_rule_skips_unset_match_fields() {
        let rule = FlowSpecRule {
            destination_prefix: Some("192.0.2.10/32".to_string()),
            action_type: Some("rate-limit".to_string()),
            action: Some(FlowSpecAction { rate: 0 }),
            ..FlowSpecRule::default()
        };

        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "destination_prefix": "192.0.2.10/32",
                "action_type": "rate-limit",
                "action": {"rate": 0}
            })
        );
    }

    fn sample_host_group() -> HostGroup {
        HostGroup {
            name: "grp1".to_string(),
            description: "edge customers".to_string(),
            networks: vec!["10.0.0.0/24".to_string()],
            enable_ban: true,
            ban_for_pps: true,
            ban_for_bandwidth: true,
            ban_for_flows: false,
            ban_for_tcp_bandwidth: false,
            ban_for_tcp_syn_bandwidth: false,
            ban_for_udp_bandwidth: false,
            ban_for_icmp_bandwidth: false,
            ban_for_tcp_pps: false,
            ban_for_tcp_syn_pps: false,
            ban_for_udp_pps: false,
            ban_for_icmp_pps: false,
            threshold_pps: 100_000,
            threshold_mbps: 1_000,
            threshold_flows: 5_000,
            threshold_tcp_mbps: 0,
            threshold_tcp_syn_mbps: 0,
            threshold_udp_mbps: 0,
            threshold_icmp_mbps: 0,
            threshold_tcp_pps: 0,
            threshold_tcp_syn_pps: 0,
            threshold_udp_pps: 0,
            threshold_icmp_pps: 0,
        }
    }
}
