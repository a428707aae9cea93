//! Attack notification payload pushed by the appliance.
//!
//! When a host group trips its thresholds the appliance POSTs a JSON
//! document to a configured webhook. This module only defines the schema
//! for decoding that document; nothing here is ever sent to the appliance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::FlowSpecRule;
use fnm_core::uuid::AttackUuid;

/// What the appliance did, or is reporting, for the affected host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CallbackAction {
    /// Traffic to the host was blocked.
    Ban,
    /// A previous ban was lifted.
    Unban,
    /// Periodic status report for an ongoing attack.
    AttackStatus,
    /// Part of the host's traffic was blocked.
    PartialBlock,
    /// A previous partial block was lifted.
    PartialUnblock,
}

/// Whether the event concerns a single host or a whole host group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertScope {
    /// A single monitored host.
    Host,
    /// An entire host group.
    Hostgroup,
}

/// Which traffic dimensions a threshold fired on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThresholdFlags {
    /// Flow count threshold fired.
    pub flows: bool,
    /// Bandwidth threshold fired.
    pub mbits: bool,
    /// Packet-rate threshold fired.
    pub packets: bool,
}

/// Per-threshold detail for flexible threshold triggers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlexibleThresholdDetail {
    /// Fired for incoming traffic.
    pub incoming: bool,
    /// Fired for outgoing traffic.
    pub outgoing: bool,
    /// Incoming dimensions that fired.
    pub incoming_details: ThresholdFlags,
    /// Outgoing dimensions that fired.
    pub outgoing_details: ThresholdFlags,
}

/// Identification and traffic counters for a detected attack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttackDetails {
    /// Attack UUID assigned by the appliance.
    pub attack_uuid: AttackUuid,
    /// Severity label.
    pub attack_severity: String,
    /// Host group the target belongs to.
    pub host_group: String,
    /// Parent host group, if nested.
    pub parent_host_group: String,
    /// Network of the targeted host.
    pub host_network: String,
    /// IP protocol version of the attack traffic.
    pub protocol_version: String,
    /// Whether a flexible threshold triggered detection.
    pub attack_detection_triggered_by_flexible_threshold: bool,
    /// Names of the flexible thresholds that fired.
    pub attack_detection_flexible_thresholds: Vec<String>,
    /// Per-threshold trigger detail, keyed by threshold name.
    pub attack_detection_flexible_thresholds_detailed: HashMap<String, FlexibleThresholdDetail>,
    /// The static threshold that fired.
    pub attack_detection_threshold: String,
    /// Direction the threshold fired in.
    pub attack_detection_threshold_direction: String,
    /// Detection source (e.g. the capture backend).
    pub attack_detection_source: String,

    /// Total incoming traffic in bytes per second.
    pub total_incoming_traffic: u64,
    /// Total outgoing traffic in bytes per second.
    pub total_outgoing_traffic: u64,
    /// Total incoming packet rate.
    pub total_incoming_pps: u64,
    /// Total outgoing packet rate.
    pub total_outgoing_pps: u64,
    /// Total incoming flow count.
    pub total_incoming_flows: u64,
    /// Total outgoing flow count.
    pub total_outgoing_flows: u64,

    /// Incoming fragmented traffic in bytes per second.
    pub incoming_ip_fragmented_traffic: u64,
    /// Outgoing fragmented traffic in bytes per second.
    pub outgoing_ip_fragmented_traffic: u64,
    /// Incoming fragmented packet rate.
    pub incoming_ip_fragmented_pps: u64,
    /// Outgoing fragmented packet rate.
    pub outgoing_ip_fragmented_pps: u64,

    /// Incoming TCP traffic in bytes per second.
    pub incoming_tcp_traffic: u64,
    /// Outgoing TCP traffic in bytes per second.
    pub outgoing_tcp_traffic: u64,
    /// Incoming TCP packet rate.
    pub incoming_tcp_pps: u64,
    /// Outgoing TCP packet rate.
    pub outgoing_tcp_pps: u64,

    /// Incoming TCP SYN traffic in bytes per second.
    pub incoming_syn_tcp_traffic: u64,
    /// Outgoing TCP SYN traffic in bytes per second.
    pub outgoing_syn_tcp_traffic: u64,
    /// Incoming TCP SYN packet rate.
    pub incoming_syn_tcp_pps: u64,
    /// Outgoing TCP SYN packet rate.
    pub outgoing_syn_tcp_pps: u64,

    /// Incoming UDP traffic in bytes per second.
    pub incoming_udp_traffic: u64,
    /// Outgoing UDP traffic in bytes per second.
    pub outgoing_udp_traffic: u64,
    /// Incoming UDP packet rate.
    pub incoming_udp_pps: u64,
    /// Outgoing UDP packet rate.
    pub outgoing_udp_pps: u64,

    /// Incoming ICMP traffic in bytes per second.
    pub incoming_icmp_traffic: u64,
    /// Outgoing ICMP traffic in bytes per second.
    pub outgoing_icmp_traffic: u64,
    /// Incoming ICMP packet rate.
    pub incoming_icmp_pps: u64,
    /// Outgoing ICMP packet rate.
    pub outgoing_icmp_pps: u64,
}

/// One sampled packet from the attack traffic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacketDumpEntry {
    /// IP protocol version of the sample.
    pub ip_version: String,
    /// Source address.
    pub source_ip: String,
    /// Destination address.
    pub destination_ip: String,
    /// Source port.
    pub source_port: u16,
    /// Destination port.
    pub destination_port: u16,
    /// TCP flags as rendered by the appliance.
    pub tcp_flags: String,
    /// Whether the packet was fragmented.
    pub fragmentation: bool,
    /// Packet count represented by this sample.
    pub packets: u64,
    /// Sampled length in bytes.
    pub length: u64,
    /// IP-layer length in bytes.
    pub ip_length: u64,
    /// Time to live.
    pub ttl: u8,
    /// Sampling ratio at the exporting agent.
    pub sample_ratio: u64,
    /// Protocol name.
    pub protocol: String,
    /// Address of the exporting agent.
    pub agent_address: String,
}

/// The full webhook document describing an attack, ban, or unban event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallbackEvent {
    /// Affected host address.
    pub ip: String,
    /// Event kind.
    pub action: CallbackAction,
    /// Attack identification and counters.
    pub attack_details: AttackDetails,
    /// Whether the alert covers a host or a host group.
    pub alert_scope: AlertScope,
    /// Host group name.
    pub hostgroup_name: String,
    /// Parent host group name, if nested.
    pub parent_hostgroup_name: String,
    /// Networks of the host group.
    pub hostgroup_networks: Vec<String>,
    /// Raw packet-dump lines, when sampling was available.
    #[serde(default)]
    pub packet_dump: Vec<String>,
    /// Structured packet-dump entries, when sampling was available.
    #[serde(default)]
    pub packet_dump_detailed: Vec<PacketDumpEntry>,
    /// FlowSpec rules announced for this event.
    #[serde(default)]
    pub flow_spec_rules: Vec<FlowSpecRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_action_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&CallbackAction::Ban).unwrap(),
            r#""ban""#
        );
        assert_eq!(
            serde_json::to_string(&CallbackAction::AttackStatus).unwrap(),
            r#""attack_status""#
        );
        assert_eq!(
            serde_json::to_string(&CallbackAction::PartialUnblock).unwrap(),
            r#""partial_unblock""#
        );

        let action: CallbackAction = serde_json::from_str(r#""partial_block""#).unwrap();
        assert_eq!(action, CallbackAction::PartialBlock);
    }

    #[test]
    fn alert_scope_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&AlertScope::Host).unwrap(),
            r#""host""#
        );
        let scope: AlertScope = serde_json::from_str(r#""hostgroup""#).unwrap();
        assert_eq!(scope, AlertScope::Hostgroup);
    }

    #[test]
    fn unknown_action_is_a_decode_error() {
        assert!(serde_json::from_str::<CallbackAction>(r#""quarantine""#).is_err());
    }

    #[test]
    fn flexible_threshold_detail_decodes() {
        let detail: FlexibleThresholdDetail = serde_json::from_str(
            r#"{
                "incoming": true,
                "outgoing": false,
                "incoming_details": {"flows": false, "mbits": true, "packets": true},
                "outgoing_details": {"flows": false, "mbits": false, "packets": false}
            }"#,
        )
        .unwrap();

        assert!(detail.incoming);
        assert!(detail.incoming_details.mbits);
        assert!(!detail.outgoing_details.packets);
    }
}
