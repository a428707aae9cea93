//! Option key enumerations and value coercion.
//!
//! The appliance exposes its configuration as flat key/value option spaces,
//! one per host group and one global (`/main`). Keys are drawn from fixed
//! sets partitioned by value kind; the spellings below are the exact wire
//! strings the firmware accepts and are compatibility-critical.
//!
//! Values travel inside the URL path in the appliance's string encoding:
//! booleans as the literal tokens `enable`/`disable`, everything else via
//! its canonical string form. [`OptionValue`] implements that coercion once
//! for every option write and delete.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A scalar option value, coerced to the appliance's string encoding via
/// [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean toggle, encoded as `enable`/`disable`.
    Bool(bool),
    /// Integer value, encoded in decimal.
    Int(u64),
    /// String value, passed through unchanged.
    Str(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("enable"),
            Self::Bool(false) => f.write_str("disable"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<u16> for OptionValue {
    fn from(value: u16) -> Self {
        Self::Int(u64::from(value))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Macro to generate a fixed option-key enumeration with its wire spellings.
macro_rules! option_keys {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Returns the option key as the appliance spells it.
            #[must_use]
            pub const fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Returns all keys in this option set.
            #[must_use]
            pub const fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($key => Ok(Self::$variant),)+
                    _ => Err(Error::Config(format!(
                        concat!("Unknown ", stringify!($name), " key: {}"),
                        s
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

option_keys! {
    /// Boolean ban-trigger options of a host group.
    HostGroupBoolOption {
        /// Master ban toggle for the group.
        EnableBan => "enable_ban",
        /// Ban when the packet-per-second threshold is exceeded.
        BanForPps => "ban_for_pps",
        /// Ban when the bandwidth threshold is exceeded.
        BanForBandwidth => "ban_for_bandwidth",
        /// Ban when the flow threshold is exceeded.
        BanForFlows => "ban_for_flows",
        /// Ban on TCP bandwidth.
        BanForTcpBandwidth => "ban_for_tcp_bandwidth",
        /// Ban on TCP SYN bandwidth.
        BanForTcpSynBandwidth => "ban_for_tcp_syn_bandwidth",
        /// Ban on UDP bandwidth.
        BanForUdpBandwidth => "ban_for_udp_bandwidth",
        /// Ban on ICMP bandwidth.
        BanForIcmpBandwidth => "ban_for_icmp_bandwidth",
        /// Ban on TCP packet rate.
        BanForTcpPps => "ban_for_tcp_pps",
        /// Ban on TCP SYN packet rate.
        BanForTcpSynPps => "ban_for_tcp_syn_pps",
        /// Ban on UDP packet rate.
        BanForUdpPps => "ban_for_udp_pps",
        /// Ban on ICMP packet rate.
        BanForIcmpPps => "ban_for_icmp_pps",
    }
}

option_keys! {
    /// Numeric threshold options of a host group.
    HostGroupIntOption {
        /// Total packet-per-second threshold.
        ThresholdPps => "threshold_pps",
        /// Total bandwidth threshold in mbps.
        ThresholdMbps => "threshold_mbps",
        /// Total flow threshold.
        ThresholdFlows => "threshold_flows",
        /// TCP bandwidth threshold in mbps.
        ThresholdTcpMbps => "threshold_tcp_mbps",
        /// TCP SYN bandwidth threshold in mbps.
        ThresholdTcpSynMbps => "threshold_tcp_syn_mbps",
        /// UDP bandwidth threshold in mbps.
        ThresholdUdpMbps => "threshold_udp_mbps",
        /// ICMP bandwidth threshold in mbps.
        ThresholdIcmpMbps => "threshold_icmp_mbps",
        /// TCP packet-rate threshold.
        ThresholdTcpPps => "threshold_tcp_pps",
        /// TCP SYN packet-rate threshold.
        ThresholdTcpSynPps => "threshold_tcp_syn_pps",
        /// UDP packet-rate threshold.
        ThresholdUdpPps => "threshold_udp_pps",
        /// ICMP packet-rate threshold.
        ThresholdIcmpPps => "threshold_icmp_pps",
    }
}

option_keys! {
    /// String-valued options of a host group.
    HostGroupStrOption {
        /// Host group name.
        Name => "name",
        /// Free-form description.
        Description => "description",
        /// Monitored network in CIDR form; repeat the call per network.
        Networks => "networks",
    }
}

option_keys! {
    /// String-valued global appliance options.
    GlobalStrOption {
        /// Appliance-wide monitored network list.
        NetworksList => "networks_list",
    }
}

option_keys! {
    /// Integer-valued global appliance options.
    GlobalIntOption {
        /// sFlow collector listening port.
        SflowPorts => "sflow_ports",
        /// NetFlow collector listening port.
        NetflowPorts => "netflow_ports",
    }
}

/// Any host-group option key, for reads where no value travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostGroupOptionKey {
    /// A ban-trigger toggle key.
    Bool(HostGroupBoolOption),
    /// A numeric threshold key.
    Int(HostGroupIntOption),
    /// A string-valued key.
    Str(HostGroupStrOption),
}

impl HostGroupOptionKey {
    /// Returns the option key as the appliance spells it.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Bool(opt) => opt.key(),
            Self::Int(opt) => opt.key(),
            Self::Str(opt) => opt.key(),
        }
    }
}

impl From<HostGroupBoolOption> for HostGroupOptionKey {
    fn from(opt: HostGroupBoolOption) -> Self {
        Self::Bool(opt)
    }
}

impl From<HostGroupIntOption> for HostGroupOptionKey {
    fn from(opt: HostGroupIntOption) -> Self {
        Self::Int(opt)
    }
}

impl From<HostGroupStrOption> for HostGroupOptionKey {
    fn from(opt: HostGroupStrOption) -> Self {
        Self::Str(opt)
    }
}

impl fmt::Display for HostGroupOptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A host-group option key paired with a value of its declared kind.
///
/// Writes and deletes go through this type, so a value of the wrong kind
/// for a key is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum HostGroupOption {
    /// A ban-trigger toggle.
    Bool(HostGroupBoolOption, bool),
    /// A numeric threshold.
    Int(HostGroupIntOption, u64),
    /// A string value.
    Str(HostGroupStrOption, String),
}

impl HostGroupOption {
    /// Returns the option key as the appliance spells it.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Bool(opt, _) => opt.key(),
            Self::Int(opt, _) => opt.key(),
            Self::Str(opt, _) => opt.key(),
        }
    }

    /// Returns the value in coercible form.
    #[must_use]
    pub fn value(&self) -> OptionValue {
        match self {
            Self::Bool(_, value) => OptionValue::Bool(*value),
            Self::Int(_, value) => OptionValue::Int(*value),
            Self::Str(_, value) => OptionValue::Str(value.clone()),
        }
    }
}

/// Any global option key, for reads where no value travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalOptionKey {
    /// An integer-valued key.
    Int(GlobalIntOption),
    /// A string-valued key.
    Str(GlobalStrOption),
}

impl GlobalOptionKey {
    /// Returns the option key as the appliance spells it.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Int(opt) => opt.key(),
            Self::Str(opt) => opt.key(),
        }
    }
}

impl From<GlobalIntOption> for GlobalOptionKey {
    fn from(opt: GlobalIntOption) -> Self {
        Self::Int(opt)
    }
}

impl From<GlobalStrOption> for GlobalOptionKey {
    fn from(opt: GlobalStrOption) -> Self {
        Self::Str(opt)
    }
}

impl fmt::Display for GlobalOptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A global option key paired with a value of its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalOption {
    /// An integer value.
    Int(GlobalIntOption, u64),
    /// A string value.
    Str(GlobalStrOption, String),
}

impl GlobalOption {
    /// Returns the option key as the appliance spells it.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Int(opt, _) => opt.key(),
            Self::Str(opt, _) => opt.key(),
        }
    }

    /// Returns the value in coercible form.
    #[must_use]
    pub fn value(&self) -> OptionValue {
        match self {
            Self::Int(_, value) => OptionValue::Int(*value),
            Self::Str(_, value) => OptionValue::Str(value.clone()),
        }
    }
}
