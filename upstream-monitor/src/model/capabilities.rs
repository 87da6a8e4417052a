/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Capability descriptor model: transports plus capability flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Physical or virtual medium a network runs over.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    Cellular,
    Wifi,
    Bluetooth,
    Ethernet,
    Vpn,
}

/// Capability flags the monitor cares about.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Internet,
    Dun,
    NotRestricted,
    NotVpn,
}

impl Display for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Transport::Cellular => "CELLULAR",
            Transport::Wifi => "WIFI",
            Transport::Bluetooth => "BLUETOOTH",
            Transport::Ethernet => "ETHERNET",
            Transport::Vpn => "VPN",
        };
        f.write_str(label)
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Capability::Internet => "INTERNET",
            Capability::Dun => "DUN",
            Capability::NotRestricted => "NOT_RESTRICTED",
            Capability::NotVpn => "NOT_VPN",
        };
        f.write_str(label)
    }
}

#[derive(Deserialize)]
struct RawNetworkCapabilities {
    #[serde(default)]
    transports: BTreeSet<Transport>,
    #[serde(default)]
    capabilities: BTreeSet<Capability>,
}

impl From<RawNetworkCapabilities> for NetworkCapabilities {
    fn from(raw: RawNetworkCapabilities) -> Self {
        NetworkCapabilities {
            transports: raw.transports,
            capabilities: raw.capabilities,
        }
        .normalized()
    }
}

/// Immutable descriptor of what a network can do.
///
/// A descriptor carrying [`Capability::Dun`] never carries
/// [`Capability::NotRestricted`]: DUN networks are restricted by construction.
/// Both [`NetworkCapabilitiesBuilder::build`] and deserialization enforce this.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNetworkCapabilities")]
pub struct NetworkCapabilities {
    transports: BTreeSet<Transport>,
    capabilities: BTreeSet<Capability>,
}

impl NetworkCapabilities {
    pub fn builder() -> NetworkCapabilitiesBuilder {
        NetworkCapabilitiesBuilder::default()
    }

    pub fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn transports(&self) -> impl Iterator<Item = Transport> + '_ {
        self.transports.iter().copied()
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    /// Cellular transport on a network that is not itself a VPN.
    pub fn is_cellular(&self) -> bool {
        self.has_transport(Transport::Cellular) && self.has_capability(Capability::NotVpn)
    }

    /// A VPN that provides internet access.
    pub fn is_vpn_internet(&self) -> bool {
        !self.has_capability(Capability::NotVpn) && self.has_capability(Capability::Internet)
    }

    fn normalized(mut self) -> Self {
        if self.capabilities.contains(&Capability::Dun) {
            self.capabilities.remove(&Capability::NotRestricted);
        }
        self
    }
}

impl Display for NetworkCapabilities {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, transport) in self.transports.iter().enumerate() {
            if index > 0 {
                write!(f, "|")?;
            }
            write!(f, "{transport}")?;
        }
        write!(f, " Capabilities: ")?;
        for (index, capability) in self.capabilities.iter().enumerate() {
            if index > 0 {
                write!(f, "&")?;
            }
            write!(f, "{capability}")?;
        }
        write!(f, "]")
    }
}

#[derive(Clone, Debug, Default)]
pub struct NetworkCapabilitiesBuilder {
    transports: BTreeSet<Transport>,
    capabilities: BTreeSet<Capability>,
}

impl NetworkCapabilitiesBuilder {
    pub fn add_transport(mut self, transport: Transport) -> Self {
        self.transports.insert(transport);
        self
    }

    pub fn add_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn remove_capability(mut self, capability: Capability) -> Self {
        self.capabilities.remove(&capability);
        self
    }

    pub fn build(self) -> NetworkCapabilities {
        NetworkCapabilities {
            transports: self.transports,
            capabilities: self.capabilities,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, NetworkCapabilities, Transport};

    #[test]
    fn dun_descriptor_drops_not_restricted() {
        let caps = NetworkCapabilities::builder()
            .add_transport(Transport::Cellular)
            .add_capability(Capability::NotRestricted)
            .add_capability(Capability::Dun)
            .build();

        assert!(caps.has_capability(Capability::Dun));
        assert!(!caps.has_capability(Capability::NotRestricted));
    }

    #[test]
    fn deserialized_dun_descriptor_is_normalized() {
        let caps: NetworkCapabilities = serde_json::from_str(
            r#"{"transports":["cellular"],"capabilities":["dun","not_restricted","not_vpn"]}"#,
        )
        .expect("descriptor should deserialize");

        assert!(!caps.has_capability(Capability::NotRestricted));
        assert!(caps.is_cellular());
    }

    #[test]
    fn cellular_vpn_is_not_cellular() {
        let vpn_over_cellular = NetworkCapabilities::builder()
            .add_transport(Transport::Cellular)
            .add_transport(Transport::Vpn)
            .add_capability(Capability::Internet)
            .build();

        assert!(!vpn_over_cellular.is_cellular());
        assert!(vpn_over_cellular.is_vpn_internet());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = NetworkCapabilities::builder()
            .add_transport(Transport::Wifi)
            .add_capability(Capability::Internet)
            .add_capability(Capability::NotVpn)
            .build();
        let b = NetworkCapabilities::builder()
            .add_capability(Capability::NotVpn)
            .add_capability(Capability::Internet)
            .add_transport(Transport::Wifi)
            .build();

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[WIFI Capabilities: INTERNET&NOT_VPN]");
    }
}
