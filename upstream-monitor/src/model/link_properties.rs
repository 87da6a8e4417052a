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

//! Link properties snapshot: interface name and link addresses.

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::net::IpAddr;

/// Set of locally-routed prefixes derived from link addresses.
pub type LocalPrefixes = HashSet<IpNet>;

/// Immutable snapshot of one interface's addressing.
///
/// Each link address is an address together with its prefix length, for example
/// `10.0.0.7/24`. Link addresses form a set, so two snapshots listing the same
/// addresses in a different order are equal. Stacked links (such as a 464xlat
/// interface layered on a cellular link) contribute their addresses to
/// [`LinkProperties::local_prefixes`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkProperties {
    #[serde(default)]
    interface_name: Option<String>,
    #[serde(default)]
    link_addresses: BTreeSet<IpNet>,
    #[serde(default)]
    stacked_links: Vec<LinkProperties>,
}

impl LinkProperties {
    pub fn new(interface_name: &str) -> Self {
        Self {
            interface_name: Some(interface_name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_link_address(mut self, link_address: IpNet) -> Self {
        self.link_addresses.insert(link_address);
        self
    }

    pub fn with_stacked_link(mut self, stacked: LinkProperties) -> Self {
        self.stacked_links.push(stacked);
        self
    }

    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    pub fn link_addresses(&self) -> &BTreeSet<IpNet> {
        &self.link_addresses
    }

    pub fn stacked_links(&self) -> &[LinkProperties] {
        &self.stacked_links
    }

    /// Link addresses of this link followed by those of every stacked link.
    pub fn all_link_addresses(&self) -> Vec<IpNet> {
        let mut addresses: Vec<IpNet> = self.link_addresses.iter().copied().collect();
        for stacked in &self.stacked_links {
            addresses.extend(stacked.all_link_addresses());
        }
        addresses
    }

    /// Prefixes routed locally through this link. Link-local addresses are skipped.
    pub fn local_prefixes(&self) -> LocalPrefixes {
        self.all_link_addresses()
            .into_iter()
            .filter(|address| !is_link_local(address.addr()))
            .map(|address| address.trunc())
            .collect()
    }
}

fn is_link_local(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_link_local(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) == 0xfe80,
    }
}

#[cfg(test)]
mod tests {
    use super::LinkProperties;
    use ipnet::IpNet;

    fn net(value: &str) -> IpNet {
        value.parse().expect("valid prefix")
    }

    #[test]
    fn local_prefixes_truncate_host_bits() {
        let lp = LinkProperties::new("wlan0").with_link_address(net("10.0.0.7/24"));

        let prefixes = lp.local_prefixes();

        assert_eq!(prefixes.len(), 1);
        assert!(prefixes.contains(&net("10.0.0.0/24")));
    }

    #[test]
    fn local_prefixes_skip_link_local_addresses() {
        let lp = LinkProperties::new("wlan0")
            .with_link_address(net("169.254.3.4/16"))
            .with_link_address(net("fe80::1/64"))
            .with_link_address(net("2001:db8:1::5/64"));

        let prefixes = lp.local_prefixes();

        assert_eq!(prefixes.len(), 1);
        assert!(prefixes.contains(&net("2001:db8:1::/64")));
    }

    #[test]
    fn stacked_link_addresses_are_included() {
        let clat = LinkProperties::new("v4-rmnet0").with_link_address(net("192.0.0.4/32"));
        let lp = LinkProperties::new("rmnet0")
            .with_link_address(net("2001:db8:2::9/64"))
            .with_stacked_link(clat);

        assert_eq!(lp.all_link_addresses().len(), 2);
        assert!(lp.local_prefixes().contains(&net("192.0.0.4/32")));
    }

    #[test]
    fn address_order_and_duplicates_do_not_matter() {
        let forward = LinkProperties::new("wlan0")
            .with_link_address(net("10.0.0.5/24"))
            .with_link_address(net("2001:db8::5/64"));
        let reversed = LinkProperties::new("wlan0")
            .with_link_address(net("2001:db8::5/64"))
            .with_link_address(net("10.0.0.5/24"))
            .with_link_address(net("10.0.0.5/24"));

        assert_eq!(forward, reversed);
        assert_eq!(reversed.link_addresses().len(), 2);
    }

    #[test]
    fn addresses_deserialize_as_a_set() {
        let lp: LinkProperties = serde_json::from_str(
            r#"{"interface_name":"eth0","link_addresses":["10.1.0.2/16","10.1.0.2/16"]}"#,
        )
        .unwrap();

        assert_eq!(lp.link_addresses().len(), 1);
    }
}
