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

//! Derived cache of locally-routed prefixes across all known networks.

use crate::model::link_properties::LocalPrefixes;
use crate::model::upstream_state::UpstreamNetworkState;

/// Holds the last emitted local prefix set.
#[derive(Default)]
pub(crate) struct PrefixAggregator {
    local_prefixes: LocalPrefixes,
}

impl PrefixAggregator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Unions the local prefixes of every described network and replaces the cache
    /// when the result differs. Returns the new set only on change.
    pub(crate) fn recompute<'a, I>(&mut self, states: I) -> Option<LocalPrefixes>
    where
        I: IntoIterator<Item = &'a UpstreamNetworkState>,
    {
        let computed: LocalPrefixes = states
            .into_iter()
            .filter_map(|state| state.link_properties.as_ref())
            .flat_map(|link_properties| link_properties.local_prefixes())
            .collect();

        if computed == self.local_prefixes {
            return None;
        }

        self.local_prefixes = computed.clone();
        Some(computed)
    }

    pub(crate) fn local_prefixes(&self) -> LocalPrefixes {
        self.local_prefixes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::PrefixAggregator;
    use crate::model::link_properties::LinkProperties;
    use crate::model::network_handle::NetworkHandle;
    use crate::model::upstream_state::UpstreamNetworkState;
    use ipnet::IpNet;

    fn net(value: &str) -> IpNet {
        value.parse().expect("valid prefix")
    }

    fn state(id: u64, addresses: &[&str]) -> UpstreamNetworkState {
        let mut link_properties = LinkProperties::new(&format!("if{id}"));
        for address in addresses {
            link_properties = link_properties.with_link_address(net(address));
        }
        UpstreamNetworkState {
            network: NetworkHandle::new(id),
            capabilities: None,
            link_properties: Some(link_properties),
        }
    }

    #[test]
    fn first_non_empty_recompute_reports_change() {
        let mut aggregator = PrefixAggregator::new();
        let states = [state(1, &["10.0.0.5/24"])];

        let changed = aggregator.recompute(&states).expect("prefixes changed");

        assert_eq!(changed.len(), 1);
        assert!(changed.contains(&net("10.0.0.0/24")));
    }

    #[test]
    fn unchanged_set_is_suppressed() {
        let mut aggregator = PrefixAggregator::new();
        let states = [state(1, &["10.0.0.5/24"])];
        aggregator.recompute(&states);

        assert!(aggregator.recompute(&states).is_none());
    }

    #[test]
    fn network_order_does_not_matter() {
        let mut aggregator = PrefixAggregator::new();
        let a = state(1, &["10.0.0.5/24"]);
        let b = state(2, &["192.168.49.1/24"]);
        aggregator.recompute([&a, &b]);

        assert!(aggregator.recompute([&b, &a]).is_none());
    }

    #[test]
    fn half_known_networks_are_skipped() {
        let mut aggregator = PrefixAggregator::new();
        let half_known = UpstreamNetworkState::new(NetworkHandle::new(8));

        assert!(aggregator.recompute([&half_known]).is_none());
        assert!(aggregator.local_prefixes().is_empty());
    }

    #[test]
    fn losing_last_network_reports_empty_set() {
        let mut aggregator = PrefixAggregator::new();
        aggregator.recompute(&[state(1, &["10.0.0.5/24"])]);

        let changed = aggregator
            .recompute(std::iter::empty())
            .expect("prefixes changed");

        assert!(changed.is_empty());
    }
}
