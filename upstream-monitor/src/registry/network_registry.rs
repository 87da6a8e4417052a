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

//! Network registry: owner of every known upstream network state.

use crate::model::capabilities::NetworkCapabilities;
use crate::model::link_properties::LinkProperties;
use crate::model::network_handle::NetworkHandle;
use crate::model::upstream_state::UpstreamNetworkState;
use std::collections::HashMap;

/// Authoritative map from network handle to its last-known state.
///
/// Iteration follows availability order. Updates and removals for unknown
/// handles are no-ops, which absorbs duplicate or late notifications arriving
/// through overlapping subscriptions.
#[derive(Default)]
pub(crate) struct NetworkRegistry {
    order: Vec<NetworkHandle>,
    entries: HashMap<NetworkHandle, UpstreamNetworkState>,
}

impl NetworkRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a half-known entry. Returns `true` only when the handle was new.
    pub(crate) fn record_available(&mut self, network: NetworkHandle) -> bool {
        if self.entries.contains_key(&network) {
            return false;
        }
        self.entries
            .insert(network, UpstreamNetworkState::new(network));
        self.order.push(network);
        true
    }

    /// Replaces the stored descriptor. Returns the updated state only when the
    /// handle is known and the descriptor actually changed.
    pub(crate) fn update_capabilities(
        &mut self,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    ) -> Option<&UpstreamNetworkState> {
        let state = self.entries.get_mut(&network)?;
        if state.capabilities.as_ref() == Some(&capabilities) {
            return None;
        }
        state.capabilities = Some(capabilities);
        Some(state)
    }

    /// Replaces the stored link properties, with the same rules as
    /// [`NetworkRegistry::update_capabilities`].
    pub(crate) fn update_link_properties(
        &mut self,
        network: NetworkHandle,
        link_properties: LinkProperties,
    ) -> Option<&UpstreamNetworkState> {
        let state = self.entries.get_mut(&network)?;
        if state.link_properties.as_ref() == Some(&link_properties) {
            return None;
        }
        state.link_properties = Some(link_properties);
        Some(state)
    }

    /// Removes one network. Returns the removed state, or `None` for unknown handles.
    pub(crate) fn remove(&mut self, network: NetworkHandle) -> Option<UpstreamNetworkState> {
        let removed = self.entries.remove(&network)?;
        self.order.retain(|handle| *handle != network);
        Some(removed)
    }

    pub(crate) fn get(&self, network: NetworkHandle) -> Option<&UpstreamNetworkState> {
        self.entries.get(&network)
    }

    pub(crate) fn contains(&self, network: NetworkHandle) -> bool {
        self.entries.contains_key(&network)
    }

    /// Read-only view of every known network in availability order.
    pub(crate) fn snapshot(&self) -> impl Iterator<Item = &UpstreamNetworkState> + Clone + '_ {
        let entries = &self.entries;
        self.order
            .iter()
            .filter_map(move |network| entries.get(network))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::NetworkRegistry;
    use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};
    use crate::model::link_properties::LinkProperties;
    use crate::model::network_handle::NetworkHandle;

    fn wifi_internet() -> NetworkCapabilities {
        NetworkCapabilities::builder()
            .add_transport(Transport::Wifi)
            .add_capability(Capability::Internet)
            .add_capability(Capability::NotVpn)
            .build()
    }

    #[test]
    fn duplicate_availability_keeps_single_entry() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(100);

        assert!(registry.record_available(network));
        assert!(!registry.record_available(network));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn loss_without_availability_is_noop() {
        let mut registry = NetworkRegistry::new();
        registry.record_available(NetworkHandle::new(1));

        assert!(registry.remove(NetworkHandle::new(2)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_loss_is_noop() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(7);
        registry.record_available(network);

        assert!(registry.remove(network).is_some());
        assert!(registry.remove(network).is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn identical_capabilities_signal_change_once() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(3);
        registry.record_available(network);

        assert!(registry
            .update_capabilities(network, wifi_internet())
            .is_some());
        assert!(registry
            .update_capabilities(network, wifi_internet())
            .is_none());
    }

    #[test]
    fn reordered_link_addresses_are_not_a_change() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(6);
        registry.record_available(network);
        let v4 = "10.0.0.5/24".parse().unwrap();
        let v6 = "2001:db8::5/64".parse().unwrap();

        assert!(registry
            .update_link_properties(
                network,
                LinkProperties::new("wlan0")
                    .with_link_address(v4)
                    .with_link_address(v6),
            )
            .is_some());
        assert!(registry
            .update_link_properties(
                network,
                LinkProperties::new("wlan0")
                    .with_link_address(v6)
                    .with_link_address(v4),
            )
            .is_none());
    }

    #[test]
    fn update_for_unknown_handle_is_ignored() {
        let mut registry = NetworkRegistry::new();

        assert!(registry
            .update_capabilities(NetworkHandle::new(9), wifi_internet())
            .is_none());
        assert!(registry
            .update_link_properties(NetworkHandle::new(9), LinkProperties::new("wlan0"))
            .is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn capability_update_preserves_link_properties() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(4);
        registry.record_available(network);
        registry.update_link_properties(network, LinkProperties::new("wlan0"));

        let state = registry
            .update_capabilities(network, wifi_internet())
            .expect("capabilities changed");

        assert_eq!(
            state
                .link_properties
                .as_ref()
                .and_then(LinkProperties::interface_name),
            Some("wlan0")
        );
    }

    #[test]
    fn snapshot_follows_availability_order() {
        let mut registry = NetworkRegistry::new();
        for id in [30, 10, 20] {
            registry.record_available(NetworkHandle::new(id));
        }
        registry.remove(NetworkHandle::new(10));
        registry.record_available(NetworkHandle::new(10));

        let order: Vec<u64> = registry.snapshot().map(|state| state.network.id()).collect();

        assert_eq!(order, vec![30, 20, 10]);
    }

    #[test]
    fn sequence_of_events_never_duplicates_handle() {
        let mut registry = NetworkRegistry::new();
        let network = NetworkHandle::new(5);

        for _ in 0..3 {
            registry.record_available(network);
            registry.update_capabilities(network, wifi_internet());
            registry.record_available(network);
            assert_eq!(registry.len(), 1);
            registry.remove(network);
            registry.remove(network);
            assert_eq!(registry.len(), 0);
        }
    }
}
