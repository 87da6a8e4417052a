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

//! Deterministic benchmark fixtures for the Criterion harness.

use crate::collaborators::{
    NetworkObservationService, ObservationError, SettingsStore, SubscriptionId,
};
use crate::dispatch::command::MonitorCommand;
use crate::dispatch::monitor_actor::UpstreamMonitorActor;
use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};
use crate::model::legacy_type::LegacyType;
use crate::model::link_properties::LinkProperties;
use crate::model::network_handle::NetworkHandle;
use crate::model::network_request::NetworkRequest;
use crate::registry::network_registry::NetworkRegistry;
use crate::registry::prefix_aggregator::PrefixAggregator;
use crate::selection::legacy_selector::find_first_available_upstream_by_type;
use crate::subscription::network_callback::{
    NetworkCallback, NetworkCallbackEvent, SubscriptionKind,
};
use crate::subscription::subscription_manager::SubscriptionManager;
use async_trait::async_trait;
use ipnet::{IpNet, Ipv4Net};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

const BENCH_PREFERRED_TYPES: [LegacyType; 4] = [
    LegacyType::Ethernet,
    LegacyType::Bluetooth,
    LegacyType::Wifi,
    LegacyType::MobileDun,
];

fn wifi_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Wifi)
        .add_capability(Capability::NotVpn)
        .build()
}

fn dun_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Cellular)
        .add_capability(Capability::Dun)
        .add_capability(Capability::NotVpn)
        .build()
}

/// Distinct /24 per index inside 10.0.0.0/8.
fn link_properties(index: usize) -> LinkProperties {
    let octets = (index as u32).to_be_bytes();
    let address = Ipv4Addr::new(10, octets[2], octets[3], 2);
    let prefix = Ipv4Net::new(address, 24).unwrap_or_else(|_| Ipv4Net::from(address));
    LinkProperties::new(&format!("if{index}")).with_link_address(IpNet::V4(prefix))
}

/// Registry of `rows` networks where only the last one can be selected, so a
/// selection walks every row for every preferred type.
fn build_registry(rows: usize) -> NetworkRegistry {
    let mut registry = NetworkRegistry::new();
    for index in 0..rows {
        let network = NetworkHandle::new(index as u64);
        let capabilities = if index + 1 == rows {
            dun_capabilities()
        } else {
            wifi_capabilities()
        };
        registry.record_available(network);
        registry.update_capabilities(network, capabilities);
        registry.update_link_properties(network, link_properties(index));
    }
    registry
}

/// Fixed fixture for `selection/legacy_priority_walk` benchmark ID.
pub struct SelectionFixture {
    registry: NetworkRegistry,
}

impl SelectionFixture {
    pub fn new(rows: usize) -> Self {
        Self {
            registry: build_registry(rows),
        }
    }

    /// Runs one selection and returns the selected handle id, if any.
    pub fn select_once(&self) -> Option<u64> {
        find_first_available_upstream_by_type(
            self.registry.snapshot(),
            &BENCH_PREFERRED_TYPES,
            true,
        )
        .network
        .map(|state| state.network.id())
    }
}

/// Fixed fixture for `prefix_aggregation/recompute` benchmark ID.
pub struct PrefixFixture {
    registry: NetworkRegistry,
}

impl PrefixFixture {
    pub fn new(rows: usize) -> Self {
        Self {
            registry: build_registry(rows),
        }
    }

    /// Recomputes from an empty cache and returns the prefix count.
    pub fn recompute_once(&self) -> usize {
        PrefixAggregator::new()
            .recompute(self.registry.snapshot())
            .map_or(0, |prefixes| prefixes.len())
    }
}

struct NoopObservationService;

#[async_trait]
impl NetworkObservationService for NoopObservationService {
    async fn register_network_callback(
        &self,
        _request: &NetworkRequest,
        _callback: NetworkCallback,
    ) -> Result<SubscriptionId, ObservationError> {
        Ok(SubscriptionId::new(0))
    }

    async fn unregister_network_callback(
        &self,
        _subscription: SubscriptionId,
    ) -> Result<(), ObservationError> {
        Ok(())
    }
}

struct NoopSettings;

impl SettingsStore for NoopSettings {
    fn get_bool(&self, _key: &str, default: bool) -> bool {
        default
    }
}

/// Feeds `networks` full availability/capabilities/link-properties/loss cycles
/// through a fresh actor and returns the number of controller events produced.
pub async fn run_callback_dispatch_once(networks: usize) -> usize {
    let (command_sender, _command_receiver) = unbounded_channel();
    let (event_sender, mut event_receiver) = unbounded_channel();
    let subscriptions =
        SubscriptionManager::new(Arc::new(NoopObservationService), command_sender);
    let mut actor = UpstreamMonitorActor::new(
        "bench-actor".to_string(),
        "bench",
        subscriptions,
        Arc::new(NoopSettings),
        event_sender,
    );

    let (reply, _reply_receiver) = oneshot::channel();
    actor
        .handle_command(MonitorCommand::StartObserveAllNetworks { reply })
        .await;

    for index in 0..networks {
        let network = NetworkHandle::new(index as u64);
        let events = [
            NetworkCallbackEvent::Available(network),
            NetworkCallbackEvent::CapabilitiesChanged(network, wifi_capabilities()),
            NetworkCallbackEvent::LinkPropertiesChanged(network, link_properties(index)),
            NetworkCallbackEvent::Lost(network),
        ];
        for event in events {
            actor
                .handle_command(MonitorCommand::Callback {
                    kind: SubscriptionKind::ListenAll,
                    event,
                })
                .await;
        }
    }

    let mut produced = 0;
    while event_receiver.try_recv().is_ok() {
        produced += 1;
    }
    produced
}

#[cfg(test)]
mod tests {
    use super::{run_callback_dispatch_once, PrefixFixture, SelectionFixture};

    #[test]
    fn selection_fixture_selects_last_row() {
        assert_eq!(SelectionFixture::new(16).select_once(), Some(15));
    }

    #[test]
    fn prefix_fixture_counts_distinct_prefixes() {
        assert_eq!(PrefixFixture::new(300).recompute_once(), 300);
    }

    #[tokio::test]
    async fn callback_dispatch_produces_five_events_per_network() {
        assert_eq!(run_callback_dispatch_once(4).await, 20);
    }
}
