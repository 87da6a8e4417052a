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

use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use upstream_monitor::{
    Capability, IpNet, LinkProperties, NetworkCapabilities, Transport, UpstreamEvent,
    UpstreamEventCode, UpstreamMonitor,
};

const EVENT_WAIT: Duration = Duration::from_secs(2);

/// Installs a test-writer `tracing` subscriber once per process; later calls
/// are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Round-trips a query through the actor. Every callback fired before this call
/// has been processed once it returns.
pub async fn barrier(monitor: &UpstreamMonitor) {
    let _ = monitor.mobile_network_requested().await;
}

/// Events already queued for the controller.
pub fn drain_events(receiver: &mut UnboundedReceiver<UpstreamEvent>) -> Vec<UpstreamEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

/// Waits for up to `count` events, giving up after a fixed timeout.
pub async fn collect_events(
    receiver: &mut UnboundedReceiver<UpstreamEvent>,
    count: usize,
) -> Vec<UpstreamEvent> {
    let mut events = Vec::with_capacity(count);
    while events.len() < count {
        match timeout(EVENT_WAIT, receiver.recv()).await {
            Ok(Some(event)) => events.push(event),
            Ok(None) | Err(_) => break,
        }
    }
    events
}

pub fn event_codes(events: &[UpstreamEvent]) -> Vec<UpstreamEventCode> {
    events.iter().map(UpstreamEvent::code).collect()
}

pub fn wifi_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Wifi)
        .add_capability(Capability::Internet)
        .add_capability(Capability::NotVpn)
        .add_capability(Capability::NotRestricted)
        .build()
}

pub fn cellular_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Cellular)
        .add_capability(Capability::Internet)
        .add_capability(Capability::NotVpn)
        .add_capability(Capability::NotRestricted)
        .build()
}

pub fn dun_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Cellular)
        .add_capability(Capability::Dun)
        .add_capability(Capability::NotVpn)
        .build()
}

pub fn vpn_capabilities() -> NetworkCapabilities {
    NetworkCapabilities::builder()
        .add_transport(Transport::Vpn)
        .add_capability(Capability::Internet)
        .add_capability(Capability::NotRestricted)
        .build()
}

/// Link properties for `iface` carrying the given `address/len` entries.
///
/// # Panics
///
/// Panics on a malformed address; test fixtures only.
pub fn link_properties(iface: &str, addresses: &[&str]) -> LinkProperties {
    addresses
        .iter()
        .map(|address| {
            address
                .parse::<IpNet>()
                .unwrap_or_else(|err| panic!("invalid test address {address}: {err}"))
        })
        .fold(LinkProperties::new(iface), LinkProperties::with_link_address)
}
