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

use integration_test_utils::{
    barrier, init_logging, FakeObservationService, InMemorySettings, RecordingPolicyAuthority,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use upstream_monitor::{CapabilityFilter, UpstreamEvent, UpstreamMonitor};

#[allow(dead_code)]
pub(crate) struct MonitorHarness {
    pub(crate) monitor: UpstreamMonitor,
    pub(crate) events: UnboundedReceiver<UpstreamEvent>,
    pub(crate) service: Arc<FakeObservationService>,
    pub(crate) policy: Arc<RecordingPolicyAuthority>,
    pub(crate) settings: Arc<InMemorySettings>,
}

impl MonitorHarness {
    /// Waits until every callback fired so far has been processed.
    #[allow(dead_code)]
    pub(crate) async fn settle(&self) {
        barrier(&self.monitor).await;
    }
}

/// Starts a monitor that tracks the default network and observes all networks.
pub(crate) async fn start_monitor(
    name: &str,
    cellular_permitted: bool,
    vpn_upstreams_allowed: bool,
) -> MonitorHarness {
    init_logging();

    let service = Arc::new(FakeObservationService::new(name));
    let policy = Arc::new(RecordingPolicyAuthority::new(cellular_permitted));
    let settings = Arc::new(InMemorySettings::with_vpn_upstreams_allowed(
        vpn_upstreams_allowed,
    ));

    let (monitor, events) = UpstreamMonitor::start(name, service.clone(), settings.clone())
        .expect("monitor should start");
    monitor
        .start_track_default_network(CapabilityFilter::default_internet(), policy.clone())
        .await
        .expect("default tracking should start");
    monitor
        .start_observe_all_networks()
        .await
        .expect("observation should start");

    MonitorHarness {
        monitor,
        events,
        service,
        policy,
        settings,
    }
}
