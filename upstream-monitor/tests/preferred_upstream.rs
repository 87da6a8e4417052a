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

mod support;

use integration_test_utils::{
    cellular_capabilities, dun_capabilities, link_properties, vpn_capabilities, wifi_capabilities,
};
use support::start_monitor;
use upstream_monitor::{
    NetworkCallbackEvent, NetworkHandle, SubscriptionKind, TETHERING_ALLOW_VPN_UPSTREAMS,
};

const WLAN: NetworkHandle = NetworkHandle::new(30);
const TUN: NetworkHandle = NetworkHandle::new(31);
const RMNET: NetworkHandle = NetworkHandle::new(32);
const RMNET_DUN: NetworkHandle = NetworkHandle::new(33);

#[tokio::test]
async fn vpn_preferred_over_default_when_allowed() {
    let harness = start_monitor("vpn-allowed", true, true).await;
    harness.service.announce(
        SubscriptionKind::ListenAll,
        WLAN,
        wifi_capabilities(),
        link_properties("wlan0", &["192.168.4.9/24"]),
    );
    harness.service.announce(
        SubscriptionKind::ListenAll,
        TUN,
        vpn_capabilities(),
        link_properties("tun0", &["10.8.0.6/24"]),
    );
    harness.service.fire(
        SubscriptionKind::DefaultTracker,
        NetworkCallbackEvent::CapabilitiesChanged(WLAN, wifi_capabilities()),
    );

    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();
    assert_eq!(preferred.map(|state| state.network), Some(TUN));

    harness.settings.set(TETHERING_ALLOW_VPN_UPSTREAMS, false);
    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();
    assert_eq!(preferred.map(|state| state.network), Some(WLAN));
}

#[tokio::test]
async fn settings_not_consulted_without_vpn_network() {
    let harness = start_monitor("vpn-absent", true, true).await;
    harness.service.announce(
        SubscriptionKind::ListenAll,
        WLAN,
        wifi_capabilities(),
        link_properties("wlan0", &["192.168.4.9/24"]),
    );
    harness.service.fire(
        SubscriptionKind::DefaultTracker,
        NetworkCallbackEvent::CapabilitiesChanged(WLAN, wifi_capabilities()),
    );

    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();

    assert_eq!(preferred.map(|state| state.network), Some(WLAN));
    assert_eq!(harness.settings.reads(), 0);
}

#[tokio::test]
async fn cellular_default_follows_permission_and_dun_policy() {
    let harness = start_monitor("cellular-default", true, false).await;
    harness.service.announce(
        SubscriptionKind::ListenAll,
        RMNET,
        cellular_capabilities(),
        link_properties("rmnet0", &["100.64.3.2/29"]),
    );
    harness.service.announce(
        SubscriptionKind::ListenAll,
        RMNET_DUN,
        dun_capabilities(),
        link_properties("rmnet1", &["100.64.9.2/29"]),
    );
    harness.service.fire(
        SubscriptionKind::DefaultTracker,
        NetworkCallbackEvent::CapabilitiesChanged(RMNET, cellular_capabilities()),
    );

    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();
    assert_eq!(preferred.map(|state| state.network), Some(RMNET));

    harness
        .monitor
        .update_mobile_requires_dun(true)
        .await
        .unwrap();
    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();
    assert_eq!(preferred.map(|state| state.network), Some(RMNET_DUN));

    harness.policy.set_permitted(false);
    let preferred = harness
        .monitor
        .get_current_preferred_upstream()
        .await
        .unwrap();
    assert_eq!(preferred, None);
}

#[tokio::test]
async fn current_upstream_is_recorded_and_cleared_by_stop() {
    let harness = start_monitor("current", true, false).await;

    harness
        .monitor
        .set_current_upstream(Some(WLAN))
        .await
        .unwrap();
    assert_eq!(harness.monitor.current_upstream().await.unwrap(), Some(WLAN));

    harness.monitor.stop().await.unwrap();
    assert_eq!(harness.monitor.current_upstream().await.unwrap(), None);
}
