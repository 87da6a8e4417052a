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

//! Default-network-driven upstream preference.

use crate::model::capabilities::Capability;
use crate::model::network_handle::NetworkHandle;
use crate::model::upstream_state::UpstreamNetworkState;
use crate::registry::network_registry::NetworkRegistry;

/// Default-network facts the preference is derived from.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DefaultNetworkView {
    pub(crate) vpn_network: Option<NetworkHandle>,
    pub(crate) default_network: Option<NetworkHandle>,
    pub(crate) dun_required: bool,
}

/// Picks the upstream the default network implies, in this order:
///
/// 1. the VPN internet network, if one is known and VPN upstreams are allowed;
/// 2. the default network, if fully described and not cellular;
/// 3. nothing, if cellular upstream is not permitted;
/// 4. the default network as is, if DUN is not required;
/// 5. the first cellular DUN network in the registry.
///
/// The two predicates are only evaluated when their step is reached.
pub(crate) fn current_preferred_upstream<V, P>(
    registry: &NetworkRegistry,
    view: DefaultNetworkView,
    vpn_upstreams_allowed: V,
    cellular_permitted: P,
) -> Option<UpstreamNetworkState>
where
    V: FnOnce() -> bool,
    P: FnOnce() -> bool,
{
    if let Some(vpn_network) = view.vpn_network {
        if vpn_upstreams_allowed() {
            return registry.get(vpn_network).cloned();
        }
    }

    let default_state = view
        .default_network
        .and_then(|network| registry.get(network));
    if default_state.is_some_and(UpstreamNetworkState::is_usable_and_not_cellular) {
        return default_state.cloned();
    }

    if !cellular_permitted() {
        return None;
    }

    if !view.dun_required {
        return default_state.cloned();
    }

    find_first_dun_network(registry)
}

fn find_first_dun_network(registry: &NetworkRegistry) -> Option<UpstreamNetworkState> {
    registry
        .snapshot()
        .find(|state| state.is_cellular() && state.has_capability(Capability::Dun))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::{current_preferred_upstream, DefaultNetworkView};
    use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};
    use crate::model::link_properties::LinkProperties;
    use crate::model::network_handle::NetworkHandle;
    use crate::registry::network_registry::NetworkRegistry;

    const WIFI: NetworkHandle = NetworkHandle::new(1);
    const VPN: NetworkHandle = NetworkHandle::new(2);
    const CELL: NetworkHandle = NetworkHandle::new(3);
    const DUN: NetworkHandle = NetworkHandle::new(4);

    fn add(
        registry: &mut NetworkRegistry,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
        iface: &str,
    ) {
        registry.record_available(network);
        registry.update_capabilities(network, capabilities);
        registry.update_link_properties(network, LinkProperties::new(iface));
    }

    fn registry() -> NetworkRegistry {
        let mut registry = NetworkRegistry::new();
        add(
            &mut registry,
            WIFI,
            NetworkCapabilities::builder()
                .add_transport(Transport::Wifi)
                .add_capability(Capability::Internet)
                .add_capability(Capability::NotVpn)
                .build(),
            "wlan0",
        );
        add(
            &mut registry,
            VPN,
            NetworkCapabilities::builder()
                .add_transport(Transport::Vpn)
                .add_capability(Capability::Internet)
                .build(),
            "tun0",
        );
        add(
            &mut registry,
            CELL,
            NetworkCapabilities::builder()
                .add_transport(Transport::Cellular)
                .add_capability(Capability::Internet)
                .add_capability(Capability::NotVpn)
                .build(),
            "rmnet0",
        );
        add(
            &mut registry,
            DUN,
            NetworkCapabilities::builder()
                .add_transport(Transport::Cellular)
                .add_capability(Capability::Dun)
                .add_capability(Capability::NotVpn)
                .build(),
            "rmnet1",
        );
        registry
    }

    fn pick(view: DefaultNetworkView, vpn_allowed: bool, permitted: bool) -> Option<NetworkHandle> {
        current_preferred_upstream(&registry(), view, || vpn_allowed, || permitted)
            .map(|state| state.network)
    }

    #[test]
    fn allowed_vpn_beats_non_vpn_default() {
        let view = DefaultNetworkView {
            vpn_network: Some(VPN),
            default_network: Some(WIFI),
            dun_required: false,
        };

        assert_eq!(pick(view, true, true), Some(VPN));
        assert_eq!(pick(view, false, true), Some(WIFI));
    }

    #[test]
    fn settings_not_read_without_vpn_network() {
        let view = DefaultNetworkView {
            vpn_network: None,
            default_network: Some(WIFI),
            dun_required: false,
        };

        let picked = current_preferred_upstream(
            &registry(),
            view,
            || panic!("settings read without a vpn network"),
            || true,
        );

        assert_eq!(picked.map(|state| state.network), Some(WIFI));
    }

    #[test]
    fn cellular_default_needs_permission() {
        let view = DefaultNetworkView {
            vpn_network: None,
            default_network: Some(CELL),
            dun_required: false,
        };

        assert_eq!(pick(view, false, false), None);
        assert_eq!(pick(view, false, true), Some(CELL));
    }

    #[test]
    fn dun_required_scans_for_dun_network() {
        let view = DefaultNetworkView {
            vpn_network: None,
            default_network: Some(CELL),
            dun_required: true,
        };

        assert_eq!(pick(view, false, true), Some(DUN));
    }

    #[test]
    fn no_default_without_dun_requirement_yields_none() {
        let view = DefaultNetworkView::default();

        assert_eq!(pick(view, false, true), None);
    }

    #[test]
    fn half_known_default_is_not_usable() {
        let mut registry = NetworkRegistry::new();
        registry.record_available(WIFI);
        let view = DefaultNetworkView {
            vpn_network: None,
            default_network: Some(WIFI),
            dun_required: false,
        };

        let picked = current_preferred_upstream(&registry, view, || false, || false);

        assert_eq!(picked, None);
    }
}
