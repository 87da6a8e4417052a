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

//! Legacy-priority upstream selection.

use crate::model::legacy_type::LegacyType;
use crate::model::upstream_state::UpstreamNetworkState;
use crate::observability::events;
use std::fmt::{Display, Formatter};
use tracing::{error, trace};

const COMPONENT: &str = "legacy_selector";

/// Outcome of one priority-list selection. Built fresh on every call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpstreamSelection {
    pub legacy_type: Option<LegacyType>,
    pub network: Option<UpstreamNetworkState>,
}

impl UpstreamSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.legacy_type.is_none()
    }
}

impl Display for UpstreamSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.legacy_type, &self.network) {
            (Some(legacy_type), Some(network)) => write!(f, "{legacy_type} via {network}"),
            _ => f.write_str("NONE"),
        }
    }
}

/// What the selection outcome means for the mobile network request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MobileRequestAction {
    /// Mobile was chosen: hold a mobile request, asking the policy authority to
    /// re-check entitlement first when the default network is not cellular.
    Ensure { run_provisioning: bool },
    /// Something else won, or nothing did and cellular is not permitted.
    Release,
    /// Nothing found but cellular is permitted; let any pending request keep trying.
    Keep,
}

/// Walks `preferred_types` in order and returns the first network in
/// `states` satisfying that type's filter.
///
/// Cellular types are skipped when cellular upstream is not permitted. Types with
/// no transport mapping are logged and skipped. Networks are not ranked: the first
/// match in iteration order wins.
pub(crate) fn find_first_available_upstream_by_type<'a, I>(
    states: I,
    preferred_types: &[LegacyType],
    cellular_permitted: bool,
) -> UpstreamSelection
where
    I: Iterator<Item = &'a UpstreamNetworkState> + Clone,
{
    for legacy_type in preferred_types {
        let filter = match legacy_type.capability_filter() {
            Ok(filter) => filter,
            Err(err) => {
                error!(
                    event = events::SELECTION_UNMAPPED_LEGACY_TYPE,
                    component = COMPONENT,
                    legacy_type = %legacy_type,
                    err = %err,
                    "skipping legacy type"
                );
                continue;
            }
        };

        if !cellular_permitted && filter.is_cellular() {
            trace!(
                event = events::SELECTION_CELLULAR_SKIPPED,
                component = COMPONENT,
                legacy_type = %legacy_type,
                "cellular upstream not permitted"
            );
            continue;
        }

        if let Some(state) = states
            .clone()
            .find(|state| filter.satisfied_by(state.capabilities.as_ref()))
        {
            return UpstreamSelection {
                legacy_type: Some(*legacy_type),
                network: Some(state.clone()),
            };
        }
    }

    UpstreamSelection::none()
}

pub(crate) fn mobile_request_action(
    selection: &UpstreamSelection,
    cellular_permitted: bool,
    default_is_cellular: bool,
) -> MobileRequestAction {
    match selection.legacy_type {
        Some(legacy_type) if legacy_type.is_mobile_request_type() => MobileRequestAction::Ensure {
            run_provisioning: !default_is_cellular,
        },
        Some(_) => MobileRequestAction::Release,
        None if cellular_permitted => MobileRequestAction::Keep,
        None => MobileRequestAction::Release,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        find_first_available_upstream_by_type, mobile_request_action, MobileRequestAction,
        UpstreamSelection,
    };
    use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};
    use crate::model::legacy_type::LegacyType;
    use crate::model::network_handle::NetworkHandle;
    use crate::model::upstream_state::UpstreamNetworkState;

    fn described(id: u64, capabilities: NetworkCapabilities) -> UpstreamNetworkState {
        let mut state = UpstreamNetworkState::new(NetworkHandle::new(id));
        state.capabilities = Some(capabilities);
        state
    }

    fn dun_cellular(id: u64) -> UpstreamNetworkState {
        described(
            id,
            NetworkCapabilities::builder()
                .add_transport(Transport::Cellular)
                .add_capability(Capability::Dun)
                .add_capability(Capability::NotVpn)
                .build(),
        )
    }

    fn wifi(id: u64) -> UpstreamNetworkState {
        described(
            id,
            NetworkCapabilities::builder()
                .add_transport(Transport::Wifi)
                .add_capability(Capability::Internet)
                .add_capability(Capability::NotVpn)
                .add_capability(Capability::NotRestricted)
                .build(),
        )
    }

    #[test]
    fn dun_network_selected_when_wifi_absent() {
        let states = [dun_cellular(7)];

        let selection = find_first_available_upstream_by_type(
            states.iter(),
            &[LegacyType::Wifi, LegacyType::MobileDun],
            true,
        );

        assert_eq!(selection.legacy_type, Some(LegacyType::MobileDun));
        assert_eq!(selection.network, Some(dun_cellular(7)));
        assert_eq!(
            mobile_request_action(&selection, true, false),
            MobileRequestAction::Ensure {
                run_provisioning: true
            }
        );
    }

    #[test]
    fn cellular_types_skipped_when_not_permitted() {
        let states = [dun_cellular(7)];

        let selection = find_first_available_upstream_by_type(
            states.iter(),
            &[LegacyType::Wifi, LegacyType::MobileDun],
            false,
        );

        assert!(selection.is_none());
        assert_eq!(
            mobile_request_action(&selection, false, false),
            MobileRequestAction::Release
        );
    }

    #[test]
    fn priority_order_beats_iteration_order() {
        let states = [dun_cellular(1), wifi(2)];

        let selection = find_first_available_upstream_by_type(
            states.iter(),
            &[LegacyType::Wifi, LegacyType::MobileDun],
            true,
        );

        assert_eq!(selection.legacy_type, Some(LegacyType::Wifi));
        assert_eq!(
            selection.network.map(|state| state.network),
            Some(NetworkHandle::new(2))
        );
    }

    #[test]
    fn restricted_wifi_is_not_selected() {
        let restricted = described(
            4,
            NetworkCapabilities::builder()
                .add_transport(Transport::Wifi)
                .add_capability(Capability::Internet)
                .add_capability(Capability::NotVpn)
                .build(),
        );
        let states = [restricted, wifi(6)];

        let selection =
            find_first_available_upstream_by_type(states.iter(), &[LegacyType::Wifi], true);
        assert_eq!(
            selection.network.map(|state| state.network),
            Some(NetworkHandle::new(6))
        );

        let selection =
            find_first_available_upstream_by_type(states[..1].iter(), &[LegacyType::Wifi], true);
        assert!(selection.is_none());
    }

    #[test]
    fn first_match_in_iteration_order_wins() {
        let states = [wifi(5), wifi(3)];

        let selection =
            find_first_available_upstream_by_type(states.iter(), &[LegacyType::Wifi], true);

        assert_eq!(
            selection.network.map(|state| state.network),
            Some(NetworkHandle::new(5))
        );
    }

    #[test]
    fn unmapped_type_is_skipped_not_fatal() {
        let states = [wifi(2)];

        let selection = find_first_available_upstream_by_type(
            states.iter(),
            &[LegacyType::Other(42), LegacyType::Vpn, LegacyType::Wifi],
            true,
        );

        assert_eq!(selection.legacy_type, Some(LegacyType::Wifi));
    }

    #[test]
    fn half_known_networks_never_match() {
        let states = [UpstreamNetworkState::new(NetworkHandle::new(1))];

        let selection =
            find_first_available_upstream_by_type(states.iter(), &[LegacyType::Wifi], true);

        assert_eq!(selection, UpstreamSelection::none());
    }

    #[test]
    fn nothing_found_keeps_request_while_permitted() {
        let selection = UpstreamSelection::none();

        assert_eq!(
            mobile_request_action(&selection, true, false),
            MobileRequestAction::Keep
        );
    }

    #[test]
    fn non_mobile_match_releases_request() {
        let selection = UpstreamSelection {
            legacy_type: Some(LegacyType::Mobile),
            network: None,
        };

        assert_eq!(
            mobile_request_action(&selection, true, true),
            MobileRequestAction::Release
        );
    }

    #[test]
    fn cellular_default_skips_provisioning() {
        let selection = UpstreamSelection {
            legacy_type: Some(LegacyType::MobileHipri),
            network: None,
        };

        assert_eq!(
            mobile_request_action(&selection, true, true),
            MobileRequestAction::Ensure {
                run_provisioning: false
            }
        );
    }
}
