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

//! Events the monitor forwards to its owning controller.

use crate::model::link_properties::LocalPrefixes;
use crate::model::upstream_state::UpstreamNetworkState;
use std::fmt::{Display, Formatter};

/// Numeric event codes, stable for controllers that dispatch on integers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum UpstreamEventCode {
    OnCapabilities = 1,
    OnLinkProperties = 2,
    OnLost = 3,
    NotifyLocalPrefixes = 10,
}

impl UpstreamEventCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Display for UpstreamEventCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamEventCode::OnCapabilities => f.write_str("ON_CAPABILITIES"),
            UpstreamEventCode::OnLinkProperties => f.write_str("ON_LINK_PROPERTIES"),
            UpstreamEventCode::OnLost => f.write_str("ON_LOST"),
            UpstreamEventCode::NotifyLocalPrefixes => f.write_str("NOTIFY_LOCAL_PREFIXES"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UpstreamEvent {
    /// A known network's capabilities changed; carries its updated state.
    Capabilities(UpstreamNetworkState),
    /// A known network's link properties changed; carries its updated state.
    LinkProperties(UpstreamNetworkState),
    /// A known network went away; carries its last state.
    Lost(UpstreamNetworkState),
    /// The aggregate local prefix set changed.
    LocalPrefixes(LocalPrefixes),
}

impl UpstreamEvent {
    pub fn code(&self) -> UpstreamEventCode {
        match self {
            UpstreamEvent::Capabilities(_) => UpstreamEventCode::OnCapabilities,
            UpstreamEvent::LinkProperties(_) => UpstreamEventCode::OnLinkProperties,
            UpstreamEvent::Lost(_) => UpstreamEventCode::OnLost,
            UpstreamEvent::LocalPrefixes(_) => UpstreamEventCode::NotifyLocalPrefixes,
        }
    }

    pub fn network_state(&self) -> Option<&UpstreamNetworkState> {
        match self {
            UpstreamEvent::Capabilities(state)
            | UpstreamEvent::LinkProperties(state)
            | UpstreamEvent::Lost(state) => Some(state),
            UpstreamEvent::LocalPrefixes(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UpstreamEvent, UpstreamEventCode};
    use crate::model::network_handle::NetworkHandle;
    use crate::model::upstream_state::UpstreamNetworkState;

    #[test]
    fn codes_match_controller_contract() {
        assert_eq!(UpstreamEventCode::OnCapabilities.code(), 1);
        assert_eq!(UpstreamEventCode::OnLinkProperties.code(), 2);
        assert_eq!(UpstreamEventCode::OnLost.code(), 3);
        assert_eq!(UpstreamEventCode::NotifyLocalPrefixes.code(), 10);
    }

    #[test]
    fn prefix_event_has_no_network_state() {
        let lost = UpstreamEvent::Lost(UpstreamNetworkState::new(NetworkHandle::new(1)));
        let prefixes = UpstreamEvent::LocalPrefixes(Default::default());

        assert_eq!(lost.code().to_string(), "ON_LOST");
        assert!(lost.network_state().is_some());
        assert!(prefixes.network_state().is_none());
    }
}
