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

//! Last-known state of one candidate upstream network.

use crate::model::capabilities::{Capability, NetworkCapabilities};
use crate::model::link_properties::LinkProperties;
use crate::model::network_handle::NetworkHandle;
use std::fmt::{Display, Formatter};

/// `(network, capabilities, link properties)` as last reported.
///
/// Capabilities and link properties are absent while the network is half-known,
/// that is announced as available but not yet described.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpstreamNetworkState {
    pub network: NetworkHandle,
    pub capabilities: Option<NetworkCapabilities>,
    pub link_properties: Option<LinkProperties>,
}

impl UpstreamNetworkState {
    pub fn new(network: NetworkHandle) -> Self {
        Self {
            network,
            capabilities: None,
            link_properties: None,
        }
    }

    pub fn is_cellular(&self) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(NetworkCapabilities::is_cellular)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.has_capability(capability))
    }

    /// Fully described and not running over cellular.
    pub fn is_usable_and_not_cellular(&self) -> bool {
        self.link_properties.is_some()
            && self
                .capabilities
                .as_ref()
                .is_some_and(|caps| !caps.is_cellular())
    }
}

impl Display for UpstreamNetworkState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "UpstreamNetworkState{{{}", self.network)?;
        if let Some(caps) = &self.capabilities {
            write!(f, ", {caps}")?;
        }
        if let Some(iface) = self
            .link_properties
            .as_ref()
            .and_then(LinkProperties::interface_name)
        {
            write!(f, ", iface={iface}")?;
        }
        write!(f, "}}")
    }
}
