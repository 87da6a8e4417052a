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

//! Capability filters and the request shapes handed to the observation service.

use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};
use crate::model::legacy_type::LegacyType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Transport + capability predicate over [`NetworkCapabilities`].
///
/// A descriptor satisfies the filter when it carries at least one of the filter's
/// transports (any transport if the filter names none), every required capability,
/// and none of the forbidden ones.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityFilter {
    #[serde(default)]
    transports: BTreeSet<Transport>,
    #[serde(default)]
    required: BTreeSet<Capability>,
    #[serde(default)]
    forbidden: BTreeSet<Capability>,
}

impl CapabilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transports.insert(transport);
        self
    }

    pub fn require(mut self, capability: Capability) -> Self {
        self.forbidden.remove(&capability);
        self.required.insert(capability);
        self
    }

    pub fn forbid(mut self, capability: Capability) -> Self {
        self.required.remove(&capability);
        self.forbidden.insert(capability);
        self
    }

    pub fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }

    pub fn requires(&self, capability: Capability) -> bool {
        self.required.contains(&capability)
    }

    pub fn forbids(&self, capability: Capability) -> bool {
        self.forbidden.contains(&capability)
    }

    /// Whether matching this filter means running over cellular.
    pub fn is_cellular(&self) -> bool {
        self.has_transport(Transport::Cellular)
    }

    /// Half-known networks (no descriptor yet) never satisfy a filter.
    pub fn satisfied_by(&self, capabilities: Option<&NetworkCapabilities>) -> bool {
        let Some(capabilities) = capabilities else {
            return false;
        };

        let transport_ok = self.transports.is_empty()
            || self
                .transports
                .iter()
                .any(|transport| capabilities.has_transport(*transport));

        transport_ok
            && self
                .required
                .iter()
                .all(|capability| capabilities.has_capability(*capability))
            && !self
                .forbidden
                .iter()
                .any(|capability| capabilities.has_capability(*capability))
    }

    /// Criteria the platform uses for its own default internet request.
    pub fn default_internet() -> Self {
        Self::new()
            .require(Capability::Internet)
            .require(Capability::NotRestricted)
            .require(Capability::NotVpn)
    }

    /// Cellular network reserved for tethering (DUN). DUN networks are restricted.
    pub fn mobile_dun() -> Self {
        Self::new()
            .with_transport(Transport::Cellular)
            .require(Capability::Dun)
            .forbid(Capability::NotRestricted)
    }

    /// Plain cellular internet.
    pub fn mobile_internet() -> Self {
        Self::new()
            .with_transport(Transport::Cellular)
            .require(Capability::Internet)
    }
}

impl Display for CapabilityFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let join = |items: Vec<String>| items.join("|");
        write!(
            f,
            "transports={} required={} forbidden={}",
            join(self.transports.iter().map(ToString::to_string).collect()),
            join(self.required.iter().map(ToString::to_string).collect()),
            join(self.forbidden.iter().map(ToString::to_string).collect()),
        )
    }
}

/// What a subscription asks the observation service for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NetworkRequest {
    /// Every network, unfiltered. Never brings a network up.
    ListenAll,
    /// Follows the system default network matching the filter. Shares fate with
    /// the platform default request, so it never brings a network up on its own.
    TrackDefault(CapabilityFilter),
    /// Actively asks for a network matching the filter.
    Request {
        filter: CapabilityFilter,
        legacy_type: LegacyType,
    },
}

impl Display for NetworkRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkRequest::ListenAll => write!(f, "ListenAll"),
            NetworkRequest::TrackDefault(filter) => write!(f, "TrackDefault({filter})"),
            NetworkRequest::Request {
                filter,
                legacy_type,
            } => write!(f, "Request({filter}, legacy_type={legacy_type})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CapabilityFilter;
    use crate::model::capabilities::{Capability, NetworkCapabilities, Transport};

    fn dun_cellular() -> NetworkCapabilities {
        NetworkCapabilities::builder()
            .add_transport(Transport::Cellular)
            .add_capability(Capability::Dun)
            .add_capability(Capability::NotVpn)
            .build()
    }

    #[test]
    fn half_known_network_never_matches() {
        assert!(!CapabilityFilter::new().satisfied_by(None));
    }

    #[test]
    fn dun_filter_matches_restricted_dun_network() {
        assert!(CapabilityFilter::mobile_dun().satisfied_by(Some(&dun_cellular())));
    }

    #[test]
    fn forbidden_capability_rejects_network() {
        let unrestricted_internet = NetworkCapabilities::builder()
            .add_transport(Transport::Cellular)
            .add_capability(Capability::Internet)
            .add_capability(Capability::NotRestricted)
            .build();
        let filter = CapabilityFilter::mobile_internet().forbid(Capability::NotRestricted);

        assert!(!filter.satisfied_by(Some(&unrestricted_internet)));
        assert!(CapabilityFilter::mobile_internet().satisfied_by(Some(&unrestricted_internet)));
    }

    #[test]
    fn transport_mismatch_rejects_network() {
        let filter = CapabilityFilter::new()
            .with_transport(Transport::Wifi)
            .require(Capability::Dun);

        assert!(!filter.satisfied_by(Some(&dun_cellular())));
    }

    #[test]
    fn require_and_forbid_are_exclusive() {
        let filter = CapabilityFilter::new()
            .require(Capability::NotRestricted)
            .forbid(Capability::NotRestricted);

        assert!(filter.forbids(Capability::NotRestricted));
        assert!(!filter.requires(Capability::NotRestricted));
    }
}
