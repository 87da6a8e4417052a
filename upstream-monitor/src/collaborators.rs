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

//! Contracts for the collaborators the monitor depends on but does not own.

use crate::model::network_request::NetworkRequest;
use crate::subscription::network_callback::NetworkCallback;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Settings key read to decide whether a VPN may serve as upstream.
pub const TETHERING_ALLOW_VPN_UPSTREAMS: &str = "tethering_allow_vpn_upstreams";

/// Identifier of one registered callback, issued by the observation service.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub{}", self.0)
    }
}

/// Failure reported by an observation service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObservationError {
    message: String,
}

impl ObservationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ObservationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "observation service error: {}", self.message)
    }
}

impl Error for ObservationError {}

/// Source of live network notifications.
///
/// Implementations deliver `on_available`, `on_capabilities_changed`,
/// `on_link_properties_changed` and `on_lost` to the supplied [`NetworkCallback`]
/// from whatever thread they like; the callback marshals them onto the monitor.
/// Events for one network must be delivered in the order they happened.
#[async_trait]
pub trait NetworkObservationService: Send + Sync {
    async fn register_network_callback(
        &self,
        request: &NetworkRequest,
        callback: NetworkCallback,
    ) -> Result<SubscriptionId, ObservationError>;

    /// After this returns no further events should be delivered for `subscription`.
    async fn unregister_network_callback(
        &self,
        subscription: SubscriptionId,
    ) -> Result<(), ObservationError>;
}

/// Entitlement authority deciding whether cellular may be used as upstream.
pub trait PolicyAuthority: Send + Sync {
    fn is_cellular_upstream_permitted(&self) -> bool;

    /// The system default network became (or stopped being) cellular.
    fn notify_upstream(&self, is_cellular: bool);

    /// Mobile upstream was chosen while the default network is not cellular.
    fn maybe_run_provisioning(&self);
}

/// Synchronous key-value settings reads.
pub trait SettingsStore: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;
}
