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

//! # upstream-monitor
//!
//! `upstream-monitor` tracks the networks a device could share through tethering
//! and decides which one should serve as the upstream.
//!
//! The owning controller starts an [`UpstreamMonitor`], asks it to observe all
//! networks and to follow the system default network, and then reacts to the
//! [`UpstreamEvent`] stream while calling into the selection entry points when
//! it needs an upstream.
//!
//! Three collaborators are supplied by the embedder:
//!
//! * a [`NetworkObservationService`] delivering network callbacks,
//! * a [`PolicyAuthority`] deciding whether cellular upstream is permitted,
//! * a [`SettingsStore`] holding the VPN-upstream permission flag.
//!
//! ## Threading
//!
//! Every callback and every public call is queued onto one actor task running on
//! its own thread. State is never shared across threads, so there are no locks
//! around it, and per-network callback order is preserved.
//!
//! ## Logging
//!
//! The crate uses `tracing` for logs/events with structured fields. Library code
//! does not install a global subscriber; binaries and tests initialize
//! `tracing_subscriber` themselves.

mod collaborators;
pub use collaborators::{
    NetworkObservationService, ObservationError, PolicyAuthority, SettingsStore, SubscriptionId,
    TETHERING_ALLOW_VPN_UPSTREAMS,
};

mod error;
pub use error::MonitorError;

mod model;
pub use model::capabilities::{
    Capability, NetworkCapabilities, NetworkCapabilitiesBuilder, Transport,
};
pub use model::legacy_type::{LegacyType, UnmappedLegacyType};
pub use model::link_properties::{LinkProperties, LocalPrefixes};
pub use model::network_handle::NetworkHandle;
pub use model::network_request::{CapabilityFilter, NetworkRequest};
pub use model::upstream_state::UpstreamNetworkState;

#[doc(hidden)]
pub mod benchmark_support;
mod dispatch;
#[doc(hidden)]
pub mod observability;
mod registry;
mod runtime;
mod selection;
pub use selection::legacy_selector::UpstreamSelection;

mod subscription;
pub use subscription::network_callback::{NetworkCallback, NetworkCallbackEvent, SubscriptionKind};

mod upstream_event;
pub use upstream_event::{UpstreamEvent, UpstreamEventCode};

mod upstream_monitor;
pub use upstream_monitor::UpstreamMonitor;

pub use ipnet::IpNet;
