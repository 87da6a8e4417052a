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

//! Commands carried by the monitor's single serialized queue.

use crate::collaborators::PolicyAuthority;
use crate::model::legacy_type::LegacyType;
use crate::model::link_properties::LocalPrefixes;
use crate::model::network_handle::NetworkHandle;
use crate::model::network_request::CapabilityFilter;
use crate::model::upstream_state::UpstreamNetworkState;
use crate::selection::legacy_selector::UpstreamSelection;
use crate::subscription::network_callback::{NetworkCallbackEvent, SubscriptionKind};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Both observation callbacks and public calls travel as one of these, so the
/// actor sees a single ordered stream.
pub(crate) enum MonitorCommand {
    Callback {
        kind: SubscriptionKind,
        event: NetworkCallbackEvent,
    },
    StartObserveAllNetworks {
        reply: oneshot::Sender<()>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    StartTrackDefaultNetwork {
        filter: CapabilityFilter,
        policy: Arc<dyn PolicyAuthority>,
        reply: oneshot::Sender<()>,
    },
    UpdateMobileRequiresDun {
        dun_required: bool,
        reply: oneshot::Sender<()>,
    },
    RegisterMobileNetworkRequest {
        reply: oneshot::Sender<()>,
    },
    ReleaseMobileNetworkRequest {
        reply: oneshot::Sender<()>,
    },
    MobileNetworkRequested {
        reply: oneshot::Sender<bool>,
    },
    SelectPreferredUpstreamType {
        preferred_types: Vec<LegacyType>,
        reply: oneshot::Sender<UpstreamSelection>,
    },
    GetCurrentPreferredUpstream {
        reply: oneshot::Sender<Option<UpstreamNetworkState>>,
    },
    LocalPrefixes {
        reply: oneshot::Sender<LocalPrefixes>,
    },
    SetCurrentUpstream {
        network: Option<NetworkHandle>,
        reply: oneshot::Sender<()>,
    },
    CurrentUpstream {
        reply: oneshot::Sender<Option<NetworkHandle>>,
    },
    Shutdown,
}

impl MonitorCommand {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            MonitorCommand::Callback { .. } => "callback",
            MonitorCommand::StartObserveAllNetworks { .. } => "start_observe_all_networks",
            MonitorCommand::Stop { .. } => "stop",
            MonitorCommand::StartTrackDefaultNetwork { .. } => "start_track_default_network",
            MonitorCommand::UpdateMobileRequiresDun { .. } => "update_mobile_requires_dun",
            MonitorCommand::RegisterMobileNetworkRequest { .. } => {
                "register_mobile_network_request"
            }
            MonitorCommand::ReleaseMobileNetworkRequest { .. } => "release_mobile_network_request",
            MonitorCommand::MobileNetworkRequested { .. } => "mobile_network_requested",
            MonitorCommand::SelectPreferredUpstreamType { .. } => {
                "select_preferred_upstream_type"
            }
            MonitorCommand::GetCurrentPreferredUpstream { .. } => {
                "get_current_preferred_upstream"
            }
            MonitorCommand::LocalPrefixes { .. } => "local_prefixes",
            MonitorCommand::SetCurrentUpstream { .. } => "set_current_upstream",
            MonitorCommand::CurrentUpstream { .. } => "current_upstream",
            MonitorCommand::Shutdown => "shutdown",
        }
    }
}

impl Debug for MonitorCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MonitorCommand::Callback { kind, event } => f
                .debug_struct("Callback")
                .field("kind", kind)
                .field("event", event)
                .finish(),
            MonitorCommand::UpdateMobileRequiresDun { dun_required, .. } => f
                .debug_struct("UpdateMobileRequiresDun")
                .field("dun_required", dun_required)
                .finish_non_exhaustive(),
            MonitorCommand::SelectPreferredUpstreamType {
                preferred_types, ..
            } => f
                .debug_struct("SelectPreferredUpstreamType")
                .field("preferred_types", preferred_types)
                .finish_non_exhaustive(),
            MonitorCommand::SetCurrentUpstream { network, .. } => f
                .debug_struct("SetCurrentUpstream")
                .field("network", network)
                .finish_non_exhaustive(),
            other => write!(f, "{}", other.name()),
        }
    }
}
