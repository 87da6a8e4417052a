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

//! Callback sink handed to the observation service for one subscription.

use crate::dispatch::command::MonitorCommand;
use crate::model::capabilities::NetworkCapabilities;
use crate::model::link_properties::LinkProperties;
use crate::model::network_handle::NetworkHandle;
use crate::observability::events;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

const COMPONENT: &str = "network_callback";

/// Which of the three subscriptions an event arrived through.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionKind {
    ListenAll,
    DefaultTracker,
    MobileRequest,
}

impl SubscriptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionKind::ListenAll => "listen_all",
            SubscriptionKind::DefaultTracker => "default_tracker",
            SubscriptionKind::MobileRequest => "mobile_request",
        }
    }
}

impl Display for SubscriptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification from the observation service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NetworkCallbackEvent {
    Available(NetworkHandle),
    CapabilitiesChanged(NetworkHandle, NetworkCapabilities),
    LinkPropertiesChanged(NetworkHandle, LinkProperties),
    Lost(NetworkHandle),
}

impl NetworkCallbackEvent {
    pub fn network(&self) -> NetworkHandle {
        match self {
            NetworkCallbackEvent::Available(network)
            | NetworkCallbackEvent::CapabilitiesChanged(network, _)
            | NetworkCallbackEvent::LinkPropertiesChanged(network, _)
            | NetworkCallbackEvent::Lost(network) => *network,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            NetworkCallbackEvent::Available(_) => "available",
            NetworkCallbackEvent::CapabilitiesChanged(..) => "capabilities_changed",
            NetworkCallbackEvent::LinkPropertiesChanged(..) => "link_properties_changed",
            NetworkCallbackEvent::Lost(_) => "lost",
        }
    }
}

/// Tagged callback sink.
///
/// Every subscription gets one of these carrying its [`SubscriptionKind`]. The
/// `on_*` methods may be called from any thread; they only enqueue the event on
/// the monitor's command channel, so no monitor state is touched by the caller.
/// Once the monitor has shut down, events are dropped.
#[derive(Clone)]
pub struct NetworkCallback {
    kind: SubscriptionKind,
    command_sender: UnboundedSender<MonitorCommand>,
}

impl NetworkCallback {
    pub(crate) fn new(
        kind: SubscriptionKind,
        command_sender: UnboundedSender<MonitorCommand>,
    ) -> Self {
        Self {
            kind,
            command_sender,
        }
    }

    pub fn kind(&self) -> SubscriptionKind {
        self.kind
    }

    pub fn on_available(&self, network: NetworkHandle) {
        self.forward(NetworkCallbackEvent::Available(network));
    }

    pub fn on_capabilities_changed(
        &self,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    ) {
        self.forward(NetworkCallbackEvent::CapabilitiesChanged(
            network,
            capabilities,
        ));
    }

    pub fn on_link_properties_changed(&self, network: NetworkHandle, link_properties: LinkProperties) {
        self.forward(NetworkCallbackEvent::LinkPropertiesChanged(
            network,
            link_properties,
        ));
    }

    pub fn on_lost(&self, network: NetworkHandle) {
        self.forward(NetworkCallbackEvent::Lost(network));
    }

    /// Delivers an already-built event.
    pub fn deliver(&self, event: NetworkCallbackEvent) {
        self.forward(event);
    }

    fn forward(&self, event: NetworkCallbackEvent) {
        let network = event.network();
        let callback = event.name();
        if self
            .command_sender
            .send(MonitorCommand::Callback {
                kind: self.kind,
                event,
            })
            .is_err()
        {
            debug!(
                event = events::CALLBACK_DROPPED_MONITOR_CLOSED,
                component = COMPONENT,
                subscription_kind = self.kind.as_str(),
                network = %network,
                callback,
                "monitor gone; dropping network callback"
            );
        }
    }
}

impl Debug for NetworkCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkCallback")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{NetworkCallback, NetworkCallbackEvent, SubscriptionKind};
    use crate::dispatch::command::MonitorCommand;
    use crate::model::network_handle::NetworkHandle;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn callback_tags_events_with_its_kind() {
        let (command_sender, mut command_receiver) = unbounded_channel();
        let callback = NetworkCallback::new(SubscriptionKind::DefaultTracker, command_sender);

        callback.on_available(NetworkHandle::new(3));
        callback.on_lost(NetworkHandle::new(3));

        let mut received = Vec::new();
        while let Ok(command) = command_receiver.try_recv() {
            match command {
                MonitorCommand::Callback { kind, event } => received.push((kind, event)),
                other => panic!("unexpected command: {other:?}"),
            }
        }

        assert_eq!(
            received,
            vec![
                (
                    SubscriptionKind::DefaultTracker,
                    NetworkCallbackEvent::Available(NetworkHandle::new(3))
                ),
                (
                    SubscriptionKind::DefaultTracker,
                    NetworkCallbackEvent::Lost(NetworkHandle::new(3))
                ),
            ]
        );
    }

    #[test]
    fn callback_after_monitor_shutdown_is_dropped() {
        let (command_sender, command_receiver) = unbounded_channel();
        drop(command_receiver);
        let callback = NetworkCallback::new(SubscriptionKind::ListenAll, command_sender);

        callback.on_available(NetworkHandle::new(1));
    }

    #[test]
    fn kind_serializes_in_snake_case() {
        let kind: SubscriptionKind = serde_json::from_str("\"mobile_request\"").unwrap();
        assert_eq!(kind, SubscriptionKind::MobileRequest);
        assert_eq!(kind.to_string(), "mobile_request");
    }
}
