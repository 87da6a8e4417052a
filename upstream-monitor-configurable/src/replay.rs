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

//! Scripted stand-ins for the platform collaborators and the trace format that
//! drives them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use upstream_monitor::{
    LegacyType, LinkProperties, NetworkCallback, NetworkCallbackEvent, NetworkCapabilities,
    NetworkHandle, NetworkObservationService, NetworkRequest, ObservationError, PolicyAuthority,
    SubscriptionId, SubscriptionKind,
};

/// One line of a replay trace.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    Available {
        via: SubscriptionKind,
        network: NetworkHandle,
    },
    Capabilities {
        via: SubscriptionKind,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    },
    LinkProperties {
        via: SubscriptionKind,
        network: NetworkHandle,
        link_properties: LinkProperties,
    },
    Lost {
        via: SubscriptionKind,
        network: NetworkHandle,
    },
    /// Runs a selection. Without `preferred_types` the configured list is used.
    Select {
        #[serde(default)]
        preferred_types: Option<Vec<LegacyType>>,
    },
}

impl TraceStep {
    /// The callback this step stands for, or `None` for a selection step.
    pub fn callback(&self) -> Option<(SubscriptionKind, NetworkCallbackEvent)> {
        match self {
            TraceStep::Available { via, network } => {
                Some((*via, NetworkCallbackEvent::Available(*network)))
            }
            TraceStep::Capabilities {
                via,
                network,
                capabilities,
            } => Some((
                *via,
                NetworkCallbackEvent::CapabilitiesChanged(*network, capabilities.clone()),
            )),
            TraceStep::LinkProperties {
                via,
                network,
                link_properties,
            } => Some((
                *via,
                NetworkCallbackEvent::LinkPropertiesChanged(*network, link_properties.clone()),
            )),
            TraceStep::Lost { via, network } => {
                Some((*via, NetworkCallbackEvent::Lost(*network)))
            }
            TraceStep::Select { .. } => None,
        }
    }
}

/// Observation service that hands trace callbacks to whichever subscriptions are
/// registered at the time.
#[derive(Default)]
pub struct ScriptedObservationService {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, NetworkCallback)>>,
}

impl ScriptedObservationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many callbacks of `kind` were registered to receive `event`.
    pub fn deliver(&self, kind: SubscriptionKind, event: NetworkCallbackEvent) -> usize {
        let targets: Vec<NetworkCallback> = self
            .callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|(_, callback)| callback.kind() == kind)
            .map(|(_, callback)| callback.clone())
            .collect();

        if targets.is_empty() {
            warn!("no {kind} subscription registered, dropping {event:?}");
        }
        for callback in &targets {
            callback.deliver(event.clone());
        }
        targets.len()
    }
}

#[async_trait]
impl NetworkObservationService for ScriptedObservationService {
    async fn register_network_callback(
        &self,
        request: &NetworkRequest,
        callback: NetworkCallback,
    ) -> Result<SubscriptionId, ObservationError> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        info!("registered {} callback {id} for {request}", callback.kind());
        self.callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, callback));
        Ok(id)
    }

    async fn unregister_network_callback(
        &self,
        subscription: SubscriptionId,
    ) -> Result<(), ObservationError> {
        let mut callbacks = self
            .callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = callbacks.len();
        callbacks.retain(|(id, _)| *id != subscription);
        if callbacks.len() == before {
            return Err(ObservationError::new(format!(
                "unknown subscription {subscription}"
            )));
        }
        info!("unregistered callback {subscription}");
        Ok(())
    }
}

/// Policy authority with a fixed answer that logs what the monitor tells it.
pub struct StaticPolicy {
    cellular_permitted: AtomicBool,
}

impl StaticPolicy {
    pub fn new(cellular_permitted: bool) -> Self {
        Self {
            cellular_permitted: AtomicBool::new(cellular_permitted),
        }
    }
}

impl PolicyAuthority for StaticPolicy {
    fn is_cellular_upstream_permitted(&self) -> bool {
        self.cellular_permitted.load(Ordering::SeqCst)
    }

    fn notify_upstream(&self, is_cellular: bool) {
        info!("policy: default network cellular={is_cellular}");
    }

    fn maybe_run_provisioning(&self) {
        debug!("policy: provisioning check requested");
    }
}

#[cfg(test)]
mod tests {
    use super::{ScriptedObservationService, TraceStep};
    use upstream_monitor::{
        LegacyType, NetworkCallbackEvent, NetworkHandle, NetworkObservationService,
        SubscriptionId, SubscriptionKind, Transport,
    };

    #[test]
    fn sample_trace_parses() {
        let contents = include_str!("../config/trace.json5");
        let trace: Vec<TraceStep> = json5::from_str(contents).unwrap();

        assert_eq!(
            trace.first(),
            Some(&TraceStep::Available {
                via: SubscriptionKind::ListenAll,
                network: NetworkHandle::new(100),
            })
        );
        match &trace[1] {
            TraceStep::Capabilities { capabilities, .. } => {
                assert!(capabilities.has_transport(Transport::Wifi));
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(
            trace.last(),
            Some(&TraceStep::Select {
                preferred_types: Some(vec![LegacyType::Wifi]),
            })
        );
    }

    #[test]
    fn select_step_has_no_callback() {
        let step = TraceStep::Select {
            preferred_types: None,
        };
        assert!(step.callback().is_none());

        let lost = TraceStep::Lost {
            via: SubscriptionKind::DefaultTracker,
            network: NetworkHandle::new(7),
        };
        assert_eq!(
            lost.callback(),
            Some((
                SubscriptionKind::DefaultTracker,
                NetworkCallbackEvent::Lost(NetworkHandle::new(7))
            ))
        );
    }

    #[tokio::test]
    async fn delivery_without_subscribers_reaches_nobody() {
        let service = ScriptedObservationService::new();

        assert_eq!(
            service.deliver(
                SubscriptionKind::ListenAll,
                NetworkCallbackEvent::Available(NetworkHandle::new(1))
            ),
            0
        );
        assert!(service
            .unregister_network_callback(SubscriptionId::new(1))
            .await
            .is_err());
    }
}
