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

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;
use upstream_monitor::{
    LinkProperties, NetworkCallback, NetworkCallbackEvent, NetworkCapabilities, NetworkHandle,
    NetworkObservationService, NetworkRequest, ObservationError, SubscriptionId,
    SubscriptionKind,
};

/// One callback registration as seen by the fake service.
#[derive(Clone, Debug)]
pub struct FakeRegistration {
    pub id: SubscriptionId,
    pub request: NetworkRequest,
    pub callback: NetworkCallback,
}

#[derive(Default)]
struct FakeState {
    active: Vec<FakeRegistration>,
    history: Vec<FakeRegistration>,
    unregistered: Vec<SubscriptionId>,
}

/// Observation service that records registrations and lets a test play the
/// role of the networking stack by firing callbacks per subscription kind.
pub struct FakeObservationService {
    name: Arc<String>,
    next_id: AtomicU64,
    state: Mutex<FakeState>,
}

impl FakeObservationService {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::new(name.to_string()),
            next_id: AtomicU64::new(1),
            state: Mutex::new(FakeState::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Requests of the currently registered callbacks of `kind`, oldest first.
    pub fn active_requests(&self, kind: SubscriptionKind) -> Vec<NetworkRequest> {
        self.lock()
            .active
            .iter()
            .filter(|registration| registration.callback.kind() == kind)
            .map(|registration| registration.request.clone())
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Every registration ever accepted, in order.
    pub fn registration_history(&self) -> Vec<FakeRegistration> {
        self.lock().history.clone()
    }

    pub fn unregistered(&self) -> Vec<SubscriptionId> {
        self.lock().unregistered.clone()
    }

    /// Delivers `event` to every active callback of `kind`. Returns how many
    /// callbacks received it.
    pub fn fire(&self, kind: SubscriptionKind, event: NetworkCallbackEvent) -> usize {
        let callbacks: Vec<NetworkCallback> = self
            .lock()
            .active
            .iter()
            .filter(|registration| registration.callback.kind() == kind)
            .map(|registration| registration.callback.clone())
            .collect();

        debug!(
            "{}: firing {:?} to {} {} callback(s)",
            self.name,
            event,
            callbacks.len(),
            kind
        );
        for callback in &callbacks {
            callback.deliver(event.clone());
        }
        callbacks.len()
    }

    /// Fires availability, capabilities and link properties for `network`.
    pub fn announce(
        &self,
        kind: SubscriptionKind,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
        link_properties: LinkProperties,
    ) {
        self.fire(kind, NetworkCallbackEvent::Available(network));
        self.fire(
            kind,
            NetworkCallbackEvent::CapabilitiesChanged(network, capabilities),
        );
        self.fire(
            kind,
            NetworkCallbackEvent::LinkPropertiesChanged(network, link_properties),
        );
    }

    pub fn lose(&self, kind: SubscriptionKind, network: NetworkHandle) {
        self.fire(kind, NetworkCallbackEvent::Lost(network));
    }
}

#[async_trait]
impl NetworkObservationService for FakeObservationService {
    async fn register_network_callback(
        &self,
        request: &NetworkRequest,
        callback: NetworkCallback,
    ) -> Result<SubscriptionId, ObservationError> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        debug!(
            "{}: registering {} callback {} for {}",
            self.name,
            callback.kind(),
            id,
            request
        );
        let registration = FakeRegistration {
            id,
            request: request.clone(),
            callback,
        };
        let mut state = self.lock();
        state.active.push(registration.clone());
        state.history.push(registration);
        Ok(id)
    }

    async fn unregister_network_callback(
        &self,
        subscription: SubscriptionId,
    ) -> Result<(), ObservationError> {
        debug!("{}: unregistering callback {}", self.name, subscription);
        let mut state = self.lock();
        let before = state.active.len();
        state
            .active
            .retain(|registration| registration.id != subscription);
        if state.active.len() == before {
            return Err(ObservationError::new(format!(
                "unknown subscription {subscription}"
            )));
        }
        state.unregistered.push(subscription);
        Ok(())
    }
}
