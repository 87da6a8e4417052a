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
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;
use upstream_monitor::{
    NetworkCallback, NetworkObservationService, NetworkRequest, ObservationError, SubscriptionId,
};

/// Observation service that refuses every registration.
pub struct FailingObservationService {
    name: Arc<String>,
    register_attempts: AtomicUsize,
}

impl FailingObservationService {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::new(name.to_string()),
            register_attempts: AtomicUsize::new(0),
        }
    }

    pub fn register_attempts(&self) -> usize {
        self.register_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkObservationService for FailingObservationService {
    async fn register_network_callback(
        &self,
        request: &NetworkRequest,
        callback: NetworkCallback,
    ) -> Result<SubscriptionId, ObservationError> {
        self.register_attempts.fetch_add(1, Ordering::SeqCst);
        debug!(
            "{}: refusing {} callback for {}",
            self.name,
            callback.kind(),
            request
        );
        Err(ObservationError::new("Failing to register network callback"))
    }

    async fn unregister_network_callback(
        &self,
        subscription: SubscriptionId,
    ) -> Result<(), ObservationError> {
        debug!("{}: unregistering callback {}", self.name, subscription);
        Ok(())
    }
}
