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

//! Owner of the three observation-service subscriptions.

use crate::collaborators::{NetworkObservationService, PolicyAuthority, SubscriptionId};
use crate::dispatch::command::MonitorCommand;
use crate::model::legacy_type::LegacyType;
use crate::model::network_request::{CapabilityFilter, NetworkRequest};
use crate::observability::events;
use crate::subscription::network_callback::{NetworkCallback, SubscriptionKind};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

const COMPONENT: &str = "subscription_manager";

/// A registration the observation service accepted.
struct ActiveSubscription {
    id: SubscriptionId,
    request: NetworkRequest,
}

/// Keeps at most one active subscription per [`SubscriptionKind`].
///
/// Lives inside the monitor actor, so none of its state is shared.
pub(crate) struct SubscriptionManager {
    service: Arc<dyn NetworkObservationService>,
    command_sender: UnboundedSender<MonitorCommand>,
    listen_all: Option<ActiveSubscription>,
    default_tracker: Option<ActiveSubscription>,
    mobile_request: Option<ActiveSubscription>,
    dun_required: bool,
    policy: Option<Arc<dyn PolicyAuthority>>,
}

impl SubscriptionManager {
    pub(crate) fn new(
        service: Arc<dyn NetworkObservationService>,
        command_sender: UnboundedSender<MonitorCommand>,
    ) -> Self {
        Self {
            service,
            command_sender,
            listen_all: None,
            default_tracker: None,
            mobile_request: None,
            dun_required: false,
            policy: None,
        }
    }

    /// (Re)starts the unfiltered listen-all subscription.
    pub(crate) async fn start_listen_all(&mut self) {
        self.release(SubscriptionKind::ListenAll).await;
        self.listen_all = self
            .register(SubscriptionKind::ListenAll, NetworkRequest::ListenAll)
            .await;
    }

    /// Starts tracking the system default network. The first call wins for both
    /// the subscription and the policy binding.
    pub(crate) async fn start_default_tracking(
        &mut self,
        filter: CapabilityFilter,
        policy: Arc<dyn PolicyAuthority>,
    ) {
        if self.default_tracker.is_none() {
            self.default_tracker = self
                .register(
                    SubscriptionKind::DefaultTracker,
                    NetworkRequest::TrackDefault(filter),
                )
                .await;
        } else {
            debug!(
                event = events::SUBSCRIPTION_ALREADY_ACTIVE,
                component = COMPONENT,
                subscription_kind = SubscriptionKind::DefaultTracker.as_str(),
                "default network already tracked"
            );
        }

        if self.policy.is_none() {
            self.policy = Some(policy);
        }
    }

    /// Files the mobile upstream request if cellular upstream is permitted.
    pub(crate) async fn request_mobile_upstream(&mut self) {
        if !self.cellular_upstream_permitted() {
            info!(
                event = events::MOBILE_REQUEST_NOT_PERMITTED,
                component = COMPONENT,
                dun_required = self.dun_required,
                "mobile upstream request not permitted"
            );
            self.release_mobile_upstream().await;
            return;
        }

        if let Some(active) = self.mobile_request.as_ref() {
            warn!(
                event = events::SUBSCRIPTION_ALREADY_ACTIVE,
                component = COMPONENT,
                subscription_kind = SubscriptionKind::MobileRequest.as_str(),
                subscription = %active.id,
                "mobile upstream request already registered"
            );
            return;
        }

        let (filter, legacy_type) = if self.dun_required {
            (CapabilityFilter::mobile_dun(), LegacyType::MobileDun)
        } else {
            (CapabilityFilter::mobile_internet(), LegacyType::MobileHipri)
        };
        let request = NetworkRequest::Request {
            filter,
            legacy_type,
        };

        info!(
            event = events::MOBILE_REQUEST_START,
            component = COMPONENT,
            request = %request,
            "requesting mobile upstream network"
        );
        self.mobile_request = self
            .register(SubscriptionKind::MobileRequest, request)
            .await;
    }

    pub(crate) async fn release_mobile_upstream(&mut self) {
        self.release(SubscriptionKind::MobileRequest).await;
    }

    /// Records the DUN requirement and re-files an active mobile request under it.
    pub(crate) async fn update_dun_requirement(&mut self, dun_required: bool) {
        let changed = self.dun_required != dun_required;
        self.dun_required = dun_required;
        if changed && self.mobile_requested() {
            self.release_mobile_upstream().await;
            self.request_mobile_upstream().await;
        }
    }

    /// Drops the mobile request and listen-all. Default tracking survives so
    /// the policy authority keeps seeing the default network.
    pub(crate) async fn stop_all(&mut self) {
        self.release_mobile_upstream().await;
        self.release(SubscriptionKind::ListenAll).await;
    }

    /// Releases every subscription, default tracking included. Used when the
    /// monitor itself goes away.
    pub(crate) async fn shutdown(&mut self) {
        self.stop_all().await;
        self.release(SubscriptionKind::DefaultTracker).await;
    }

    pub(crate) fn mobile_requested(&self) -> bool {
        self.mobile_request.is_some()
    }

    pub(crate) fn dun_required(&self) -> bool {
        self.dun_required
    }

    pub(crate) fn policy(&self) -> Option<&Arc<dyn PolicyAuthority>> {
        self.policy.as_ref()
    }

    /// Without a bound policy authority cellular is treated as permitted.
    pub(crate) fn cellular_upstream_permitted(&self) -> bool {
        self.policy
            .as_ref()
            .map_or(true, |policy| policy.is_cellular_upstream_permitted())
    }

    pub(crate) fn is_active(&self, kind: SubscriptionKind) -> bool {
        self.slot(kind).is_some()
    }

    fn slot(&self, kind: SubscriptionKind) -> &Option<ActiveSubscription> {
        match kind {
            SubscriptionKind::ListenAll => &self.listen_all,
            SubscriptionKind::DefaultTracker => &self.default_tracker,
            SubscriptionKind::MobileRequest => &self.mobile_request,
        }
    }

    fn slot_mut(&mut self, kind: SubscriptionKind) -> &mut Option<ActiveSubscription> {
        match kind {
            SubscriptionKind::ListenAll => &mut self.listen_all,
            SubscriptionKind::DefaultTracker => &mut self.default_tracker,
            SubscriptionKind::MobileRequest => &mut self.mobile_request,
        }
    }

    async fn register(
        &self,
        kind: SubscriptionKind,
        request: NetworkRequest,
    ) -> Option<ActiveSubscription> {
        let callback = NetworkCallback::new(kind, self.command_sender.clone());
        match self
            .service
            .register_network_callback(&request, callback)
            .await
        {
            Ok(id) => {
                debug!(
                    event = events::SUBSCRIPTION_REGISTER_OK,
                    component = COMPONENT,
                    subscription_kind = kind.as_str(),
                    subscription = %id,
                    request = %request,
                    "registered network callback"
                );
                Some(ActiveSubscription { id, request })
            }
            Err(err) => {
                error!(
                    event = events::SUBSCRIPTION_REGISTER_FAILED,
                    component = COMPONENT,
                    subscription_kind = kind.as_str(),
                    request = %request,
                    err = %err,
                    "unable to register network callback"
                );
                None
            }
        }
    }

    async fn release(&mut self, kind: SubscriptionKind) {
        let Some(active) = self.slot_mut(kind).take() else {
            return;
        };

        if let Err(err) = self.service.unregister_network_callback(active.id).await {
            warn!(
                event = events::SUBSCRIPTION_UNREGISTER_FAILED,
                component = COMPONENT,
                subscription_kind = kind.as_str(),
                subscription = %active.id,
                request = %active.request,
                err = %err,
                "unable to unregister network callback; forgetting it anyway"
            );
        } else {
            debug!(
                event = events::SUBSCRIPTION_UNREGISTER_OK,
                component = COMPONENT,
                subscription_kind = kind.as_str(),
                subscription = %active.id,
                request = %active.request,
                "unregistered network callback"
            );
        }
    }
}
