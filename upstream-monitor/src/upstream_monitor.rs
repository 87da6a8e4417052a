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

//! Public handle to a running upstream monitor.

use crate::collaborators::{NetworkObservationService, PolicyAuthority, SettingsStore};
use crate::dispatch::command::MonitorCommand;
use crate::dispatch::monitor_actor::UpstreamMonitorActor;
use crate::error::MonitorError;
use crate::model::legacy_type::LegacyType;
use crate::model::link_properties::LocalPrefixes;
use crate::model::network_handle::NetworkHandle;
use crate::model::network_request::CapabilityFilter;
use crate::model::upstream_state::UpstreamNetworkState;
use crate::observability::{events, fields};
use crate::runtime::monitor_runtime::{
    spawn_monitor_loop, MonitorLoopHandle, DEFAULT_MONITOR_RUNTIME_THREAD_NAME,
};
use crate::selection::legacy_selector::UpstreamSelection;
use crate::subscription::subscription_manager::SubscriptionManager;
use crate::upstream_event::UpstreamEvent;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

const MONITOR_RUNTIME_THREAD_NAME_PREFIX: &str = "up-mon-";
const MONITOR_RUNTIME_THREAD_NAME_MAX_LEN: usize = 15;
const COMPONENT: &str = "upstream_monitor";

/// Tracks candidate upstream networks and selects the one a tethering
/// controller should share.
///
/// All state lives in an actor running on its own thread. Observation callbacks
/// and the methods below are queued onto that actor in arrival order, so no two
/// operations ever run concurrently. Derived events reach the controller through
/// the receiver returned by [`UpstreamMonitor::start`].
///
/// Dropping the handle shuts the actor down and releases every subscription it
/// still holds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use upstream_monitor::{
///     LegacyType, NetworkCallback, NetworkObservationService, NetworkRequest,
///     ObservationError, SettingsStore, SubscriptionId, UpstreamMonitor,
/// };
///
/// struct NoNetworks;
///
/// #[async_trait]
/// impl NetworkObservationService for NoNetworks {
///     async fn register_network_callback(
///         &self,
///         _request: &NetworkRequest,
///         _callback: NetworkCallback,
///     ) -> Result<SubscriptionId, ObservationError> {
///         Ok(SubscriptionId::new(1))
///     }
///
///     async fn unregister_network_callback(
///         &self,
///         _subscription: SubscriptionId,
///     ) -> Result<(), ObservationError> {
///         Ok(())
///     }
/// }
///
/// struct NoVpn;
///
/// impl SettingsStore for NoVpn {
///     fn get_bool(&self, _key: &str, default: bool) -> bool {
///         default
///     }
/// }
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let (monitor, _events) =
///     UpstreamMonitor::start("doc", Arc::new(NoNetworks), Arc::new(NoVpn)).unwrap();
/// monitor.start_observe_all_networks().await.unwrap();
///
/// let selection = monitor
///     .select_preferred_upstream_type([LegacyType::Wifi, LegacyType::MobileHipri])
///     .await
///     .unwrap();
/// assert!(selection.is_none());
/// # });
/// ```
pub struct UpstreamMonitor {
    name: String,
    command_sender: UnboundedSender<MonitorCommand>,
    loop_handle: MonitorLoopHandle,
}

impl UpstreamMonitor {
    /// Starts the actor and returns the handle together with the controller's
    /// event stream.
    ///
    /// # Parameters
    ///
    /// * `name` - Used in the actor thread name and in log lines.
    /// * `observation` - Source of network callbacks.
    /// * `settings` - Read for the VPN-upstream permission flag.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::RuntimeSpawn`] if the actor thread or its runtime
    /// cannot be created.
    pub fn start(
        name: &str,
        observation: Arc<dyn NetworkObservationService>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<(Self, UnboundedReceiver<UpstreamEvent>), MonitorError> {
        let (command_sender, command_receiver) = unbounded_channel();
        let (event_sender, event_receiver) = unbounded_channel();

        let actor_id = Uuid::new_v4().hyphenated().to_string();
        let thread_name = Self::build_runtime_thread_name(name);
        let subscriptions = SubscriptionManager::new(observation, command_sender.clone());
        let actor = UpstreamMonitorActor::new(
            actor_id.clone(),
            name,
            subscriptions,
            settings,
            event_sender,
        );

        let loop_handle = spawn_monitor_loop(thread_name, move || actor.run(command_receiver))?;

        debug!(
            event = events::MONITOR_START,
            component = COMPONENT,
            monitor_name = name,
            actor_id = actor_id.as_str(),
            actor_thread = loop_handle.actor_thread(),
            "upstream monitor handle ready"
        );

        Ok((
            Self {
                name: name.to_string(),
                command_sender,
                loop_handle,
            },
            event_receiver,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the thread the actor runs on.
    pub fn actor_thread(&self) -> &str {
        self.loop_handle.actor_thread()
    }

    /// `false` once the actor thread has exited.
    pub fn is_running(&self) -> bool {
        !self.loop_handle.is_finished()
    }

    /// Fully stops any previous observation, then listens to every network.
    pub async fn start_observe_all_networks(&self) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::StartObserveAllNetworks { reply })
            .await
    }

    /// Releases the mobile request and the listen-all subscription and forgets
    /// every tracked network. Default-network tracking keeps running.
    pub async fn stop(&self) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::Stop { reply }).await
    }

    /// Starts following the system default network. Only the first call has an
    /// effect; `filter` should match the platform's own default request.
    pub async fn start_track_default_network(
        &self,
        filter: CapabilityFilter,
        policy: Arc<dyn PolicyAuthority>,
    ) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::StartTrackDefaultNetwork {
            filter,
            policy,
            reply,
        })
        .await
    }

    /// Sets whether mobile upstream must use DUN. An active mobile request is
    /// re-filed when the value changes.
    pub async fn update_mobile_requires_dun(&self, dun_required: bool) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::UpdateMobileRequiresDun {
            dun_required,
            reply,
        })
        .await
    }

    pub async fn register_mobile_network_request(&self) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::RegisterMobileNetworkRequest { reply })
            .await
    }

    pub async fn release_mobile_network_request(&self) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::ReleaseMobileNetworkRequest { reply })
            .await
    }

    pub async fn mobile_network_requested(&self) -> Result<bool, MonitorError> {
        self.request(|reply| MonitorCommand::MobileNetworkRequested { reply })
            .await
    }

    /// Picks the first known network matching the first satisfiable type in
    /// `preferred_types`, and files or releases the mobile request to match.
    pub async fn select_preferred_upstream_type<I>(
        &self,
        preferred_types: I,
    ) -> Result<UpstreamSelection, MonitorError>
    where
        I: IntoIterator<Item = LegacyType>,
    {
        let preferred_types = preferred_types.into_iter().collect();
        self.request(|reply| MonitorCommand::SelectPreferredUpstreamType {
            preferred_types,
            reply,
        })
        .await
    }

    /// Upstream implied by the default network, VPN preference and DUN policy.
    pub async fn get_current_preferred_upstream(
        &self,
    ) -> Result<Option<UpstreamNetworkState>, MonitorError> {
        self.request(|reply| MonitorCommand::GetCurrentPreferredUpstream { reply })
            .await
    }

    /// Copy of the last emitted local prefix set.
    pub async fn local_prefixes(&self) -> Result<LocalPrefixes, MonitorError> {
        self.request(|reply| MonitorCommand::LocalPrefixes { reply })
            .await
    }

    /// Records the upstream the controller chose. Informational only.
    pub async fn set_current_upstream(
        &self,
        network: Option<NetworkHandle>,
    ) -> Result<(), MonitorError> {
        self.request(|reply| MonitorCommand::SetCurrentUpstream { network, reply })
            .await
    }

    pub async fn current_upstream(&self) -> Result<Option<NetworkHandle>, MonitorError> {
        self.request(|reply| MonitorCommand::CurrentUpstream { reply })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> MonitorCommand,
    ) -> Result<T, MonitorError> {
        let (reply, reply_receiver) = oneshot::channel();
        let command = build(reply);
        let command_name = command.name();

        if self.command_sender.send(command).is_err() {
            warn!(
                event = events::MONITOR_COMMAND_CHANNEL_CLOSED,
                component = COMPONENT,
                monitor_name = self.name.as_str(),
                command = command_name,
                "actor no longer accepting commands"
            );
            return Err(MonitorError::ActorUnavailable);
        }

        reply_receiver.await.map_err(|_| {
            warn!(
                event = events::MONITOR_REPLY_DROPPED,
                component = COMPONENT,
                monitor_name = self.name.as_str(),
                command = command_name,
                "actor dropped command without replying"
            );
            MonitorError::ReplyDropped
        })
    }

    fn build_runtime_thread_name(name: &str) -> String {
        let suffix_len =
            MONITOR_RUNTIME_THREAD_NAME_MAX_LEN - MONITOR_RUNTIME_THREAD_NAME_PREFIX.len();
        let suffix: String = name
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
            .take(suffix_len)
            .collect();

        if suffix.is_empty() {
            DEFAULT_MONITOR_RUNTIME_THREAD_NAME.to_string()
        } else {
            format!("{MONITOR_RUNTIME_THREAD_NAME_PREFIX}{suffix}")
        }
    }
}

impl Drop for UpstreamMonitor {
    fn drop(&mut self) {
        if self.command_sender.send(MonitorCommand::Shutdown).is_err() {
            debug!(
                event = events::MONITOR_COMMAND_CHANNEL_CLOSED,
                component = COMPONENT,
                monitor_name = self.name.as_str(),
                actor_thread = self.loop_handle.actor_thread(),
                reason = fields::REASON_ALL_HANDLES_DROPPED,
                "actor already stopped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UpstreamMonitor;
    use crate::runtime::monitor_runtime::DEFAULT_MONITOR_RUNTIME_THREAD_NAME;

    #[test]
    fn runtime_thread_name_is_prefixed_and_truncated() {
        assert_eq!(
            UpstreamMonitor::build_runtime_thread_name("tether"),
            "up-mon-tether"
        );
        assert_eq!(
            UpstreamMonitor::build_runtime_thread_name("tethering-main"),
            "up-mon-tetherin"
        );
    }

    #[test]
    fn runtime_thread_name_falls_back_without_usable_characters() {
        assert_eq!(
            UpstreamMonitor::build_runtime_thread_name("\0 /"),
            DEFAULT_MONITOR_RUNTIME_THREAD_NAME
        );
    }
}
