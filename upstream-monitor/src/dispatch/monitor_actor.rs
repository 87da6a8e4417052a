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

//! The monitor actor: sole owner of registry, prefix cache and subscriptions.

use crate::collaborators::{SettingsStore, TETHERING_ALLOW_VPN_UPSTREAMS};
use crate::dispatch::command::MonitorCommand;
use crate::model::capabilities::NetworkCapabilities;
use crate::model::legacy_type::LegacyType;
use crate::model::link_properties::LinkProperties;
use crate::model::network_handle::NetworkHandle;
use crate::model::upstream_state::UpstreamNetworkState;
use crate::observability::events;
use crate::observability::fields::{self, ActorContext};
use crate::registry::network_registry::NetworkRegistry;
use crate::registry::prefix_aggregator::PrefixAggregator;
use crate::selection::legacy_selector::{
    find_first_available_upstream_by_type, mobile_request_action, MobileRequestAction,
    UpstreamSelection,
};
use crate::selection::preferred_upstream::{current_preferred_upstream, DefaultNetworkView};
use crate::subscription::network_callback::{NetworkCallbackEvent, SubscriptionKind};
use crate::subscription::subscription_manager::SubscriptionManager;
use crate::upstream_event::UpstreamEvent;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tracing::{debug, info, trace, Level};

const COMPONENT: &str = "monitor_actor";

/// All monitor state. Only [`UpstreamMonitorActor::run`] touches it, one command
/// at a time, so nothing here is locked.
pub(crate) struct UpstreamMonitorActor {
    context: ActorContext,
    subscriptions: SubscriptionManager,
    registry: NetworkRegistry,
    prefixes: PrefixAggregator,
    settings: Arc<dyn SettingsStore>,
    event_sender: UnboundedSender<UpstreamEvent>,
    default_network: Option<NetworkHandle>,
    is_default_cellular: bool,
    vpn_network: Option<NetworkHandle>,
    current_upstream: Option<NetworkHandle>,
}

impl UpstreamMonitorActor {
    pub(crate) fn new(
        actor_id: String,
        monitor_name: &str,
        subscriptions: SubscriptionManager,
        settings: Arc<dyn SettingsStore>,
        event_sender: UnboundedSender<UpstreamEvent>,
    ) -> Self {
        Self {
            context: ActorContext {
                actor_id,
                actor_thread: fields::thread_name_or_default(None),
                monitor_name: monitor_name.to_string(),
            },
            subscriptions,
            registry: NetworkRegistry::new(),
            prefixes: PrefixAggregator::new(),
            settings,
            event_sender,
            default_network: None,
            is_default_cellular: false,
            vpn_network: None,
            current_upstream: None,
        }
    }

    /// Drains the command queue until a shutdown command arrives, then releases
    /// all subscriptions.
    ///
    /// The subscription manager and every registered callback hold senders of
    /// their own, so the queue does not close when the public handle goes away.
    /// Only [`MonitorCommand::Shutdown`] ends the loop.
    pub(crate) async fn run(mut self, mut command_receiver: UnboundedReceiver<MonitorCommand>) {
        self.context.actor_thread = fields::current_thread_name_or_default();
        info!(
            event = events::MONITOR_START,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            actor_thread = self.context.actor_thread.as_str(),
            monitor_name = self.context.monitor_name.as_str(),
            "upstream monitor actor started"
        );

        while let Some(command) = command_receiver.recv().await {
            if let MonitorCommand::Shutdown = command {
                info!(
                    event = events::MONITOR_SHUTDOWN,
                    component = COMPONENT,
                    actor_id = self.context.actor_id.as_str(),
                    actor_thread = self.context.actor_thread.as_str(),
                    "shutdown requested; stopping actor"
                );
                break;
            }
            self.handle_command(command).await;
        }

        self.subscriptions.shutdown().await;
    }

    pub(crate) async fn handle_command(&mut self, command: MonitorCommand) {
        let command_name = command.name();
        match command {
            MonitorCommand::Callback { kind, event } => self.handle_callback(kind, event),
            MonitorCommand::StartObserveAllNetworks { reply } => {
                self.stop().await;
                self.subscriptions.start_listen_all().await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::Stop { reply } => {
                self.stop().await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::StartTrackDefaultNetwork {
                filter,
                policy,
                reply,
            } => {
                self.subscriptions
                    .start_default_tracking(filter, policy)
                    .await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::UpdateMobileRequiresDun {
                dun_required,
                reply,
            } => {
                self.subscriptions
                    .update_dun_requirement(dun_required)
                    .await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::RegisterMobileNetworkRequest { reply } => {
                self.subscriptions.request_mobile_upstream().await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::ReleaseMobileNetworkRequest { reply } => {
                self.subscriptions.release_mobile_upstream().await;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::MobileNetworkRequested { reply } => {
                let requested = self.subscriptions.mobile_requested();
                self.reply(command_name, reply, requested);
            }
            MonitorCommand::SelectPreferredUpstreamType {
                preferred_types,
                reply,
            } => {
                let selection = self.select_preferred_upstream_type(&preferred_types).await;
                self.reply(command_name, reply, selection);
            }
            MonitorCommand::GetCurrentPreferredUpstream { reply } => {
                let preferred = self.current_preferred_upstream();
                self.reply(command_name, reply, preferred);
            }
            MonitorCommand::LocalPrefixes { reply } => {
                let prefixes = self.prefixes.local_prefixes();
                self.reply(command_name, reply, prefixes);
            }
            MonitorCommand::SetCurrentUpstream { network, reply } => {
                debug!(
                    event = events::CURRENT_UPSTREAM_SET,
                    component = COMPONENT,
                    actor_id = self.context.actor_id.as_str(),
                    network = %fields::format_optional_network(network),
                    "current upstream recorded"
                );
                self.current_upstream = network;
                self.reply(command_name, reply, ());
            }
            MonitorCommand::CurrentUpstream { reply } => {
                let current_upstream = self.current_upstream;
                self.reply(command_name, reply, current_upstream);
            }
            MonitorCommand::Shutdown => {}
        }
    }

    /// Releases the mobile request and listen-all and forgets every tracked
    /// network. Default tracking and the prefix cache are left alone.
    async fn stop(&mut self) {
        info!(
            event = events::MONITOR_STOP,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            tracked_networks = self.registry.len(),
            "stopping upstream observation"
        );
        self.subscriptions.stop_all().await;
        self.vpn_network = None;
        self.current_upstream = None;
        self.registry.clear();
    }

    /// Single dispatch point for observation callbacks, keyed on the subscription tag.
    fn handle_callback(&mut self, kind: SubscriptionKind, event: NetworkCallbackEvent) {
        if tracing::enabled!(Level::TRACE) {
            trace!(
                event = events::CALLBACK_RECEIVE,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                subscription_kind = kind.as_str(),
                network = %event.network(),
                callback = event.name(),
                "network callback received"
            );
        }
        if !self.subscriptions.is_active(kind) {
            debug!(
                event = events::CALLBACK_FROM_INACTIVE_SUBSCRIPTION,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                subscription_kind = kind.as_str(),
                network = %event.network(),
                callback = event.name(),
                "callback raced past unregistration"
            );
        }

        match (kind, event) {
            (_, NetworkCallbackEvent::Available(network)) => self.handle_available(network),
            (
                SubscriptionKind::DefaultTracker,
                NetworkCallbackEvent::CapabilitiesChanged(network, capabilities),
            ) => self.handle_default_capabilities(network, &capabilities),
            (_, NetworkCallbackEvent::CapabilitiesChanged(network, capabilities)) => {
                self.handle_capabilities(network, capabilities)
            }
            (SubscriptionKind::DefaultTracker, NetworkCallbackEvent::LinkPropertiesChanged(..)) => {
            }
            (kind, NetworkCallbackEvent::LinkPropertiesChanged(network, link_properties)) => {
                self.handle_link_properties(network, link_properties);
                if kind == SubscriptionKind::ListenAll {
                    self.recompute_local_prefixes();
                }
            }
            (SubscriptionKind::DefaultTracker, NetworkCallbackEvent::Lost(network)) => {
                self.handle_default_lost(network)
            }
            (kind, NetworkCallbackEvent::Lost(network)) => {
                self.handle_lost(network);
                if kind == SubscriptionKind::ListenAll {
                    self.recompute_local_prefixes();
                }
            }
        }
    }

    fn handle_available(&mut self, network: NetworkHandle) {
        if self.registry.record_available(network) {
            debug!(
                event = events::NETWORK_AVAILABLE,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                network = %network,
                "network available"
            );
        }
    }

    fn handle_default_capabilities(
        &mut self,
        network: NetworkHandle,
        capabilities: &NetworkCapabilities,
    ) {
        self.default_network = Some(network);
        let is_cellular = capabilities.is_cellular();
        if self.is_default_cellular == is_cellular {
            return;
        }

        self.is_default_cellular = is_cellular;
        debug!(
            event = events::DEFAULT_NETWORK_CHANGED,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            network = %network,
            is_cellular,
            "default network cellular state changed"
        );
        if let Some(policy) = self.subscriptions.policy() {
            policy.notify_upstream(is_cellular);
        }
    }

    fn handle_default_lost(&mut self, network: NetworkHandle) {
        debug!(
            event = events::DEFAULT_NETWORK_LOST,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            network = %network,
            "default network lost"
        );
        self.default_network = None;
        self.is_default_cellular = false;
        if let Some(policy) = self.subscriptions.policy() {
            policy.notify_upstream(false);
        }
    }

    fn handle_capabilities(&mut self, network: NetworkHandle, capabilities: NetworkCapabilities) {
        if capabilities.is_vpn_internet() && self.vpn_network != Some(network) {
            debug!(
                event = events::VPN_NETWORK_SET,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                network = %network,
                "internet reachable through vpn"
            );
            self.vpn_network = Some(network);
        }

        match self
            .registry
            .update_capabilities(network, capabilities)
            .cloned()
        {
            Some(state) => {
                debug!(
                    event = events::NETWORK_CAPABILITIES_CHANGED,
                    component = COMPONENT,
                    actor_id = self.context.actor_id.as_str(),
                    network = %network,
                    state = %state,
                    "network capabilities changed"
                );
                self.notify(UpstreamEvent::Capabilities(state));
            }
            None => self.log_ignored_update(network, "capabilities_changed"),
        }
    }

    fn handle_link_properties(&mut self, network: NetworkHandle, link_properties: LinkProperties) {
        match self
            .registry
            .update_link_properties(network, link_properties)
            .cloned()
        {
            Some(state) => {
                debug!(
                    event = events::NETWORK_LINK_PROPERTIES_CHANGED,
                    component = COMPONENT,
                    actor_id = self.context.actor_id.as_str(),
                    network = %network,
                    state = %state,
                    "network link properties changed"
                );
                self.notify(UpstreamEvent::LinkProperties(state));
            }
            None => self.log_ignored_update(network, "link_properties_changed"),
        }
    }

    fn handle_lost(&mut self, network: NetworkHandle) {
        if self.vpn_network == Some(network) {
            debug!(
                event = events::VPN_NETWORK_CLEARED,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                network = %network,
                "vpn internet network lost"
            );
            self.vpn_network = None;
        }

        match self.registry.remove(network) {
            Some(state) => {
                debug!(
                    event = events::NETWORK_LOST,
                    component = COMPONENT,
                    actor_id = self.context.actor_id.as_str(),
                    network = %network,
                    "network lost"
                );
                self.notify(UpstreamEvent::Lost(state));
            }
            None => self.log_ignored_update(network, "lost"),
        }
    }

    fn log_ignored_update(&self, network: NetworkHandle, callback: &'static str) {
        let reason = if self.registry.contains(network) {
            fields::REASON_UNCHANGED
        } else {
            fields::REASON_UNKNOWN_NETWORK
        };
        trace!(
            event = events::NETWORK_UPDATE_IGNORED,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            network = %network,
            callback,
            reason,
            "ignoring network update"
        );
    }

    fn recompute_local_prefixes(&mut self) {
        if let Some(local_prefixes) = self.prefixes.recompute(self.registry.snapshot()) {
            debug!(
                event = events::LOCAL_PREFIXES_CHANGED,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                prefixes = %fields::format_prefixes(&local_prefixes),
                "local prefixes changed"
            );
            self.notify(UpstreamEvent::LocalPrefixes(local_prefixes));
        }
    }

    async fn select_preferred_upstream_type(
        &mut self,
        preferred_types: &[LegacyType],
    ) -> UpstreamSelection {
        let cellular_permitted = self.subscriptions.cellular_upstream_permitted();
        let selection = find_first_available_upstream_by_type(
            self.registry.snapshot(),
            preferred_types,
            cellular_permitted,
        );

        info!(
            event = events::SELECTION_RESULT,
            component = COMPONENT,
            actor_id = self.context.actor_id.as_str(),
            legacy_type = %selection
                .legacy_type
                .map(|legacy_type| legacy_type.to_string())
                .unwrap_or_else(|| fields::NONE.to_string()),
            network = %fields::format_optional_network(
                selection.network.as_ref().map(|state| state.network)
            ),
            cellular_permitted,
            "preferred upstream type selected"
        );

        match mobile_request_action(&selection, cellular_permitted, self.is_default_cellular) {
            MobileRequestAction::Ensure { run_provisioning } => {
                if run_provisioning {
                    if let Some(policy) = self.subscriptions.policy() {
                        debug!(
                            event = events::PROVISIONING_REQUESTED,
                            component = COMPONENT,
                            actor_id = self.context.actor_id.as_str(),
                            "mobile selected over non-cellular default; asking for provisioning"
                        );
                        policy.maybe_run_provisioning();
                    }
                }
                self.subscriptions.request_mobile_upstream().await;
            }
            MobileRequestAction::Release => self.subscriptions.release_mobile_upstream().await,
            MobileRequestAction::Keep => {}
        }

        selection
    }

    fn current_preferred_upstream(&self) -> Option<UpstreamNetworkState> {
        let view = DefaultNetworkView {
            vpn_network: self.vpn_network,
            default_network: self.default_network,
            dun_required: self.subscriptions.dun_required(),
        };
        let settings = &self.settings;
        let subscriptions = &self.subscriptions;

        current_preferred_upstream(
            &self.registry,
            view,
            || settings.get_bool(TETHERING_ALLOW_VPN_UPSTREAMS, false),
            || subscriptions.cellular_upstream_permitted(),
        )
    }

    fn notify(&self, event: UpstreamEvent) {
        let code = event.code();
        if self.event_sender.send(event).is_err() {
            debug!(
                event = events::CONTROLLER_EVENT_DROPPED,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                code = %code,
                reason = fields::REASON_CONTROLLER_CLOSED,
                "controller stopped listening; dropping event"
            );
        }
    }

    fn reply<T>(&self, command: &'static str, reply: oneshot::Sender<T>, value: T) {
        if reply.send(value).is_err() {
            debug!(
                event = events::MONITOR_REPLY_DROPPED,
                component = COMPONENT,
                actor_id = self.context.actor_id.as_str(),
                command,
                "caller went away before the reply"
            );
        }
    }
}
