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

//! Canonical structured event names used across `upstream-monitor`.

// Actor lifecycle events.
pub const MONITOR_START: &str = "monitor_start";
pub const MONITOR_STOP: &str = "monitor_stop";
pub const MONITOR_SHUTDOWN: &str = "monitor_shutdown";
pub const MONITOR_COMMAND_CHANNEL_CLOSED: &str = "monitor_command_channel_closed";
pub const MONITOR_REPLY_DROPPED: &str = "monitor_reply_dropped";

// Callback intake and registry events.
pub const CALLBACK_RECEIVE: &str = "callback_receive";
pub const CALLBACK_FROM_INACTIVE_SUBSCRIPTION: &str = "callback_from_inactive_subscription";
pub const CALLBACK_DROPPED_MONITOR_CLOSED: &str = "callback_dropped_monitor_closed";
pub const NETWORK_AVAILABLE: &str = "network_available";
pub const NETWORK_UPDATE_IGNORED: &str = "network_update_ignored";
pub const NETWORK_CAPABILITIES_CHANGED: &str = "network_capabilities_changed";
pub const NETWORK_LINK_PROPERTIES_CHANGED: &str = "network_link_properties_changed";
pub const NETWORK_LOST: &str = "network_lost";
pub const VPN_NETWORK_SET: &str = "vpn_network_set";
pub const VPN_NETWORK_CLEARED: &str = "vpn_network_cleared";
pub const DEFAULT_NETWORK_CHANGED: &str = "default_network_changed";
pub const DEFAULT_NETWORK_LOST: &str = "default_network_lost";
pub const LOCAL_PREFIXES_CHANGED: &str = "local_prefixes_changed";
pub const CONTROLLER_EVENT_DROPPED: &str = "controller_event_dropped";

// Subscription events.
pub const SUBSCRIPTION_REGISTER_OK: &str = "subscription_register_ok";
pub const SUBSCRIPTION_REGISTER_FAILED: &str = "subscription_register_failed";
pub const SUBSCRIPTION_UNREGISTER_OK: &str = "subscription_unregister_ok";
pub const SUBSCRIPTION_UNREGISTER_FAILED: &str = "subscription_unregister_failed";
pub const SUBSCRIPTION_ALREADY_ACTIVE: &str = "subscription_already_active";
pub const MOBILE_REQUEST_START: &str = "mobile_request_start";
pub const MOBILE_REQUEST_NOT_PERMITTED: &str = "mobile_request_not_permitted";

// Selection events.
pub const SELECTION_RESULT: &str = "selection_result";
pub const SELECTION_UNMAPPED_LEGACY_TYPE: &str = "selection_unmapped_legacy_type";
pub const SELECTION_CELLULAR_SKIPPED: &str = "selection_cellular_skipped";
pub const PROVISIONING_REQUESTED: &str = "provisioning_requested";
pub const CURRENT_UPSTREAM_SET: &str = "current_upstream_set";

// Runtime events.
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
