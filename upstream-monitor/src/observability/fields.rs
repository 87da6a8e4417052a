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

//! Canonical structured field keys and value-format helpers.

use crate::model::link_properties::LocalPrefixes;
use crate::model::network_handle::NetworkHandle;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const ACTOR_ID: &str = "actor_id";
pub const ACTOR_THREAD: &str = "actor_thread";
pub const MONITOR_NAME: &str = "monitor_name";

pub const NETWORK: &str = "network";
pub const SUBSCRIPTION_KIND: &str = "subscription_kind";
pub const LEGACY_TYPE: &str = "legacy_type";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_UNKNOWN_NETWORK: &str = "unknown_network";
pub const REASON_UNCHANGED: &str = "unchanged";
pub const REASON_CONTROLLER_CLOSED: &str = "controller_closed";
pub const REASON_ALL_HANDLES_DROPPED: &str = "all_handles_dropped";
pub const DEFAULT_ACTOR_THREAD: &str = "unknown-thread";

/// Correlation fields attached to every actor log line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActorContext {
    pub actor_id: String,
    pub actor_thread: String,
    pub monitor_name: String,
}

impl ActorContext {
    pub fn with_current_thread(actor_id: impl Into<String>, monitor_name: &str) -> Self {
        Self {
            actor_id: actor_id.into(),
            actor_thread: current_thread_name_or_default(),
            monitor_name: monitor_name.to_string(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_ACTOR_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_optional_network(network: Option<NetworkHandle>) -> String {
    network
        .map(|network| network.to_string())
        .unwrap_or_else(|| NONE.to_string())
}

/// Sorted, comma-separated rendering so log lines are stable across runs.
pub fn format_prefixes(prefixes: &LocalPrefixes) -> String {
    let mut rendered: Vec<String> = prefixes.iter().map(ToString::to_string).collect();
    rendered.sort();
    format!("[{}]", rendered.join(","))
}
