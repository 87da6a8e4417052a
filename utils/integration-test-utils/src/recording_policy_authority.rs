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

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use upstream_monitor::PolicyAuthority;

/// Policy authority with a switchable permission that records every
/// notification it receives.
pub struct RecordingPolicyAuthority {
    permitted: AtomicBool,
    upstream_notifications: Mutex<Vec<bool>>,
    provisioning_runs: AtomicUsize,
}

impl RecordingPolicyAuthority {
    pub fn new(permitted: bool) -> Self {
        Self {
            permitted: AtomicBool::new(permitted),
            upstream_notifications: Mutex::new(Vec::new()),
            provisioning_runs: AtomicUsize::new(0),
        }
    }

    pub fn set_permitted(&self, permitted: bool) {
        self.permitted.store(permitted, Ordering::SeqCst);
    }

    /// Every `notify_upstream` argument, in order.
    pub fn upstream_notifications(&self) -> Vec<bool> {
        self.upstream_notifications
            .lock()
            .map(|notifications| notifications.clone())
            .unwrap_or_default()
    }

    pub fn provisioning_runs(&self) -> usize {
        self.provisioning_runs.load(Ordering::SeqCst)
    }
}

impl PolicyAuthority for RecordingPolicyAuthority {
    fn is_cellular_upstream_permitted(&self) -> bool {
        self.permitted.load(Ordering::SeqCst)
    }

    fn notify_upstream(&self, is_cellular: bool) {
        if let Ok(mut notifications) = self.upstream_notifications.lock() {
            notifications.push(is_cellular);
        }
    }

    fn maybe_run_provisioning(&self) {
        self.provisioning_runs.fetch_add(1, Ordering::SeqCst);
    }
}
