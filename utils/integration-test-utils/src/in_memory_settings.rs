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

use std::collections::HashMap;
use std::sync::Mutex;
use upstream_monitor::{SettingsStore, TETHERING_ALLOW_VPN_UPSTREAMS};

/// Mutable in-memory settings that also count reads.
#[derive(Default)]
pub struct InMemorySettings {
    values: Mutex<HashMap<String, bool>>,
    reads: Mutex<usize>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vpn_upstreams_allowed(allowed: bool) -> Self {
        let settings = Self::new();
        settings.set(TETHERING_ALLOW_VPN_UPSTREAMS, allowed);
        settings
    }

    pub fn set(&self, key: &str, value: bool) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.lock().map(|reads| *reads).unwrap_or_default()
    }
}

impl SettingsStore for InMemorySettings {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        if let Ok(mut reads) = self.reads.lock() {
            *reads += 1;
        }
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).copied())
            .unwrap_or(default)
    }
}
