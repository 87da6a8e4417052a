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

use serde::{Deserialize, Serialize};
use upstream_monitor::LegacyType;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) monitor: MonitorConfig,
    pub(crate) settings: SettingsConfig,
    #[serde(default)]
    pub(crate) policy: PolicyConfig,
    pub(crate) selection: SelectionConfig,
    pub(crate) replay: ReplayConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub(crate) name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    pub(crate) static_file: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    pub(crate) cellular_permitted: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cellular_permitted: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    pub(crate) preferred_types: Vec<LegacyType>,
    #[serde(default)]
    pub(crate) dun_required: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    pub(crate) trace_file: String,
}

impl ReplayConfig {
    pub fn load_trace(&self) -> Result<Vec<crate::replay::TraceStep>, Box<dyn std::error::Error>> {
        let trace_contents = std::fs::read_to_string(&self.trace_file)?;
        Ok(json5::from_str(&trace_contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use upstream_monitor::LegacyType;

    #[test]
    fn sample_config_parses() {
        let contents = include_str!("../config/monitor.json5");
        let config: Config = json5::from_str(contents).unwrap();

        assert_eq!(config.monitor.name, "tether-upstream");
        assert!(config.policy.cellular_permitted);
        assert_eq!(
            config.selection.preferred_types,
            vec![LegacyType::Ethernet, LegacyType::Wifi, LegacyType::MobileHipri]
        );
        assert!(!config.selection.dun_required);
    }

    #[test]
    fn unknown_section_is_rejected() {
        let contents = r#"{
            monitor: { name: "m" },
            settings: { static_file: "s.json" },
            selection: { preferred_types: [] },
            replay: { trace_file: "t.json5" },
            transports: {},
        }"#;

        assert!(json5::from_str::<Config>(contents).is_err());
    }

    #[test]
    fn policy_section_defaults_to_permitted() {
        let contents = r#"{
            monitor: { name: "m" },
            settings: { static_file: "s.json" },
            selection: { preferred_types: ["wifi"], dun_required: true },
            replay: { trace_file: "t.json5" },
        }"#;
        let config: Config = json5::from_str(contents).unwrap();

        assert!(config.policy.cellular_permitted);
        assert!(config.selection.dun_required);
    }
}
