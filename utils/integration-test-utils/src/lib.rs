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

mod fake_observation_service;
pub use fake_observation_service::{FakeObservationService, FakeRegistration};
mod failing_observation_service;
pub use failing_observation_service::FailingObservationService;
mod recording_policy_authority;
pub use recording_policy_authority::RecordingPolicyAuthority;
mod in_memory_settings;
pub use in_memory_settings::InMemorySettings;
mod integration_test_utils;

pub use integration_test_utils::{
    barrier, cellular_capabilities, collect_events, drain_events, dun_capabilities, event_codes,
    init_logging, link_properties, vpn_capabilities, wifi_capabilities,
};
