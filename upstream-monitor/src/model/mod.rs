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

//! Value types shared by every layer: handles, descriptors, link properties,
//! legacy types, request shapes and per-network state.

pub(crate) mod capabilities;
pub(crate) mod legacy_type;
pub(crate) mod link_properties;
pub(crate) mod network_handle;
pub(crate) mod network_request;
pub(crate) mod upstream_state;
