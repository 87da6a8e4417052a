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

//! Subscription layer.
//!
//! `network_callback` is the tagged sink handed to the observation service.
//! `subscription_manager` decides when each of the three subscriptions exists.

pub(crate) mod network_callback;
pub(crate) mod subscription_manager;
