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

//! State layer.
//!
//! Owns the authoritative network registry and the derived local-prefix cache.
//! Both enforce their idempotence rules locally, so the dispatcher above them never
//! performs containment checks of its own.

pub(crate) mod network_registry;
pub(crate) mod prefix_aggregator;
