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

//! Selection layer: two independent policies over the registry.
//!
//! `legacy_selector` walks a caller-supplied priority list of legacy types.
//! `preferred_upstream` follows the system default network. They overlap in
//! purpose and are deliberately kept separate.

pub(crate) mod legacy_selector;
pub(crate) mod preferred_upstream;
