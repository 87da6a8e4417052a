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

//! Opaque network identity issued by the observation service.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of one network as reported by the observation service.
///
/// The monitor never interprets the value; equality and lifetime belong to the
/// service that issued it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkHandle(u64);

impl NetworkHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NetworkHandle {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for NetworkHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "net{}", self.0)
    }
}
