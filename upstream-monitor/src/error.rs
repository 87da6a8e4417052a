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

//! Errors returned by the public monitor handle.

use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Failures of the [`UpstreamMonitor`](crate::UpstreamMonitor) handle itself.
///
/// The monitor's own logic has no fatal conditions; these only describe the
/// handle losing contact with its actor.
pub enum MonitorError {
    /// The actor is no longer accepting commands.
    ActorUnavailable,
    /// The actor dropped the command before replying.
    ReplyDropped,
    /// The actor thread could not be started.
    RuntimeSpawn(std::io::Error),
}

impl Debug for MonitorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::ActorUnavailable => write!(f, "ActorUnavailable"),
            MonitorError::ReplyDropped => write!(f, "ReplyDropped"),
            MonitorError::RuntimeSpawn(err) => write!(f, "RuntimeSpawn({:?})", err),
        }
    }
}

impl Display for MonitorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::ActorUnavailable => {
                write!(f, "Upstream monitor actor is no longer running")
            }
            MonitorError::ReplyDropped => {
                write!(f, "Upstream monitor actor dropped the command without replying")
            }
            MonitorError::RuntimeSpawn(err) => {
                write!(f, "Unable to start upstream monitor runtime: {}", err)
            }
        }
    }
}

impl Error for MonitorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MonitorError::RuntimeSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MonitorError {
    fn from(err: std::io::Error) -> Self {
        MonitorError::RuntimeSpawn(err)
    }
}
