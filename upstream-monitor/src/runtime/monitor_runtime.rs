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

//! Runtime helper for spawning the monitor's actor loop.

use crate::observability::events;
use std::future::Future;
use std::io;
use std::thread;
use tokio::runtime::Builder;
use tracing::{debug, error};

pub(crate) const DEFAULT_MONITOR_RUNTIME_THREAD_NAME: &str = "upstream-monitor";
const COMPONENT: &str = "monitor_runtime";

/// Handle to the dedicated thread running one actor loop.
pub(crate) struct MonitorLoopHandle {
    join_handle: thread::JoinHandle<()>,
    actor_thread: String,
}

impl MonitorLoopHandle {
    pub(crate) fn actor_thread(&self) -> &str {
        &self.actor_thread
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }
}

/// Starts `run_loop` on a named thread driving its own current-thread runtime.
///
/// The runtime is built before the thread is spawned so that both failures are
/// reported to the caller instead of killing the thread.
pub(crate) fn spawn_monitor_loop<F, Fut>(
    thread_name: String,
    run_loop: F,
) -> Result<MonitorLoopHandle, io::Error>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        actor_thread = thread_name.as_str(),
        "spawning monitor runtime thread"
    );

    let spawned = Builder::new_current_thread()
        .enable_all()
        .build()
        .and_then(|runtime| {
            thread::Builder::new()
                .name(thread_name.clone())
                .spawn(move || runtime.block_on(run_loop()))
        });

    match spawned {
        Ok(join_handle) => {
            debug!(
                event = events::RUNTIME_SPAWN_OK,
                component = COMPONENT,
                actor_thread = thread_name.as_str(),
                "monitor runtime thread started"
            );
            Ok(MonitorLoopHandle {
                join_handle,
                actor_thread: thread_name,
            })
        }
        Err(err) => {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                actor_thread = thread_name.as_str(),
                err = %err,
                "unable to start monitor runtime thread"
            );
            Err(err)
        }
    }
}
