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

mod config;
mod replay;

use crate::config::Config;
use crate::replay::{ScriptedObservationService, StaticPolicy, TraceStep};
use clap::Parser;
use settings_static_file::SettingsStaticFile;
use std::error::Error;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};
use upstream_monitor::{CapabilityFilter, UpstreamEvent, UpstreamMonitor};

#[derive(Parser)]
#[command()]
struct MonitorArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started upstream-monitor-configurable");

    // Get the config file.
    let args = MonitorArgs::parse();
    let contents = fs::read_to_string(&args.config)
        .map_err(|e| format!("Unable to read config file {}: {e:?}", args.config))?;
    let config: Config = json5::from_str(&contents)
        .map_err(|e| format!("Unable to parse config file: {e:?}"))?;
    let trace = config
        .replay
        .load_trace()
        .map_err(|e| format!("Unable to load trace {}: {e}", config.replay.trace_file))?;

    let service = Arc::new(ScriptedObservationService::new());
    let settings = Arc::new(SettingsStaticFile::new(&config.settings.static_file));
    let policy = Arc::new(StaticPolicy::new(config.policy.cellular_permitted));

    let (monitor, mut events) =
        UpstreamMonitor::start(&config.monitor.name, service.clone(), settings)?;

    let event_logger = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match &event {
                UpstreamEvent::LocalPrefixes(prefixes) => {
                    info!("{}: {} local prefix(es)", event.code(), prefixes.len());
                }
                other => {
                    if let Some(state) = other.network_state() {
                        info!("{}: {state}", event.code());
                    }
                }
            }
        }
    });

    monitor
        .update_mobile_requires_dun(config.selection.dun_required)
        .await?;
    monitor
        .start_track_default_network(CapabilityFilter::default_internet(), policy)
        .await?;
    monitor.start_observe_all_networks().await?;

    for step in trace {
        if let Some((kind, event)) = step.callback() {
            service.deliver(kind, event);
            continue;
        }
        let TraceStep::Select { preferred_types } = step else {
            continue;
        };
        let preferred_types =
            preferred_types.unwrap_or_else(|| config.selection.preferred_types.clone());

        let selection = monitor
            .select_preferred_upstream_type(preferred_types)
            .await?;
        info!(
            "selected upstream: {selection} (mobile requested: {})",
            monitor.mobile_network_requested().await?
        );
        monitor
            .set_current_upstream(selection.network.as_ref().map(|state| state.network))
            .await?;

        match monitor.get_current_preferred_upstream().await? {
            Some(preferred) => info!("default-network preference: {preferred}"),
            None => info!("default-network preference: none"),
        }
    }

    monitor.stop().await?;
    drop(monitor);

    if let Err(e) = event_logger.await {
        warn!("event logger ended abnormally: {e}");
    }

    Ok(())
}
