/********************************************************************************
 * Copyright (c) 2025 Contributors to the Runbeam project
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
use std::time::Duration;

/// Tunables for the autolog publisher.
///
/// Loadable from a JSON5 file; omitted fields fall back to defaults, unknown
/// fields are rejected.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct AutologConfig {
    /// Seconds between liveness sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Upper bound for one subscriber `notify`/`ping` call.
    #[serde(default = "default_remote_call_timeout_ms")]
    pub remote_call_timeout_ms: u64,
}

fn default_sweep_interval_secs() -> u64 {
    1
}

fn default_remote_call_timeout_ms() -> u64 {
    5000
}

impl Default for AutologConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            remote_call_timeout_ms: default_remote_call_timeout_ms(),
        }
    }
}

impl AutologConfig {
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_contents = std::fs::read_to_string(path)?;
        Ok(json5::from_str(&config_contents)?)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn remote_call_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_call_timeout_ms)
    }
}
