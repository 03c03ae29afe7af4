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

use std::fmt::{Display, Formatter};

/// One normalized datasource access observed in a completed query execution.
///
/// `version` carries the literal `"unknown"` when the engine cannot resolve
/// one; it is never empty and never omitted.
///
/// # Examples
///
/// ```
/// use runbeam_autolog::DatasourceEvent;
///
/// let event = DatasourceEvent::new("file:/data/orders.csv", "unknown", "csv");
/// assert_eq!(event.format, "csv");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DatasourceEvent {
    pub path: String,
    pub version: String,
    pub format: String,
}

impl DatasourceEvent {
    pub fn new(path: &str, version: &str, format: &str) -> Self {
        Self {
            path: path.to_string(),
            version: version.to_string(),
            format: format.to_string(),
        }
    }
}

impl Display for DatasourceEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (version {}, format {})", self.path, self.version, self.format)
    }
}
