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

/// Minimal logical-plan tree exposed by the engine seam.
///
/// Real engines carry far richer plans; this crate only needs enough shape to
/// locate leaf datasource reads. Interior operators keep their engine-reported
/// name purely for diagnostics.
///
/// # Examples
///
/// ```
/// use runbeam_autolog::PlanNode;
///
/// let plan = PlanNode::operator(
///     "Filter",
///     vec![PlanNode::scan("file:/data/orders.parquet", "parquet")],
/// );
/// assert_eq!(plan.leaf_count(), 1);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlanNode {
    DatasourceScan {
        path: String,
        version: Option<String>,
        format: String,
    },
    Operator {
        name: String,
        children: Vec<PlanNode>,
    },
}

impl PlanNode {
    /// Builds a leaf datasource read without version information.
    pub fn scan(path: &str, format: &str) -> Self {
        Self::DatasourceScan {
            path: path.to_string(),
            version: None,
            format: format.to_string(),
        }
    }

    /// Builds a leaf datasource read with a resolved version.
    pub fn versioned_scan(path: &str, format: &str, version: &str) -> Self {
        Self::DatasourceScan {
            path: path.to_string(),
            version: Some(version.to_string()),
            format: format.to_string(),
        }
    }

    /// Builds an interior operator node over child plans.
    pub fn operator(name: &str, children: Vec<PlanNode>) -> Self {
        Self::Operator {
            name: name.to_string(),
            children,
        }
    }

    /// Counts leaf datasource reads in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::DatasourceScan { .. } => 1,
            Self::Operator { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }
}
