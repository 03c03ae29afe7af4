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

//! Execution and plan fixtures plus scripted extractors.

use runbeam_autolog::{
    DatasourceEvent, DatasourceExtractor, ExtractionError, PlanNode, QueryExecution,
};

/// The query shapes the fan-out contract is checked against: every shape
/// reading one datasource must produce exactly one event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanShape {
    BaseLoad,
    Filter,
    Projection,
    Limit,
    FilterProjectionLimit,
}

impl PlanShape {
    pub const ALL: [PlanShape; 5] = [
        PlanShape::BaseLoad,
        PlanShape::Filter,
        PlanShape::Projection,
        PlanShape::Limit,
        PlanShape::FilterProjectionLimit,
    ];

    /// Wraps one datasource scan in this shape's operator chain.
    pub fn plan_over(&self, path: &str, format: &str) -> PlanNode {
        let scan = PlanNode::scan(path, format);
        match self {
            PlanShape::BaseLoad => scan,
            PlanShape::Filter => PlanNode::operator("Filter", vec![scan]),
            PlanShape::Projection => PlanNode::operator("Project", vec![scan]),
            PlanShape::Limit => PlanNode::operator("Limit", vec![scan]),
            PlanShape::FilterProjectionLimit => PlanNode::operator(
                "Limit",
                vec![PlanNode::operator(
                    "Project",
                    vec![PlanNode::operator("Filter", vec![scan])],
                )],
            ),
        }
    }
}

/// Execution reading a single datasource through the given shape.
pub fn shaped_execution(
    execution_id: u64,
    shape: PlanShape,
    path: &str,
    format: &str,
) -> QueryExecution {
    QueryExecution::new(execution_id, shape.plan_over(path, format))
}

/// Execution reading a single bare datasource scan.
pub fn single_scan_execution(execution_id: u64, path: &str, format: &str) -> QueryExecution {
    shaped_execution(execution_id, PlanShape::BaseLoad, path, format)
}

/// Execution joining two datasources and collecting the result.
pub fn join_execution(
    execution_id: u64,
    left_path: &str,
    left_format: &str,
    right_path: &str,
    right_format: &str,
) -> QueryExecution {
    QueryExecution::new(
        execution_id,
        PlanNode::operator(
            "Join",
            vec![
                PlanNode::scan(left_path, left_format),
                PlanNode::scan(right_path, right_format),
            ],
        ),
    )
}

/// Extractor that always errors; executions must survive it untouched.
pub struct FailingExtractor;

impl DatasourceExtractor for FailingExtractor {
    fn extract(
        &self,
        _execution: &QueryExecution,
    ) -> Result<Vec<DatasourceEvent>, ExtractionError> {
        Err(ExtractionError::new("scripted extraction failure"))
    }
}

/// Extractor that always panics; the listener must contain it.
pub struct PanickingExtractor;

impl DatasourceExtractor for PanickingExtractor {
    fn extract(
        &self,
        _execution: &QueryExecution,
    ) -> Result<Vec<DatasourceEvent>, ExtractionError> {
        panic!("scripted extraction panic");
    }
}
