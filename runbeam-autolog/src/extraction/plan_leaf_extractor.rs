//! Default extraction policy: depth-first walk over leaf datasource scans.

use crate::engine::QueryExecution;
use crate::event::DatasourceEvent;
use crate::extraction::datasource_extractor::{DatasourceExtractor, ExtractionError};
use crate::observability::fields;
use crate::plan::PlanNode;

/// Walks the execution plan and emits one event per leaf datasource scan, in
/// plan order. Repeated reads of the same datasource each keep their own
/// event; a missing version becomes the literal `"unknown"`.
#[derive(Clone, Debug, Default)]
pub struct PlanLeafExtractor;

impl PlanLeafExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DatasourceExtractor for PlanLeafExtractor {
    fn extract(
        &self,
        execution: &QueryExecution,
    ) -> Result<Vec<DatasourceEvent>, ExtractionError> {
        let mut events = Vec::new();
        collect_scan_leaves(&execution.plan, &mut events);
        Ok(events)
    }
}

fn collect_scan_leaves(node: &PlanNode, events: &mut Vec<DatasourceEvent>) {
    match node {
        PlanNode::DatasourceScan {
            path,
            version,
            format,
        } => {
            events.push(DatasourceEvent::new(
                path,
                &fields::format_version(version.as_deref()),
                format,
            ));
        }
        PlanNode::Operator { children, .. } => {
            for child in children {
                collect_scan_leaves(child, events);
            }
        }
    }
}
