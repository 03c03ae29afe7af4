//! Extraction layer.
//!
//! Owns the policy for deriving normalized datasource events from a completed
//! query execution. The strategy seam is injectable so embedders can replace
//! the default plan walk without touching the broadcast path.
//!
//! ```
//! use runbeam_autolog::{
//!     DatasourceExtractor, PlanLeafExtractor, PlanNode, QueryExecution,
//! };
//!
//! let execution = QueryExecution::new(
//!     1,
//!     PlanNode::operator(
//!         "Join",
//!         vec![
//!             PlanNode::scan("file:/data/left.csv", "csv"),
//!             PlanNode::scan("file:/data/right.parquet", "parquet"),
//!         ],
//!     ),
//! );
//!
//! let events = PlanLeafExtractor::new()
//!     .extract(&execution)
//!     .expect("plan walk should succeed");
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[0].version, "unknown");
//! ```

pub(crate) mod datasource_extractor;
pub(crate) mod plan_leaf_extractor;
