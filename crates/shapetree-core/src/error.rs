use crate::tree::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

/// Internal invariant violations of the builder and the fold engine.
///
/// None of these are reachable through well-formed input; seeing one means a
/// traversal-order bug, and callers should treat it as a defect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree builder drained its work-list without producing a root")]
    MissingRoot,

    #[error("child slot {index} of node {node} was never filled")]
    UnfilledChildSlot { node: NodeId, index: usize },

    #[error("fold result of child {child} is missing while combining node {parent}")]
    MissingChildResult { parent: NodeId, child: NodeId },

    #[error("fold finished without a result for node {0}")]
    MissingFoldResult(NodeId),

    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),
}
