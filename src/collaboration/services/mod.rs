//! Application services for collaboration list orchestration.

mod lifecycle;

pub use lifecycle::{
    BoardView, CollaborationError, CollaborationOverview, CollaborationResult,
    CollaborationService, CreateListRequest, ListView, TaskDraft,
};
