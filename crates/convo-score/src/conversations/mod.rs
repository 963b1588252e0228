//! Storage, service and batch seams around the scoring engine.
//!
//! Persistence is abstracted behind [`ConversationRepository`] and
//! [`AnalysisRepository`]; deployments supply their own implementations.

pub mod analytics;
pub mod batch;
pub mod domain;
pub mod repository;
pub mod service;

pub use analytics::FleetAnalytics;
pub use batch::{BatchReport, BatchRunner};
pub use domain::{Conversation, ConversationId, MessageInput, NewConversation};
pub use repository::{
    AnalysisFilter, AnalysisRecord, AnalysisRepository, ConversationRepository,
    RepositoryError, UpsertOutcome,
};
pub use service::{AnalysisOutcome, ConversationAnalysisService, ConversationServiceError};
