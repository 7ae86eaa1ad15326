use std::sync::Arc;

use relevon::TopicRelevanceScorer;

/// Shared handler state, cloned per request.
#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<TopicRelevanceScorer>,
}

impl HandlerState {
    pub fn new(scorer: Arc<TopicRelevanceScorer>) -> Self {
        Self { scorer }
    }
}
