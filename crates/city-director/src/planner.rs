//! Planner abstraction.
//!
//! Transport (HTTP, local inference) lives outside the engine.  A host wires
//! its client in by implementing [`Planner`]; the runner only ever sees the
//! raw reply text.

use std::collections::VecDeque;

use crate::{DirectorError, DirectorRequest, DirectorResult};

/// Produces a raw reply for one request.
pub trait Planner {
    fn complete(&mut self, request: &DirectorRequest) -> DirectorResult<String>;
}

/// Replays canned replies in order.  Once exhausted it reports
/// [`DirectorError::Unavailable`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedPlanner {
    replies:  VecDeque<String>,
    /// Number of requests received so far.
    pub calls: usize,
}

impl ScriptedPlanner {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            calls:   0,
        }
    }

    pub fn push(&mut self, reply: impl Into<String>) {
        self.replies.push_back(reply.into());
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Planner for ScriptedPlanner {
    fn complete(&mut self, _request: &DirectorRequest) -> DirectorResult<String> {
        self.calls += 1;
        self.replies
            .pop_front()
            .ok_or_else(|| DirectorError::Unavailable("script exhausted".into()))
    }
}
