use tj_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("{0} is not an agent of this match")]
    UnknownAgent(AgentId),

    #[error("{agent} released the ball without possessing it")]
    NotPossessor { agent: AgentId },
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
