//! The ball.

use tj_agent::AgentStore;
use tj_behavior::BallView;
use tj_core::{AgentId, Field, PhysicsConfig, Vec2};

use crate::{PhysicsError, PhysicsResult};

/// The single physically simulated ball.
///
/// `possessor` is a key into the `AgentStore`, never an owning reference.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball {
    pub position:  Vec2,
    /// Units / second.
    pub velocity:  Vec2,
    pub possessor: Option<AgentId>,

    /// The agent that last let go of the ball, by release or strip.
    pub last_releaser: Option<AgentId>,

    /// Ticks left during which `last_releaser` cannot recapture.
    pub cooldown: u32,
}

impl Ball {
    /// A loose, motionless ball at `position`.
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity:      Vec2::ZERO,
            possessor:     None,
            last_releaser: None,
            cooldown:      0,
        }
    }

    /// The externally visible part of the ball state.
    #[inline]
    pub fn view(&self) -> BallView {
        BallView {
            position:  self.position,
            velocity:  self.velocity,
            possessor: self.possessor,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.possessor.is_none()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// `false` only for the last releaser while its cooldown runs.
    #[inline]
    pub fn can_capture(&self, agent: AgentId) -> bool {
        self.cooldown == 0 || self.last_releaser != Some(agent)
    }

    /// Advance a free ball by one tick of `dt` seconds.
    ///
    /// Position integrates first, then the boundary policy applies, then
    /// friction.  A possessed ball is left alone.
    pub fn integrate(&mut self, field: &Field, physics: &PhysicsConfig, dt: f32) {
        if self.possessor.is_some() {
            return;
        }
        let proposed = self.position + self.velocity * dt;
        let (position, velocity) = physics.boundary.resolve(field, proposed, self.velocity);
        self.position = position;
        self.velocity = velocity * physics.friction;
        if self.velocity.length() < physics.stop_epsilon {
            self.velocity = Vec2::ZERO;
        }
    }

    /// Move a possessed ball to its carrier.  The ball takes the carrier's
    /// velocity so renderers see it travel.
    pub fn follow(
        &mut self,
        agents:       &AgentStore,
        field:        &Field,
        carry_offset: Vec2,
    ) -> PhysicsResult<()> {
        let Some(holder) = self.possessor else {
            return Ok(());
        };
        if holder.index() >= agents.count {
            return Err(PhysicsError::UnknownAgent(holder));
        }
        self.position = field.clamp(agents.position[holder.index()] + carry_offset);
        self.velocity = agents.velocity[holder.index()];
        Ok(())
    }
}
