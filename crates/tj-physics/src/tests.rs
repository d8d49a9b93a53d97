//! Unit tests for tj-physics.

use tj_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
use tj_core::{
    AgentId, BoundaryPolicy, Field, PhysicsConfig, Role, RoleAttributes, Team, Tick, Vec2,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn field() -> Field {
    Field::new(100.0, 70.0).unwrap()
}

fn store(specs: Vec<AgentSpec>) -> AgentStore {
    specs
        .into_iter()
        .fold(AgentStoreBuilder::new(0), |b, s| b.agent(s))
        .build()
        .0
}

fn with_strength(team: Team, strength: f32, x: f32, y: f32) -> AgentSpec {
    let attrs = RoleAttributes { strength, ..RoleAttributes::preset(Role::HeavyHitter) };
    AgentSpec::new(team, Role::HeavyHitter, Vec2::new(x, y)).with_attributes(attrs)
}

// ── Ball integration ──────────────────────────────────────────────────────────

#[cfg(test)]
mod ball_tests {
    use super::*;
    use crate::Ball;

    fn physics(friction: f32, boundary: BoundaryPolicy) -> PhysicsConfig {
        PhysicsConfig { friction, boundary, ..PhysicsConfig::default() }
    }

    #[test]
    fn friction_decay_matches_closed_form() {
        let f = field();
        let p = physics(0.9, BoundaryPolicy::Clamp);
        let mut ball = Ball::at_rest(Vec2::new(10.0, 35.0));
        ball.velocity = Vec2::new(3.0, 0.0);

        let mut last_x = ball.position.x;
        for k in 1..=32 {
            ball.integrate(&f, &p, 0.1);
            let expected = 3.0 * 0.9_f32.powi(k);
            assert!((ball.speed() - expected).abs() < 1e-4, "tick {k}: {}", ball.speed());
            assert!(ball.velocity.x > 0.0);
            assert!(ball.position.x > last_x);
            last_x = ball.position.x;
        }
        // 3 × 0.9^33 ≈ 0.093 is under the 0.1 snap threshold.
        ball.integrate(&f, &p, 0.1);
        assert_eq!(ball.velocity, Vec2::ZERO);

        let resting = ball.position;
        ball.integrate(&f, &p, 0.1);
        assert_eq!(ball.position, resting);
    }

    #[test]
    fn reflect_bounces_off_touchline() {
        let f = field();
        let p = physics(1.0, BoundaryPolicy::Reflect { restitution: 0.8 });
        let mut ball = Ball::at_rest(Vec2::new(50.0, 69.5));
        ball.velocity = Vec2::new(0.0, 10.0);
        ball.integrate(&f, &p, 0.1);
        assert!(f.contains(ball.position));
        assert!((ball.position.y - 69.5).abs() < 1e-4);
        assert!((ball.velocity.y + 8.0).abs() < 1e-4);
    }

    #[test]
    fn clamp_stops_at_touchline() {
        let f = field();
        let p = physics(1.0, BoundaryPolicy::Clamp);
        let mut ball = Ball::at_rest(Vec2::new(99.0, 35.0));
        ball.velocity = Vec2::new(20.0, 1.0);
        ball.integrate(&f, &p, 0.1);
        assert_eq!(ball.position.x, 100.0);
        assert_eq!(ball.velocity.x, 0.0);
        assert_eq!(ball.velocity.y, 1.0);
    }

    #[test]
    fn possessed_ball_ignores_integration_and_follows() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(99.8, 35.0))]);
        agents.velocity[0] = Vec2::new(1.0, 0.0);

        let mut ball = Ball::at_rest(Vec2::new(40.0, 35.0));
        ball.possessor = Some(AgentId(0));
        ball.velocity = Vec2::new(5.0, 0.0);
        ball.integrate(&f, &p, 0.1);
        assert_eq!(ball.position, Vec2::new(40.0, 35.0));

        ball.follow(&agents, &f, p.carry_offset).unwrap();
        // Carry offset would leave the field; the ball is clamped.
        assert_eq!(ball.position, Vec2::new(100.0, 35.0));
        assert_eq!(ball.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn follow_unknown_possessor_errors() {
        let agents = store(vec![]);
        let mut ball = Ball::at_rest(Vec2::ZERO);
        ball.possessor = Some(AgentId(3));
        assert_eq!(
            ball.follow(&agents, &field(), Vec2::ZERO),
            Err(crate::PhysicsError::UnknownAgent(AgentId(3)))
        );
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use super::*;
    use crate::apply_move;

    #[test]
    fn moves_and_drains_stamina() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0))]);
        let before = agents.stamina[0];
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(8.0, 0.0), 0.1, &f, &p);
        assert!((moved - 0.8).abs() < 1e-5);
        assert!((agents.position[0].x - 10.8).abs() < 1e-5);
        assert!((agents.stamina[0] - (before - 0.8 * 0.05)).abs() < 1e-4);
        assert!((agents.distance[0] - 0.8).abs() < 1e-5);
    }

    #[test]
    fn request_capped_at_effective_speed() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0))]);
        agents.stamina[0] = agents.max_stamina[0] * 0.5;
        apply_move(&mut agents, AgentId(0), Vec2::new(100.0, 0.0), 0.1, &f, &p);
        assert!((agents.velocity[0].x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn clamped_to_field() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(0.2, 69.9))]);
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(-8.0, 8.0), 1.0, &f, &p);
        assert_eq!(agents.position[0], Vec2::new(0.0, 70.0));
        assert!(moved < 0.3);
    }

    #[test]
    fn exhausted_agent_stays_put() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0))]);
        agents.stamina[0] = 0.0;
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(8.0, 0.0), 0.1, &f, &p);
        assert_eq!(moved, 0.0);
        assert_eq!(agents.position[0], Vec2::new(10.0, 10.0));
        assert_eq!(agents.stamina[0], 0.0);
    }

    #[test]
    fn stamina_never_negative() {
        let f = field();
        let p = PhysicsConfig { stamina_cost_per_unit: 1000.0, ..PhysicsConfig::default() };
        let mut agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0))]);
        apply_move(&mut agents, AgentId(0), Vec2::new(8.0, 0.0), 0.1, &f, &p);
        assert_eq!(agents.stamina[0], 0.0);
    }

    #[test]
    fn refuses_to_step_into_another_agent() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![
            AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0)),
            AgentSpec::new(Team::Away, Role::Runner, Vec2::new(11.5, 10.0)),
        ]);
        let stamina = agents.stamina[0];
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(8.0, 0.0), 0.1, &f, &p);
        assert_eq!(moved, 0.0);
        assert_eq!(agents.position[0], Vec2::new(10.0, 10.0));
        assert_eq!(agents.velocity[0], Vec2::ZERO);
        assert_eq!(agents.stamina[0], stamina);

        // Sidestepping past stays outside the radius.
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(0.0, 8.0), 0.1, &f, &p);
        assert!((moved - 0.8).abs() < 1e-5);
    }

    #[test]
    fn overlapping_agents_may_separate() {
        let f = field();
        let p = PhysicsConfig::default();
        let mut agents = store(vec![
            AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0)),
            AgentSpec::new(Team::Away, Role::Runner, Vec2::new(10.2, 10.0)),
        ]);
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(-1.0, 0.0), 0.1, &f, &p);
        assert!((moved - 0.1).abs() < 1e-5);
        assert!((agents.position[0].x - 9.9).abs() < 1e-5);
    }

    #[test]
    fn zero_collision_radius_disables_the_check() {
        let f = field();
        let p = PhysicsConfig { collision_radius: 0.0, ..PhysicsConfig::default() };
        let mut agents = store(vec![
            AgentSpec::new(Team::Home, Role::Runner, Vec2::new(10.0, 10.0)),
            AgentSpec::new(Team::Away, Role::Runner, Vec2::new(10.5, 10.0)),
        ]);
        let moved = apply_move(&mut agents, AgentId(0), Vec2::new(5.0, 0.0), 0.1, &f, &p);
        assert!((moved - 0.5).abs() < 1e-5);
        assert!(agents.position[0].distance(agents.position[1]) < 1e-5);
    }
}

// ── Possession ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod possession_tests {
    use super::*;
    use crate::{Ball, LossCause, PossessionArbiter, PossessionEvent};

    fn resolve(
        arb:    &mut PossessionArbiter,
        ball:   &mut Ball,
        agents: &AgentStore,
        p:      &PhysicsConfig,
    ) -> Vec<PossessionEvent> {
        arb.resolve(ball, agents, &field(), p, Tick(0)).unwrap()
    }

    #[test]
    fn closest_inside_radius_captures() {
        let p = PhysicsConfig::default();
        let agents = store(vec![
            AgentSpec::new(Team::Home, Role::Runner, Vec2::new(48.5, 35.0)),
            AgentSpec::new(Team::Away, Role::Runner, Vec2::new(51.0, 35.0)),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.0, 35.0));
        let mut arb = PossessionArbiter::new();
        let events = resolve(&mut arb, &mut ball, &agents, &p);
        assert_eq!(ball.possessor, Some(AgentId(1)));
        assert_eq!(events, vec![PossessionEvent::Gained { agent: AgentId(1), team: Team::Away }]);
        assert_eq!(ball.position, Vec2::new(51.5, 35.0));
    }

    #[test]
    fn exact_tie_goes_to_lowest_id() {
        let p = PhysicsConfig::default();
        let agents = store(vec![
            AgentSpec::new(Team::Away, Role::Runner, Vec2::new(51.0, 35.0)),
            AgentSpec::new(Team::Home, Role::Runner, Vec2::new(49.0, 35.0)),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.0, 35.0));
        resolve(&mut PossessionArbiter::new(), &mut ball, &agents, &p);
        assert_eq!(ball.possessor, Some(AgentId(0)));
    }

    #[test]
    fn capture_radius_is_strict() {
        let p = PhysicsConfig::default();
        let agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(48.0, 35.0))]);
        let mut ball = Ball::at_rest(Vec2::new(50.0, 35.0));
        let events = resolve(&mut PossessionArbiter::new(), &mut ball, &agents, &p);
        assert!(events.is_empty());
        assert!(ball.is_free());
    }

    #[test]
    fn release_then_cooldown_blocks_releaser() {
        let p = PhysicsConfig { recapture_cooldown_ticks: 2, ..PhysicsConfig::default() };
        let agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(50.0, 35.0))]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        let mut arb = PossessionArbiter::new();

        let ev = arb
            .release(&mut ball, &agents, AgentId(0), Vec2::new(0.0, 0.0), &p, Tick(0))
            .unwrap();
        assert_eq!(
            ev,
            PossessionEvent::Lost { agent: AgentId(0), team: Team::Home, cause: LossCause::Released }
        );
        assert_eq!(ball.last_releaser, Some(AgentId(0)));

        // Blocked for two ticks, free on the third.
        assert!(resolve(&mut arb, &mut ball, &agents, &p).is_empty());
        assert!(resolve(&mut arb, &mut ball, &agents, &p).is_empty());
        assert_eq!(resolve(&mut arb, &mut ball, &agents, &p).len(), 1);
        assert_eq!(ball.possessor, Some(AgentId(0)));
    }

    #[test]
    fn release_by_non_possessor_rejected() {
        let p = PhysicsConfig::default();
        let agents = store(vec![AgentSpec::new(Team::Home, Role::Runner, Vec2::new(50.0, 35.0))]);
        let mut ball = Ball::at_rest(Vec2::new(50.0, 35.0));
        let err = PossessionArbiter::new()
            .release(&mut ball, &agents, AgentId(0), Vec2::new(1.0, 0.0), &p, Tick(0))
            .unwrap_err();
        assert_eq!(err, crate::PhysicsError::NotPossessor { agent: AgentId(0) });
    }

    #[test]
    fn stronger_opponent_strips_after_threshold() {
        let p = PhysicsConfig { contact_threshold_ticks: 3, ..PhysicsConfig::default() };
        let agents = store(vec![
            with_strength(Team::Home, 4.0, 50.0, 35.0),
            with_strength(Team::Away, 8.0, 52.0, 35.0),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        let mut arb = PossessionArbiter::new();

        for tick in 1..=3 {
            assert!(resolve(&mut arb, &mut ball, &agents, &p).is_empty());
            assert_eq!(arb.contact_ticks(AgentId(1)), tick);
        }
        let events = resolve(&mut arb, &mut ball, &agents, &p);
        assert_eq!(
            events,
            vec![
                PossessionEvent::Lost {
                    agent: AgentId(0),
                    team:  Team::Home,
                    cause: LossCause::Stripped { by: AgentId(1) },
                },
                PossessionEvent::Gained { agent: AgentId(1), team: Team::Away },
            ]
        );
        assert_eq!(ball.possessor, Some(AgentId(1)));
        assert_eq!(arb.contact_ticks(AgentId(1)), 0);
    }

    #[test]
    fn stripped_ball_stays_loose_when_nobody_is_close() {
        let p = PhysicsConfig { contact_threshold_ticks: 0, ..PhysicsConfig::default() };
        let agents = store(vec![
            with_strength(Team::Home, 4.0, 50.0, 35.0),
            with_strength(Team::Away, 8.0, 50.0, 32.5),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        ball.velocity = Vec2::new(3.0, 0.0);
        let events = resolve(&mut PossessionArbiter::new(), &mut ball, &agents, &p);
        assert_eq!(events.len(), 1);
        assert!(ball.is_free());
        assert_eq!(ball.velocity, Vec2::ZERO);
        // The stripped holder is on cooldown even though it is closest.
        assert!(!ball.can_capture(AgentId(0)));
    }

    #[test]
    fn weaker_opponent_never_strips() {
        let p = PhysicsConfig { contact_threshold_ticks: 3, ..PhysicsConfig::default() };
        let agents = store(vec![
            with_strength(Team::Home, 8.0, 50.0, 35.0),
            with_strength(Team::Away, 4.0, 51.0, 35.0),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        let mut arb = PossessionArbiter::new();
        for _ in 0..100 {
            assert!(resolve(&mut arb, &mut ball, &agents, &p).is_empty());
        }
        assert_eq!(ball.possessor, Some(AgentId(0)));
        assert_eq!(arb.contact_ticks(AgentId(1)), 0);
    }

    #[test]
    fn broken_contact_resets_count() {
        let p = PhysicsConfig { contact_threshold_ticks: 3, ..PhysicsConfig::default() };
        let mut agents = store(vec![
            with_strength(Team::Home, 4.0, 50.0, 35.0),
            with_strength(Team::Away, 8.0, 52.0, 35.0),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        let mut arb = PossessionArbiter::new();

        resolve(&mut arb, &mut ball, &agents, &p);
        resolve(&mut arb, &mut ball, &agents, &p);
        assert_eq!(arb.contact_ticks(AgentId(1)), 2);

        agents.position[1] = Vec2::new(60.0, 35.0);
        resolve(&mut arb, &mut ball, &agents, &p);
        assert_eq!(arb.contact_ticks(AgentId(1)), 0);
    }

    #[test]
    fn teammates_do_not_contest() {
        let p = PhysicsConfig { contact_threshold_ticks: 0, ..PhysicsConfig::default() };
        let agents = store(vec![
            with_strength(Team::Home, 4.0, 50.0, 35.0),
            with_strength(Team::Home, 9.0, 51.0, 35.0),
        ]);
        let mut ball = Ball::at_rest(Vec2::new(50.5, 35.0));
        ball.possessor = Some(AgentId(0));
        assert!(resolve(&mut PossessionArbiter::new(), &mut ball, &agents, &p).is_empty());
    }
}
