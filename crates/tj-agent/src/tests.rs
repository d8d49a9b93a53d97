//! Unit tests for tj-agent.

#[cfg(test)]
mod store {
    use tj_core::{AgentId, Role, RoleAttributes, Team, Vec2};

    use crate::{AgentSpec, AgentStoreBuilder};

    fn one_runner() -> crate::AgentStore {
        let (store, _) = AgentStoreBuilder::new(0)
            .agent(AgentSpec::new(Team::Home, Role::Runner, Vec2::new(1.0, 1.0)))
            .build();
        store
    }

    #[test]
    fn full_stamina_gives_full_speed_and_strength() {
        let store = one_runner();
        let a = AgentId(0);
        assert_eq!(store.stamina_fraction(a), 1.0);
        assert_eq!(store.effective_speed(a), 8.0);
        assert_eq!(store.effective_strength(a), 4.0);
    }

    #[test]
    fn exhaustion_halves_strength_and_stops_running() {
        let mut store = one_runner();
        store.stamina[0] = 0.0;
        let a = AgentId(0);
        assert_eq!(store.effective_speed(a), 0.0);
        assert_eq!(store.effective_strength(a), 2.0);
    }

    #[test]
    fn half_stamina() {
        let mut store = one_runner();
        store.stamina[0] = store.max_stamina[0] * 0.5;
        assert!((store.effective_speed(AgentId(0)) - 4.0).abs() < 1e-6);
        assert!((store.effective_strength(AgentId(0)) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_max_stamina_is_exhausted() {
        let attrs = RoleAttributes { stamina: 0.0, ..RoleAttributes::preset(Role::Runner) };
        let (store, _) = AgentStoreBuilder::new(0)
            .agent(AgentSpec::new(Team::Home, Role::Runner, Vec2::ZERO).with_attributes(attrs))
            .build();
        assert_eq!(store.effective_speed(AgentId(0)), 0.0);
    }

    #[test]
    fn team_ids_filters() {
        let (store, _) = AgentStoreBuilder::new(0)
            .agent(AgentSpec::new(Team::Away, Role::Runner, Vec2::ZERO))
            .agent(AgentSpec::new(Team::Home, Role::Runner, Vec2::ZERO))
            .agent(AgentSpec::new(Team::Away, Role::Supporter, Vec2::ZERO))
            .build();
        let away: Vec<_> = store.team_ids(Team::Away).collect();
        assert_eq!(away, vec![AgentId(0), AgentId(2)]);
        assert_eq!(store.agent_ids().count(), 3);
    }
}

#[cfg(test)]
mod builder {
    use tj_core::{AgentId, MatchConfig, PlayerState, Role, Team, Vec2};

    use crate::{AgentSpec, AgentStoreBuilder};

    fn kickoff(config: &MatchConfig) -> (crate::AgentStore, crate::AgentRngs) {
        let field = config.field.build().unwrap();
        AgentStoreBuilder::kickoff(config, &field).unwrap().build()
    }

    #[test]
    fn explicit_agents_start_at_rest() {
        let (store, rngs) = AgentStoreBuilder::new(1)
            .agent(
                AgentSpec::new(Team::Home, Role::HeavyHitter, Vec2::new(5.0, 6.0))
                    .with_state(PlayerState::Defending)
                    .with_home(Vec2::new(1.0, 2.0)),
            )
            .build();
        assert_eq!(store.count, 1);
        assert_eq!(rngs.len(), 1);
        assert_eq!(store.position[0], Vec2::new(5.0, 6.0));
        assert_eq!(store.home[0], Vec2::new(1.0, 2.0));
        assert_eq!(store.velocity[0], Vec2::ZERO);
        assert_eq!(store.state[0], PlayerState::Defending);
        assert_eq!(store.stamina[0], store.max_stamina[0]);
        assert_eq!(store.distance[0], 0.0);
    }

    #[test]
    fn kickoff_team_sizes_and_ids() {
        let config = MatchConfig::default();
        let (store, rngs) = kickoff(&config);
        assert_eq!(store.count, 14);
        assert_eq!(rngs.len(), 14);
        for i in 0..7 {
            assert_eq!(store.team[i], Team::Home);
            assert_eq!(store.team[i + 7], Team::Away);
        }
    }

    #[test]
    fn kickoff_roles_and_initial_states() {
        let (store, _) = kickoff(&MatchConfig::default());
        assert_eq!(store.role[0], Role::FrontFighter);
        assert_eq!(store.role[5], Role::Runner);
        assert_eq!(store.role[6], Role::Supporter);
        assert_eq!(store.state[0], PlayerState::Defending);
        assert_eq!(store.state[5], PlayerState::Attacking);
        assert_eq!(store.state[6], PlayerState::Positioning);
    }

    #[test]
    fn kickoff_layout() {
        let (store, _) = kickoff(&MatchConfig::default());
        // Home slot 0: x = 25, y = 70 / 8.
        assert_eq!(store.position[0], Vec2::new(25.0, 70.0 / 8.0));
        // Away slot 6.
        assert_eq!(store.position[13], Vec2::new(75.0, 7.0 * 70.0 / 8.0));
        // Runners take the kickoff either side of the centre spot.
        assert_eq!(store.position[5], Vec2::new(48.0, 35.0));
        assert_eq!(store.position[12], Vec2::new(52.0, 35.0));
    }

    #[test]
    fn kickoff_home_points_face_own_goal() {
        let (store, _) = kickoff(&MatchConfig::default());
        // Supporter home depth 0.25 of a 100-wide field.
        assert!((store.home[6].x - 25.0).abs() < 1e-4);
        assert!((store.home[13].x - 75.0).abs() < 1e-4);
        assert_eq!(store.home[6].y, 7.0 * 70.0 / 8.0);
    }

    #[test]
    fn kickoff_without_runner_uses_first_slot() {
        let mut config = MatchConfig::default();
        config.teams.role_assignment = vec![Role::HeavyHitter, Role::Supporter];
        config.teams.agents_per_team = 3;
        let (store, _) = kickoff(&config);
        assert_eq!(store.position[0], Vec2::new(48.0, 35.0));
        assert_eq!(store.position[3], Vec2::new(52.0, 35.0));
    }

    #[test]
    fn kickoff_is_deterministic() {
        let config = MatchConfig::default();
        assert_eq!(kickoff(&config), kickoff(&config));
    }

    #[test]
    fn kickoff_seed_changes_attributes() {
        let mut other = MatchConfig::default();
        other.seed = 7;
        let (a, _) = kickoff(&MatchConfig::default());
        let (b, _) = kickoff(&other);
        assert_ne!(a.speed, b.speed);
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn variation_stays_in_range() {
        let mut config = MatchConfig::default();
        config.teams.attribute_variation = 4.0;
        config.teams.stamina_variation = 400.0;
        let (store, _) = kickoff(&config);
        for i in 0..store.count {
            assert!((0.0..=10.0).contains(&store.strength[i]));
            assert!((0.0..=10.0).contains(&store.awareness[i]));
            assert!((0.0..=10.0).contains(&store.kicking[i]));
            assert!(store.speed[i] >= 0.0);
            assert!(store.max_stamina[i] >= 1.0);
        }
    }

    #[test]
    fn zero_variation_uses_presets() {
        let mut config = MatchConfig::default();
        config.teams.attribute_variation = 0.0;
        config.teams.stamina_variation = 0.0;
        let (store, _) = kickoff(&config);
        assert_eq!(store.speed[5], 8.0);
        assert_eq!(store.max_stamina[5], 85.0);
        assert_eq!(store.strength[AgentId(12).index()], 4.0);
    }

    #[test]
    fn kickoff_rejects_missing_role_row() {
        let mut config = MatchConfig::default();
        config.teams.role_attributes.remove(&Role::FrontFighter);
        let field = config.field.build().unwrap();
        assert!(AgentStoreBuilder::kickoff(&config, &field).is_err());
    }
}
