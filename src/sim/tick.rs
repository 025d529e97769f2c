//! Fixed timestep simulation tick
//!
//! Order per tick: pause toggle, game-over countdown, player input and
//! gravity, drifter motion, collisions, flashing countdown.

use glam::Vec2;

use super::blink::BlinkStep;
use super::collision::player_hits_black_hole;
use super::physics::{bounce_in_bounds, gravity_pull, wrap_position};
use super::state::{GameEvent, GamePhase, GameState, black_hole_ranges, jellyfish_ranges};
use crate::canvas_size;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Velocity from an active touch drag; overrides the arrow keys
    pub touch: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Player velocity requested by this input
    pub fn velocity(&self, speed: f32) -> Vec2 {
        if let Some(touch) = self.touch {
            return touch;
        }
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)) * speed
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle (ignored while the game-over banner runs)
    if input.pause && !state.game_over() {
        state.paused = !state.paused;
        if state.paused {
            log::info!("Paused");
            state.events.push(GameEvent::Paused);
        } else {
            log::info!("Resumed");
            state.events.push(GameEvent::Resumed);
        }
    }

    if state.paused {
        return;
    }

    state.time_ticks += 1;

    // Game over freezes the field until the banner has blinked out
    if let GamePhase::GameOver(ref mut blink) = state.phase {
        if matches!(blink.advance(), BlinkStep::Finished | BlinkStep::Idle) {
            log::info!("Game over display finished, restarting run");
            state.reset_run();
            state.events.push(GameEvent::Reset);
        }
        return;
    }

    update_player(state, input);
    update_black_hole(state);
    update_jellyfish(state);

    if state.phase == GamePhase::Playing {
        check_black_hole(state);
    }
    check_jellyfish(state);

    if let GamePhase::Flashing(ref mut blink) = state.phase {
        if matches!(blink.advance(), BlinkStep::Finished | BlinkStep::Idle) {
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Vulnerable);
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vel = input.velocity(tuning.player_speed);
    player.vel += gravity_pull(
        player.center(),
        state.black_hole.center,
        tuning.gravity_reach(),
        tuning.gravity_strength,
        tuning.gravity_min_distance,
    );
    player.pos = wrap_position(player.pos + player.vel, canvas_size());
}

fn update_black_hole(state: &mut GameState) {
    let ranges = black_hole_ranges(&state.tuning);
    let hole = &mut state.black_hole;

    let moved = hole.center + hole.drift.step(&mut state.rng, &ranges);
    let (min, max) = hole.center_bounds();
    (hole.center, hole.drift.vel) = bounce_in_bounds(moved, hole.drift.vel, min, max);
}

fn update_jellyfish(state: &mut GameState) {
    let ranges = jellyfish_ranges(&state.tuning);

    for jelly in state.jellyfish.iter_mut() {
        let moved = jelly.pos + jelly.drift.step(&mut state.rng, &ranges);
        let (min, max) = jelly.pos_bounds();
        (jelly.pos, jelly.drift.vel) = bounce_in_bounds(moved, jelly.drift.vel, min, max);
    }
}

fn check_black_hole(state: &mut GameState) {
    let hit = player_hits_black_hole(
        &state.player.bounds(),
        state.black_hole.center,
        state.black_hole.radius,
    );
    if !hit {
        return;
    }

    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    player.score = player.score.saturating_sub(state.tuning.hit_penalty);

    if player.lives > 0 {
        log::info!("Pulled into the black hole, {} lives left", player.lives);
        let lives = player.lives;
        player.respawn();
        state.start_flashing();
        state.events.push(GameEvent::Hit { lives });
    } else {
        let score = player.score;
        log::info!("Game over with score {}", score);
        player.vel = Vec2::ZERO;
        state.start_game_over();
        state.events.push(GameEvent::GameOver { score });
    }
}

fn check_jellyfish(state: &mut GameState) {
    let player_box = state.player.bounds();
    let caught: Vec<usize> = state
        .jellyfish
        .iter()
        .enumerate()
        .filter(|(_, jelly)| player_box.overlaps(&jelly.bounds()))
        .map(|(i, _)| i)
        .collect();

    for index in caught {
        let player = &mut state.player;
        player.score = player.score.saturating_add(state.tuning.jellyfish_reward);
        let score = player.score;
        log::debug!("Caught jellyfish {}, score {}", index, score);
        state.respawn_jellyfish(index);
        state.events.push(GameEvent::JellyfishCaught { index, score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Player;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// State with a still black hole parked in a corner and no wobble
    fn calm_state(seed: u64) -> GameState {
        let tuning = Tuning {
            black_hole_speed: (0.0, 0.0),
            jellyfish_speed: (0.0, 0.0),
            wobble_amplitude: (0.0, 0.0),
            ..Tuning::default()
        };
        let mut state = GameState::new(seed, tuning);
        state.black_hole.center = Vec2::new(60.0, 60.0);
        for (i, jelly) in state.jellyfish.iter_mut().enumerate() {
            jelly.pos = Vec2::new(800.0 + i as f32 * 50.0, 10.0);
        }
        state
    }

    fn park_player_on_hole(state: &mut GameState) {
        let half = state.player.size / 2.0;
        state.player.pos = state.black_hole.center - Vec2::splat(half);
    }

    #[test]
    fn test_keys_set_velocity_directly() {
        let mut state = calm_state(1);
        let start = state.player.pos;
        let input = TickInput {
            right: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.vel, Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));
        assert_eq!(state.player.pos, start + Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));

        // Releasing stops instantly
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.velocity(10.0), Vec2::ZERO);
    }

    #[test]
    fn test_touch_overrides_keys() {
        let input = TickInput {
            left: true,
            touch: Some(Vec2::new(3.0, 4.0)),
            ..Default::default()
        };
        assert_eq!(input.velocity(10.0), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_player_wraps_around_edges() {
        let mut state = calm_state(2);
        state.player.pos = Vec2::new(995.0, 300.0);
        tick(
            &mut state,
            &TickInput {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.x, 5.0);

        state.player.pos = Vec2::new(500.0, 4.0);
        tick(
            &mut state,
            &TickInput {
                up: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.y, CANVAS_HEIGHT - 6.0);
    }

    #[test]
    fn test_gravity_drags_idle_player() {
        let mut state = calm_state(3);
        // Player center 150 px right of the hole, inside its 200 px reach
        let half = state.player.size / 2.0;
        state.player.pos = state.black_hole.center + Vec2::new(150.0, 0.0) - Vec2::splat(half);
        let before = state.player.center();
        tick(&mut state, &TickInput::default());
        let after = state.player.center();
        assert!(after.x < before.x);
        assert!((before.x - after.x - GRAVITY_STRENGTH * 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_hit_costs_life_and_penalty_then_flashes() {
        let mut state = calm_state(4);
        state.player.score = 12;
        park_player_on_hole(&mut state);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.lives, STARTING_LIVES - 1);
        assert_eq!(state.player.score, 12 - HIT_PENALTY);
        assert_eq!(state.player.pos, Player::start_position(PLAYER_SIZE));
        assert!(state.flashing());
        assert!(state.drain_events().contains(&GameEvent::Hit { lives: STARTING_LIVES - 1 }));
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut state = calm_state(5);
        state.player.score = 2;
        park_player_on_hole(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_flashing_is_invincible_then_ends() {
        let mut state = calm_state(6);
        state.start_flashing();
        let flash_ticks = FLASH_INTERVAL_TICKS * FLASH_TOGGLES;

        for _ in 0..flash_ticks - 1 {
            park_player_on_hole(&mut state);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.lives, STARTING_LIVES);
            assert!(state.flashing());
        }

        state.player.pos = Player::start_position(PLAYER_SIZE);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        let vulnerable = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Vulnerable)
            .count();
        assert_eq!(vulnerable, 1);
    }

    #[test]
    fn test_tuned_flash_always_returns_to_playing() {
        for toggles in [0u32, 1, 3] {
            let json = format!(
                r#"{{ "flash_toggles": {}, "black_hole_speed": [0.0, 0.0],
                     "wobble_amplitude": [0.0, 0.0] }}"#,
                toggles
            );
            let tuning = Tuning::from_json(&json).unwrap();
            let mut state = GameState::new(11, tuning);
            state.black_hole.center = Vec2::new(60.0, 60.0);

            park_player_on_hole(&mut state);
            tick(&mut state, &TickInput::default());
            assert!(state.flashing());
            assert_eq!(state.player.lives, STARTING_LIVES - 1);

            let limit = FLASH_INTERVAL_TICKS * toggles.max(1);
            for _ in 0..limit {
                if !state.flashing() {
                    break;
                }
                state.player.pos = Player::start_position(PLAYER_SIZE);
                tick(&mut state, &TickInput::default());
            }
            assert_eq!(state.phase, GamePhase::Playing, "toggles = {}", toggles);
        }
    }

    #[test]
    fn test_last_life_game_over_then_reset() {
        let mut state = calm_state(7);
        state.player.lives = 1;
        state.player.score = 30;
        park_player_on_hole(&mut state);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.lives, 0);
        assert!(state.game_over());
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 25 }));

        // Field is frozen while the banner runs
        let frozen_hole = state.black_hole.center;
        let display_ticks = GAME_OVER_INTERVAL_TICKS * GAME_OVER_TOGGLES;
        for _ in 0..display_ticks - 1 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    ..Default::default()
                },
            );
            assert!(state.game_over());
            assert_eq!(state.player.lives, 0);
        }
        assert_eq!(state.black_hole.center, frozen_hole);

        tick(&mut state, &TickInput::default());
        assert!(!state.game_over());
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert_eq!(state.player.score, 0);
        assert!(state.drain_events().contains(&GameEvent::Reset));
    }

    #[test]
    fn test_pause_ignored_during_game_over() {
        let mut state = calm_state(8);
        state.start_game_over();
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert!(!state.paused);
    }

    #[test]
    fn test_jellyfish_collected_once_and_relocated() {
        let mut state = calm_state(9);
        let target = state.player.pos;
        state.jellyfish[0].pos = target;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.score, JELLYFISH_REWARD);
        let jelly = &state.jellyfish[0];
        let (min, max) = jelly.pos_bounds();
        assert!(jelly.pos.cmpge(min).all() && jelly.pos.cmple(max).all());
        let caught = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::JellyfishCaught { .. }))
            .count();
        assert_eq!(caught, 1);
    }

    #[test]
    fn test_jellyfish_collected_while_flashing() {
        let mut state = calm_state(10);
        state.start_flashing();
        state.jellyfish[1].pos = state.player.pos + Vec2::splat(10.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.score, JELLYFISH_REWARD);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345, Tuning::default());
        let toggle = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &toggle);
        assert!(state.paused);

        let hole = state.black_hole.center;
        let jellies: Vec<Vec2> = state.jellyfish.iter().map(|j| j.pos).collect();
        let ticks = state.time_ticks;
        for _ in 0..30 {
            tick(
                &mut state,
                &TickInput {
                    down: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.black_hole.center, hole);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.jellyfish.iter().map(|j| j.pos).collect::<Vec<_>>(), jellies);

        // Unpause
        tick(&mut state, &toggle);
        assert!(!state.paused);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_drifters_stay_on_canvas() {
        let mut state = GameState::new(77, Tuning::default());
        for _ in 0..5000 {
            tick(&mut state, &TickInput::default());
            let hole = &state.black_hole;
            let (min, max) = hole.center_bounds();
            assert!(hole.center.cmpge(min).all() && hole.center.cmple(max).all());
            for jelly in &state.jellyfish {
                let (min, max) = jelly.pos_bounds();
                assert!(jelly.pos.cmpge(min).all() && jelly.pos.cmple(max).all());
            }
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                touch: Some(Vec2::new(-4.0, 2.0)),
                ..Default::default()
            },
            TickInput {
                up: true,
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for input in inputs.iter().cycle().take(400) {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.score, state2.player.score);
        assert_eq!(state1.black_hole.center, state2.black_hole.center);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 5]>(), proptest::option::of((-10.0f32..10.0, -10.0f32..10.0))).prop_map(
            |(keys, touch)| TickInput {
                up: keys[0],
                down: keys[1],
                left: keys[2],
                right: keys[3],
                pause: keys[4],
                touch: touch.map(|(x, y)| Vec2::new(x, y)),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_invariants_hold_every_tick(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            for input in &inputs {
                tick(&mut state, input);
                let p = &state.player;
                prop_assert!(p.lives <= STARTING_LIVES);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x < CANVAS_WIDTH);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y < CANVAS_HEIGHT);
                prop_assert!(p.pos.is_finite() && p.vel.is_finite());
                if state.game_over() {
                    prop_assert_eq!(p.lives, 0);
                }
            }
        }
    }
}
