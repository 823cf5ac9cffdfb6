//! Fixed timestep simulation tick
//!
//! One `tick` is 1/60 s of play. The countdown, spawner
//! and win grace are sub-timers counted in ticks, so all three stop the moment
//! the phase leaves `Running`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::state::{
    Catcher, GameConfig, GameEvent, GamePhase, GameState, HEART_GLYPHS, Heart, Outcome,
};
use crate::secs_to_ticks;

/// Begin a fresh round
pub fn start(config: GameConfig, play_area: Vec2, seed: u64) -> GameState {
    let mut state = GameState::idle(config, play_area);
    state.rng = Pcg32::seed_from_u64(seed);
    state.catcher = Catcher::centered(play_area, state.config.catcher_size);
    state.phase = GamePhase::Running;
    log::info!(
        "Round started: target {} in {}s, play area {}x{}",
        state.target_score,
        state.time_left,
        play_area.x,
        play_area.y
    );
    state
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if state.ended {
        return;
    }

    // Win grace: the simulation is frozen, only the delay runs
    if let Some(remaining) = state.win_grace_ticks {
        if remaining <= 1 {
            finish(state, Outcome::Won);
        } else {
            state.win_grace_ticks = Some(remaining - 1);
        }
        return;
    }

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    if state.time_ticks % state.spawn_ticks() as u64 == 0 {
        spawn_heart(state);
    }

    update_hearts(state, dt);

    // Catches are resolved before the countdown, so a win on the last tick of
    // the final second beats the timeout
    if state.score >= state.target_score {
        state.phase = GamePhase::Won;
        state.win_grace_ticks = Some(secs_to_ticks(state.config.win_grace_secs));
        state.events.push(GameEvent::TargetReached);
        log::info!("Target reached with {}s left", state.time_left);
        return;
    }

    if state.time_ticks % state.countdown_ticks() as u64 == 0 {
        state.time_left = state.time_left.saturating_sub(1);
        state.events.push(GameEvent::TimeChanged {
            time_left: state.time_left,
        });
        if state.time_left == 0 {
            finish(state, Outcome::TimedOut);
        }
    }
}

/// Move hearts, resolve catches and misses
fn update_hearts(state: &mut GameState, dt: f32) {
    let catcher = state.catcher.rect;
    let floor = state.play_area.y;
    let mut caught = 0u32;
    let mut missed = 0u32;

    // retain_mut visits every heart exactly once, removal included
    state.hearts.retain_mut(|heart| {
        heart.rect.pos.y += heart.fall_speed * dt;

        if heart.rect.overlaps(&catcher) {
            caught += 1;
            false
        } else if heart.rect.top() > floor {
            missed += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..caught {
        state.score += 1;
        state.events.push(GameEvent::Caught { score: state.score });
    }
    for _ in 0..missed {
        state.events.push(GameEvent::Missed);
    }
    if caught > 0 {
        log::debug!("Caught {} heart(s), score {}", caught, state.score);
    }
}

/// Drop one heart at a random column just above the play area
fn spawn_heart(state: &mut GameState) {
    let size = state.config.heart_size;
    let max_x = (state.play_area.x - size).max(0.0);
    let x = state.rng.random::<f32>() * max_x;
    let (min_speed, max_speed) = state.config.fall_speed;
    let fall_speed = if max_speed > min_speed {
        state.rng.random_range(min_speed..max_speed)
    } else {
        min_speed
    };
    let glyph = HEART_GLYPHS[state.rng.random_range(0..HEART_GLYPHS.len())];

    state.hearts.push(Heart {
        rect: Rect::new(x, -size, size, size),
        fall_speed,
        glyph,
    });
    state.events.push(GameEvent::Spawned);
    log::trace!("Spawned heart at x={:.1} speed={:.1}", x, fall_speed);
}

/// Pointer moved: centre the catcher under it. Not clamped to the play area.
pub fn set_player_x(state: &mut GameState, pointer_x: f32) {
    if !state.is_running() {
        return;
    }
    state.catcher.rect.pos.x = pointer_x - state.catcher.rect.size.x / 2.0;
}

/// Play area resized: keep the catcher at the same relative position
pub fn resize(state: &mut GameState, new_area: Vec2) {
    if !state.is_running() {
        return;
    }
    let old = state.play_area;
    let pos = &mut state.catcher.rect.pos;
    if old.x > 0.0 {
        pos.x = pos.x / old.x * new_area.x;
    }
    if old.y > 0.0 {
        pos.y = pos.y / old.y * new_area.y;
    }
    state.play_area = new_area;
    log::debug!("Play area resized to {}x{}", new_area.x, new_area.y);
}

/// End the round. Returns false if it had already ended.
pub fn finish(state: &mut GameState, outcome: Outcome) -> bool {
    if state.ended {
        return false;
    }
    state.phase = outcome.phase();
    state.win_grace_ticks = None;
    state.ended = true;
    state.events.push(GameEvent::Finished(outcome));
    log::info!("Round finished: {:?} with score {}", outcome, state.score);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn area() -> Vec2 {
        Vec2::new(400.0, 600.0)
    }

    /// Config with spawning pushed far out so tests place hearts by hand
    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_interval_secs: 1000.0,
            ..Default::default()
        }
    }

    /// A stationary heart overlapping the catcher
    fn heart_on_catcher(state: &GameState) -> Heart {
        let c = state.catcher.rect;
        Heart {
            rect: Rect::new(c.pos.x + 10.0, c.pos.y + 10.0, 40.0, 40.0),
            fall_speed: 0.0,
            glyph: HEART_GLYPHS[0],
        }
    }

    fn run_ticks(state: &mut GameState, n: u32) {
        for _ in 0..n {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_start_resets_round() {
        let state = start(GameConfig::default(), area(), 7);
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, GAME_DURATION_SECS);
        assert_eq!(state.target_score, TARGET_SCORE);
        assert!(state.hearts.is_empty());

        // Centred at the bottom
        let c = state.catcher.rect;
        assert_eq!(c.pos.x, 200.0 - 30.0);
        assert_eq!(c.pos.y, 600.0 - 60.0 - 20.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = start(GameConfig::default(), area(), 7);
        run_ticks(&mut state, 47);
        assert!(state.hearts.is_empty());
        tick(&mut state, SIM_DT);
        assert_eq!(state.hearts.len(), 1);

        let heart = &state.hearts[0];
        assert!(heart.rect.pos.x >= 0.0 && heart.rect.pos.x < 400.0 - 40.0);
        assert!(heart.fall_speed >= FALL_SPEED_MIN && heart.fall_speed < FALL_SPEED_MAX);
        assert!(HEART_GLYPHS.contains(&heart.glyph));
    }

    #[test]
    fn test_catch_scores() {
        let mut state = start(quiet_config(), area(), 1);
        let heart = heart_on_catcher(&state);
        state.hearts.push(heart);

        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 1);
        assert!(state.hearts.is_empty());
        assert!(state.events.contains(&GameEvent::Caught { score: 1 }));
    }

    #[test]
    fn test_touching_heart_does_not_score() {
        let mut state = start(quiet_config(), area(), 1);
        let c = state.catcher.rect;
        // Resting on the catcher's top edge, not moving
        state.hearts.push(Heart {
            rect: Rect::new(c.pos.x, c.pos.y - 40.0, 40.0, 40.0),
            fall_speed: 0.0,
            glyph: HEART_GLYPHS[1],
        });

        run_ticks(&mut state, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_missed_heart_removed_without_penalty() {
        let mut state = start(quiet_config(), area(), 1);
        // Far left of the catcher, just above the floor
        state.hearts.push(Heart {
            rect: Rect::new(0.0, 599.0, 40.0, 40.0),
            fall_speed: 120.0,
            glyph: HEART_GLYPHS[2],
        });

        tick(&mut state, SIM_DT);
        assert!(state.hearts.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::Missed));
    }

    #[test]
    fn test_multiple_removals_in_one_tick() {
        let mut state = start(quiet_config(), area(), 1);
        let on = heart_on_catcher(&state);
        let off = Heart {
            rect: Rect::new(0.0, 650.0, 40.0, 40.0),
            fall_speed: 0.0,
            glyph: HEART_GLYPHS[3],
        };
        let falling = Heart {
            rect: Rect::new(0.0, 0.0, 40.0, 40.0),
            fall_speed: 60.0,
            glyph: HEART_GLYPHS[4],
        };
        state.hearts = vec![on.clone(), off, on, falling];

        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 2);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.hearts[0].glyph, HEART_GLYPHS[4]);
        assert!((state.hearts[0].rect.pos.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_countdown_times_out() {
        let mut state = start(quiet_config(), area(), 1);
        run_ticks(&mut state, TICKS_PER_SECOND);
        assert_eq!(state.time_left, GAME_DURATION_SECS - 1);

        run_ticks(&mut state, TICKS_PER_SECOND * (GAME_DURATION_SECS - 1));
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, GamePhase::TimedOut);
        assert!(state.ended);
        assert!(state.events.contains(&GameEvent::Finished(Outcome::TimedOut)));
    }

    #[test]
    fn test_win_with_time_left_after_grace() {
        let config = GameConfig {
            target_score: 1,
            ..quiet_config()
        };
        let mut state = start(config, area(), 1);
        let heart = heart_on_catcher(&state);
        state.hearts.push(heart);

        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(!state.is_running());
        assert!(!state.ended);
        assert!(state.time_left > 0);

        // Held back for the grace period
        run_ticks(&mut state, 29);
        assert!(!state.ended);
        tick(&mut state, SIM_DT);
        assert!(state.ended);
        assert!(state.events.contains(&GameEvent::Finished(Outcome::Won)));
    }

    #[test]
    fn test_win_beats_timeout_on_same_tick() {
        let config = GameConfig {
            target_score: 1,
            duration_secs: 1,
            ..quiet_config()
        };
        let mut state = start(config, area(), 1);
        run_ticks(&mut state, TICKS_PER_SECOND - 1);
        assert!(state.is_running());

        let heart = heart_on_catcher(&state);
        state.hearts.push(heart);
        tick(&mut state, SIM_DT);

        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.time_left, 1);
        run_ticks(&mut state, 60);
        assert!(state.events.contains(&GameEvent::Finished(Outcome::Won)));
        assert!(!state.events.contains(&GameEvent::Finished(Outcome::TimedOut)));
    }

    #[test]
    fn test_no_mutation_after_end() {
        let mut state = start(GameConfig::default(), area(), 3);
        assert!(finish(&mut state, Outcome::TimedOut));
        assert!(!finish(&mut state, Outcome::Won));

        let score = state.score;
        let time_left = state.time_left;
        let ticks = state.time_ticks;
        state.drain_events();

        run_ticks(&mut state, 500);
        set_player_x(&mut state, 10.0);

        assert_eq!(state.score, score);
        assert_eq!(state.time_left, time_left);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.hearts.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_set_player_x_unclamped() {
        let mut state = start(GameConfig::default(), area(), 3);
        set_player_x(&mut state, 100.0);
        assert_eq!(state.catcher.rect.pos.x, 70.0);

        // Dragged past the right edge
        set_player_x(&mut state, 1000.0);
        assert_eq!(state.catcher.rect.pos.x, 970.0);
    }

    #[test]
    fn test_set_player_x_ignored_before_start() {
        let mut state = GameState::idle(GameConfig::default(), area());
        let before = state.catcher.rect.pos.x;
        set_player_x(&mut state, 5.0);
        assert_eq!(state.catcher.rect.pos.x, before);
    }

    #[test]
    fn test_resize_keeps_relative_position() {
        let mut state = start(GameConfig::default(), area(), 3);
        state.catcher.rect.pos.x = 200.0; // 50% of width
        resize(&mut state, Vec2::new(800.0, 300.0));

        assert_eq!(state.play_area, Vec2::new(800.0, 300.0));
        assert!((state.catcher.rect.pos.x / 800.0 - 0.5).abs() < 1e-6);
        assert!((state.catcher.rect.pos.y / 300.0 - 520.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut a = start(GameConfig::default(), area(), 99999);
        let mut b = start(GameConfig::default(), area(), 99999);
        run_ticks(&mut a, 300);
        run_ticks(&mut b, 300);

        assert_eq!(a.hearts, b.hearts);
        assert_eq!(a.score, b.score);
    }
}
