//! Catch game controller
//!
//! Owns one round at a time and drives it from a single per-frame entry point.
//! The host calls `advance` with the elapsed time; the controller runs fixed
//! simulation steps and reports to its ports. When `needs_frame` turns false the
//! host stops scheduling frames, which cancels every sub-timer at once.

use crate::consts::*;
use crate::outcome::GameResult;
use crate::platform::{PlayArea, ResultSink};
use crate::renderer::{Frame, RenderSink};
use crate::sim::{self, GameConfig, GameEvent, GameState, Outcome};

pub struct CatchGame<A: PlayArea, R: RenderSink, S: ResultSink> {
    config: GameConfig,
    state: GameState,
    area: A,
    renderer: R,
    results: S,
    accumulator: f32,
    rounds: u64,
    seed: u64,
}

impl<A: PlayArea, R: RenderSink, S: ResultSink> CatchGame<A, R, S> {
    pub fn new(config: GameConfig, area: A, renderer: R, results: S, seed: u64) -> Self {
        let state = GameState::idle(config.clone(), area.size());
        Self {
            config,
            state,
            area,
            renderer,
            results,
            accumulator: 0.0,
            rounds: 0,
            seed,
        }
    }

    /// Start a fresh round, discarding whatever came before
    pub fn start(&mut self) {
        // Each round gets its own stream so replays differ
        let seed = self.seed.wrapping_add(self.rounds);
        self.rounds += 1;

        self.state = sim::start(self.config.clone(), self.area.size(), seed);
        self.accumulator = 0.0;
        self.results.score_changed(self.state.score);
        self.results.time_changed(self.state.time_left);
        self.renderer.draw(&Frame::from_state(&self.state));
    }

    /// Advance by the host's frame delta (seconds)
    pub fn advance(&mut self, dt: f32) {
        if self.state.ended {
            return;
        }
        let was_running = self.state.is_running();

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::tick(&mut self.state, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if was_running {
            self.renderer.draw(&Frame::from_state(&self.state));
        }
        self.dispatch_events();
    }

    /// Pointer position relative to the play area's left edge
    pub fn pointer_moved(&mut self, x: f32) {
        sim::set_player_x(&mut self.state, x);
    }

    /// Re-read the play-area geometry
    pub fn resize(&mut self) {
        sim::resize(&mut self.state, self.area.size());
    }

    /// Force the round to end now (no-op if it already has)
    pub fn end(&mut self, outcome: Outcome) {
        if sim::finish(&mut self.state, outcome) {
            self.dispatch_events();
        }
    }

    /// Whether the host should keep scheduling frames
    pub fn needs_frame(&self) -> bool {
        !self.state.ended && self.state.phase != sim::GamePhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn area(&self) -> &A {
        &self.area
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn results(&self) -> &S {
        &self.results
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Caught { score } => self.results.score_changed(score),
                GameEvent::TimeChanged { time_left } => self.results.time_changed(time_left),
                GameEvent::Finished(outcome) => {
                    let result = GameResult::new(outcome, self.state.score);
                    self.results.finished(&result);
                }
                GameEvent::Spawned | GameEvent::Missed | GameEvent::TargetReached => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedArea;
    use crate::renderer::NullRenderer;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        results: Vec<GameResult>,
        times: Vec<u32>,
    }

    impl ResultSink for Recorder {
        fn finished(&mut self, result: &GameResult) {
            self.results.push(result.clone());
        }

        fn time_changed(&mut self, time_left: u32) {
            self.times.push(time_left);
        }
    }

    fn game() -> CatchGame<FixedArea, NullRenderer, Recorder> {
        CatchGame::new(
            GameConfig::default(),
            FixedArea(Vec2::new(400.0, 600.0)),
            NullRenderer,
            Recorder::default(),
            42,
        )
    }

    #[test]
    fn test_idle_until_started() {
        let mut g = game();
        assert!(!g.is_running());
        assert!(!g.needs_frame());
        g.advance(0.5);
        assert_eq!(g.state().time_ticks, 0);

        g.start();
        assert!(g.is_running());
        assert!(g.needs_frame());
        assert_eq!(g.results().times, vec![GAME_DURATION_SECS]);
    }

    #[test]
    fn test_large_frame_delta_is_clamped() {
        let mut g = game();
        g.start();
        g.advance(5.0);
        // 0.1s at most, and never more than MAX_SUBSTEPS
        assert!(g.state().time_ticks <= MAX_SUBSTEPS as u64);
        assert!(g.state().time_ticks >= 5);
    }

    #[test]
    fn test_end_reports_once() {
        let mut g = game();
        g.start();
        g.end(Outcome::TimedOut);
        g.end(Outcome::TimedOut);
        g.advance(SIM_DT);
        assert_eq!(g.results().results.len(), 1);
        assert!(!g.needs_frame());
    }
}
