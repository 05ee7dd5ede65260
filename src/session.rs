/// Menu → Playing → GameOver → Menu, driven one tick at a time.

use std::io;

use rand::Rng;
use tracing::info;

use crate::clock::Clock;
use crate::compute::{init_world, tick};
use crate::config::GameConfig;
use crate::entities::{GameStatus, World};
use crate::input::{FrameInput, InputSource};
use crate::render::{draw_game_over, draw_menu, draw_world, Canvas};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
    /// Terminal: the session loop has ended.
    Quit,
}

pub struct Session<R: Rng> {
    config: GameConfig,
    phase: Phase,
    world: World,
    rng: R,
    games_played: u32,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        let world = init_world(&config);
        Session {
            config,
            phase: Phase::Menu,
            world,
            rng,
            games_played: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Apply one tick of input to the current phase and return the phase
    /// the session is in afterwards.  A quit request is honoured after the
    /// tick has been applied.
    pub fn step(&mut self, input: &FrameInput, dt_ms: u64) -> Phase {
        match self.phase {
            Phase::Menu => {
                if input.any_pressed() {
                    self.world = init_world(&self.config);
                    self.games_played += 1;
                    self.phase = Phase::Playing;
                    info!(game = self.games_played, "game started");
                }
            }
            Phase::Playing => {
                self.world = tick(&self.world, input, dt_ms, &mut self.rng);
                if self.world.status == GameStatus::GameOver {
                    self.phase = Phase::GameOver;
                    info!(score = self.world.score, "game over");
                }
            }
            Phase::GameOver => {
                if input.any_pressed() {
                    self.phase = Phase::Menu;
                    info!("back to menu");
                }
            }
            Phase::Quit => return self.phase,
        }

        if input.quit {
            info!(from = ?self.phase, "quit requested");
            self.phase = Phase::Quit;
        }
        self.phase
    }

    /// Draw the current phase and present it.
    pub fn render<C: Canvas>(&self, canvas: &mut C) -> io::Result<()> {
        match self.phase {
            Phase::Menu => draw_menu(canvas, &self.config),
            Phase::Playing => draw_world(canvas, &self.world),
            Phase::GameOver => draw_game_over(canvas, &self.world),
            Phase::Quit => return Ok(()),
        }
        canvas.present()
    }

    /// Run until the quit signal.  Each phase spins its own fixed-rate loop
    /// of poll → step → render until it hands over to the next.
    pub fn run<I, C, K>(&mut self, input: &mut I, canvas: &mut C, clock: &mut K) -> io::Result<()>
    where
        I: InputSource,
        C: Canvas,
        K: Clock,
    {
        loop {
            match self.phase {
                Phase::Menu => self.phase_loop(Phase::Menu, input, canvas, clock)?,
                Phase::Playing => self.phase_loop(Phase::Playing, input, canvas, clock)?,
                Phase::GameOver => self.phase_loop(Phase::GameOver, input, canvas, clock)?,
                Phase::Quit => break,
            }
        }
        info!(games = self.games_played, "session ended");
        Ok(())
    }

    fn phase_loop<I, C, K>(
        &mut self,
        phase: Phase,
        input: &mut I,
        canvas: &mut C,
        clock: &mut K,
    ) -> io::Result<()>
    where
        I: InputSource,
        C: Canvas,
        K: Clock,
    {
        while self.phase == phase {
            let dt = clock.tick();
            let frame = input.poll()?;
            self.step(&frame, dt);
            self.render(canvas)?;
        }
        Ok(())
    }
}
