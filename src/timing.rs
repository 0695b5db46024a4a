use std::time::Instant;

/// Most real time a single frame may add to the update debt, in seconds.
pub const MAX_FRAME_TIME: f64 = 1.0;

/// Something driven by the fixed-step loop.
pub trait Simulation {
    /// Advance by one fixed step of `step` seconds.
    fn update(&mut self, step: f64);

    /// Draw once per frame; `alpha` is the leftover debt scaled by `slow`.
    fn render(&mut self, alpha: f64);
}

/// Fixed-timestep scheduler: updates run at `1/fps` regardless of how often
/// frames arrive, rendering happens once per frame.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    slow: f64,
    slow_step: f64,
    dt: f64,
    last: Option<Instant>,
    running: bool,
}

impl FixedStep {
    /// `slow` scales simulated time; 1.0 is real time, larger is slow motion.
    pub fn new(fps: u32, slow: f64) -> Self {
        let step = 1.0 / fps.max(1) as f64;
        Self {
            step,
            slow,
            slow_step: slow * step,
            dt: 0.0,
            last: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now: Instant) {
        self.last = Some(now);
        self.dt = 0.0;
        self.running = true;
    }

    /// Stops the loop; later frames do nothing.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame loop stopped");
        }
        self.running = false;
    }

    /// Runs one frame and returns how many updates it took.
    pub fn frame<S: Simulation>(&mut self, now: Instant, sim: &mut S) -> usize {
        if !self.running {
            return 0;
        }
        let last = *self.last.get_or_insert(now);
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.dt += elapsed.min(MAX_FRAME_TIME);

        let mut updates = 0;
        while self.dt > self.slow_step {
            self.dt -= self.slow_step;
            sim.update(self.step);
            updates += 1;
        }
        sim.render(self.dt / self.slow);
        self.last = Some(now);
        updates
    }
}
