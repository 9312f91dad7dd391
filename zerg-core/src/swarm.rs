use rand::Rng;

use crate::config::{ConfigError, SwarmConfig};
use crate::geometry::Vector2D;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::target::TargetRegistry;
use crate::zergling::Zergling;

/// The whole simulation: agents, the targets they found, and the tick loop.
///
/// The scheduler is active exactly while at least one agent is unfinished.
pub struct ZergRush<S: Surface, Sch, R> {
    surface: S,
    scheduler: Sch,
    rng: R,
    config: SwarmConfig,
    zerglings: Vec<Zergling<S::Sprite>>,
    registry: TargetRegistry<S::Element>,
    running: bool,
    ticks: u64,
}

impl<S, Sch, R> ZergRush<S, Sch, R>
where
    S: Surface,
    Sch: Scheduler,
    R: Rng,
{
    pub fn new(surface: S, scheduler: Sch, rng: R, config: SwarmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(surface, scheduler, rng, config))
    }

    fn assemble(surface: S, scheduler: Sch, rng: R, config: SwarmConfig) -> Self {
        Self {
            surface,
            scheduler,
            rng,
            registry: TargetRegistry::new(&config),
            config,
            zerglings: Vec::new(),
            running: false,
            ticks: 0,
        }
    }

    /// Spawns `count` agents near the origin and starts the tick loop.
    ///
    /// A swarm is started once; later calls are ignored.
    pub fn start(&mut self, count: usize) {
        if !self.zerglings.is_empty() || self.running {
            log::warn!("swarm already started with {} zerglings", self.zerglings.len());
            return;
        }

        let extent = self.config.spawn_extent;
        for _ in 0..count {
            let position = Vector2D::new(
                self.rng.gen::<f64>() * extent,
                self.rng.gen::<f64>() * extent,
            );
            let zergling = Zergling::spawn(position, &self.config, &mut self.surface);
            self.zerglings.push(zergling);
        }

        if self.zerglings.is_empty() {
            log::info!("zerg rush started with no zerglings, nothing to schedule");
            return;
        }

        self.scheduler.start(self.config.tick_period_ms);
        self.running = true;
        log::info!(
            "zerg rush started: {} zerglings, tick every {}ms",
            count,
            self.config.tick_period_ms
        );
    }

    /// Draws every agent once, in creation order. Returns whether the loop is still running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        for zergling in self.zerglings.iter_mut() {
            zergling.draw(
                &mut self.surface,
                &mut self.registry,
                &mut self.rng,
                &self.config,
            );
        }
        self.ticks += 1;

        if self.zerglings.iter().all(Zergling::is_finished) {
            self.stop();
            log::info!(
                "zerg rush complete after {} ticks, {} targets found",
                self.ticks,
                self.registry.len()
            );
        }

        self.running
    }

    /// Ticks synchronously until the swarm completes or `max_ticks` have run.
    /// Returns the number of ticks performed.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> u64 {
        let mut performed = 0;
        while performed < max_ticks && self.running {
            self.tick();
            performed += 1;
        }
        performed
    }

    /// Stops the loop, removes every sprite and restores every target.
    pub fn teardown(&mut self) {
        self.stop();
        for zergling in self.zerglings.iter_mut() {
            zergling.remove(&mut self.surface);
        }
        let restored = self.registry.len();
        self.registry.restore_all(&mut self.surface);
        self.surface.release_elements();
        log::info!("zerg rush torn down, {} targets restored", restored);
    }

    fn stop(&mut self) {
        self.scheduler.cancel();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn zerglings(&self) -> &[Zergling<S::Sprite>] {
        &self.zerglings
    }

    pub fn finished_count(&self) -> usize {
        self.zerglings.iter().filter(|z| z.is_finished()).count()
    }

    pub fn targets(&self) -> &TargetRegistry<S::Element> {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }
}

/// Builds a swarm with the default configuration and starts `count` agents.
pub fn start_swarm<S, Sch, R>(
    count: usize,
    surface: S,
    scheduler: Sch,
    rng: R,
) -> ZergRush<S, Sch, R>
where
    S: Surface,
    Sch: Scheduler,
    R: Rng,
{
    let mut swarm = ZergRush::assemble(surface, scheduler, rng, SwarmConfig::default());
    swarm.start(count);
    swarm
}
