use rand::Rng;

use crate::config::SwarmConfig;
use crate::geometry::{Rect, Vector2D};
use crate::surface::{Frame, StyleProperty, Surface};
use crate::target::{TargetId, TargetRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZerglingState {
    /// No live target.
    Seeking,
    /// Heading towards a live target.
    Approaching,
    /// Inside the target's box, taking one life per tick.
    Destroying,
    /// Nothing left in range. Terminal.
    Finished,
}

/// Offsets from an agent's centre, in the order a scan probes them.
///
/// Angles vary fastest and radii slowest, so every direction at one distance
/// is tried before moving further out.
pub fn scan_offsets(config: &SwarmConfig) -> impl Iterator<Item = Vector2D> {
    let step = config.scan_radius_step;
    let vision = config.vision;
    let degree_step = config.scan_degree_step.max(1) as usize;

    std::iter::successors(Some(config.scan_start_radius), move |radius| {
        Some(radius + step)
    })
    .take_while(move |radius| *radius < vision)
    .flat_map(move |radius| {
        (0..360u32)
            .step_by(degree_step)
            .map(move |degree| Vector2D::from_degrees(f64::from(degree)) * radius)
    })
}

/// A single roaming agent.
#[derive(Debug)]
pub struct Zergling<Sp> {
    pub position: Vector2D,
    pub velocity: Vector2D,
    speed: f64,
    state: ZerglingState,
    target: Option<TargetId>,
    pulse: bool,
    sprite: Option<Sp>,
}

impl<Sp> Zergling<Sp> {
    /// An agent with no rendering.
    pub fn new(position: Vector2D, speed: f64) -> Self {
        Self {
            position,
            velocity: Vector2D::zero(),
            speed,
            state: ZerglingState::Seeking,
            target: None,
            pulse: false,
            sprite: None,
        }
    }

    /// An agent with its sprite already placed on `surface`.
    pub fn spawn<S>(position: Vector2D, config: &SwarmConfig, surface: &mut S) -> Self
    where
        S: Surface<Sprite = Sp>,
    {
        let mut zergling = Self::new(position, config.speed);
        zergling.sprite = surface.spawn_sprite(Frame::new(position, config.agent_size));
        zergling
    }

    pub fn state(&self) -> ZerglingState {
        self.state
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.state == ZerglingState::Finished
    }

    pub fn is_destroying(&self) -> bool {
        self.state == ZerglingState::Destroying
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse
    }

    pub fn sprite(&self) -> Option<&Sp> {
        self.sprite.as_ref()
    }

    /// Advances the agent by one tick.
    pub fn draw<S, R>(
        &mut self,
        surface: &mut S,
        registry: &mut TargetRegistry<S::Element>,
        rng: &mut R,
        config: &SwarmConfig,
    ) where
        S: Surface<Sprite = Sp>,
        R: Rng + ?Sized,
    {
        match self.state {
            ZerglingState::Finished => return,
            ZerglingState::Destroying => {
                self.attack(surface, registry, config);
                return;
            }
            ZerglingState::Seeking | ZerglingState::Approaching => {}
        }

        let has_live_target = self
            .target
            .and_then(|id| registry.get(id))
            .is_some_and(|target| target.is_alive());

        if !has_live_target {
            match self.find_target(surface, registry, config) {
                Some(id) => {
                    self.target = Some(id);
                    self.state = ZerglingState::Approaching;
                    if let Some(target) = registry.get(id) {
                        self.calc_movement(target.bounds, rng);
                    }
                }
                None => {
                    self.finish(surface, config);
                    return;
                }
            }
        }

        let Some(bounds) = self
            .target
            .and_then(|id| registry.get(id))
            .map(|target| target.bounds)
        else {
            return;
        };

        if bounds.contains(self.position) {
            self.state = ZerglingState::Destroying;
            return;
        }

        self.position += self.velocity;
        self.render(surface, config);
    }

    fn attack<S>(
        &mut self,
        surface: &mut S,
        registry: &mut TargetRegistry<S::Element>,
        config: &SwarmConfig,
    ) where
        S: Surface<Sprite = Sp>,
    {
        let Some(target) = self.target.and_then(|id| registry.get_mut(id)) else {
            self.target = None;
            self.state = ZerglingState::Seeking;
            return;
        };

        if target.is_alive() {
            let life = target.hit();
            let opacity = f64::from(life) / f64::from(config.life);
            surface.set_style(
                &target.element,
                &[(StyleProperty::Opacity, opacity.to_string())],
            );
            self.pulsate(surface, config);
        } else {
            surface.set_style(
                &target.element,
                &[(StyleProperty::Visibility, "hidden".to_string())],
            );
            self.reset_pulse(surface, config);
            self.target = None;
            self.state = ZerglingState::Seeking;
        }
    }

    /// Scans outwards from the agent's centre for the first suitable element.
    ///
    /// The first hit wins even if a nearer one exists at another angle of a
    /// later radius. A newly seen element is registered as a target.
    pub fn find_target<S>(
        &self,
        surface: &mut S,
        registry: &mut TargetRegistry<S::Element>,
        config: &SwarmConfig,
    ) -> Option<TargetId>
    where
        S: Surface,
    {
        let half = config.agent_size / 2.0;
        let centre = self.position + Vector2D::new(half, half);
        let scroll = surface.scroll_offset();

        let mut probes = 0usize;
        for offset in scan_offsets(config) {
            let point = centre + offset - scroll;
            probes += 1;
            let candidate = surface.element_at_point(point.x, point.y);
            if registry.is_suitable(&*surface, candidate.as_ref()) {
                log::trace!("scan hit after {} probes", probes);
                return candidate.map(|element| registry.get_or_create(&*surface, element));
            }
        }

        log::trace!("scan exhausted after {} probes", probes);
        None
    }

    /// Aims at a random point inside `bounds`. Only called when a target is acquired.
    pub fn calc_movement<R: Rng + ?Sized>(&mut self, bounds: Rect, rng: &mut R) {
        let aim = bounds.random_point(rng);
        self.velocity = self.position.heading_to(aim, self.speed);
    }

    fn finish<S>(&mut self, surface: &mut S, config: &SwarmConfig)
    where
        S: Surface<Sprite = Sp>,
    {
        self.state = ZerglingState::Finished;
        self.target = None;
        if let Some(sprite) = self.sprite.take() {
            surface.fade_out_sprite(sprite, config.fade_out_ms);
        }
        log::debug!("zergling finished at ({:.1}, {:.1})", self.position.x, self.position.y);
    }

    /// Drops the agent's rendering without fading.
    pub fn remove<S>(&mut self, surface: &mut S)
    where
        S: Surface<Sprite = Sp>,
    {
        if let Some(sprite) = self.sprite.take() {
            surface.remove_sprite(sprite);
        }
    }

    fn pulsate<S>(&mut self, surface: &mut S, config: &SwarmConfig)
    where
        S: Surface<Sprite = Sp>,
    {
        self.pulse = !self.pulse;
        self.render(surface, config);
    }

    fn reset_pulse<S>(&mut self, surface: &mut S, config: &SwarmConfig)
    where
        S: Surface<Sprite = Sp>,
    {
        self.pulse = false;
        self.render(surface, config);
    }

    /// Current sprite frame: baseline, or grown around the centre mid-pulse.
    pub fn frame(&self, config: &SwarmConfig) -> Frame {
        if self.pulse {
            let offset = config.pulse_offset();
            Frame::new(
                self.position - Vector2D::new(offset, offset),
                config.pulse_size,
            )
        } else {
            Frame::new(self.position, config.agent_size)
        }
    }

    fn render<S>(&self, surface: &mut S, config: &SwarmConfig)
    where
        S: Surface<Sprite = Sp>,
    {
        if let Some(sprite) = &self.sprite {
            surface.place_sprite(sprite, self.frame(config));
        }
    }
}
