//! Discovered targets and the registry that deduplicates them.
//!
//! Targets live in an append-only arena. Agents and the element side table
//! both refer to a target through its [`TargetId`], so every agent that
//! converges on an element mutates the same record.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::SwarmConfig;
use crate::geometry::Rect;
use crate::surface::{StyleProperty, StylePatch, Surface};

/// Stable index of a target inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(usize);

impl TargetId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Target<E> {
    pub element: E,
    /// Captured once at discovery.
    pub bounds: Rect,
    life: u32,
    initial_style: StylePatch,
}

impl<E> Target<E> {
    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Takes one point of life, never going below zero. Returns the remaining life.
    pub fn hit(&mut self) -> u32 {
        self.life = self.life.saturating_sub(1);
        self.life
    }

    /// Style to re-apply when the swarm is torn down.
    pub fn initial_style(&self) -> &[(StyleProperty, String)] {
        &self.initial_style
    }
}

#[derive(Debug)]
pub struct TargetRegistry<E> {
    targets: Vec<Target<E>>,
    by_element: HashMap<E, TargetId>,
    life: u32,
    max_area: f64,
}

impl<E: Clone + Eq + Hash> TargetRegistry<E> {
    pub fn new(config: &SwarmConfig) -> Self {
        Self {
            targets: Vec::new(),
            by_element: HashMap::new(),
            life: config.life,
            max_area: config.max_target_area,
        }
    }

    pub fn lookup(&self, element: &E) -> Option<TargetId> {
        self.by_element.get(element).copied()
    }

    pub fn get(&self, id: TargetId) -> Option<&Target<E>> {
        self.targets.get(id.0)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target<E>> {
        self.targets.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target<E>)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(index, target)| (TargetId(index), target))
    }

    /// Whether `candidate` may become (or remain) something an agent pursues.
    pub fn is_suitable<S>(&self, surface: &S, candidate: Option<&E>) -> bool
    where
        S: Surface<Element = E>,
    {
        let Some(candidate) = candidate else {
            return false;
        };

        let mut ancestor = surface.parent_of(candidate);
        while let Some(parent) = ancestor {
            if self.by_element.contains_key(&parent) || surface.is_immune(&parent) {
                return false;
            }
            ancestor = surface.parent_of(&parent);
        }

        if surface.is_sprite(candidate) || surface.is_immune(candidate) {
            return false;
        }

        if let Some(id) = self.lookup(candidate) {
            if !self.targets[id.0].is_alive() {
                return false;
            }
        }

        surface.geometry_of(candidate).area() < self.max_area
    }

    /// Returns the existing record for `element`, or captures a new one.
    pub fn get_or_create<S>(&mut self, surface: &S, element: E) -> TargetId
    where
        S: Surface<Element = E>,
    {
        if let Some(id) = self.lookup(&element) {
            return id;
        }

        let opacity = surface
            .style_of(&element, StyleProperty::Opacity)
            .unwrap_or_default();
        let target = Target {
            bounds: surface.geometry_of(&element),
            life: self.life,
            initial_style: vec![
                (StyleProperty::Visibility, String::new()),
                (StyleProperty::Opacity, opacity),
            ],
            element: element.clone(),
        };
        let id = self.register_target(target);
        self.by_element.insert(element, id);
        log::debug!("discovered target #{} at {:?}", id.0, self.targets[id.0].bounds);
        id
    }

    fn register_target(&mut self, target: Target<E>) -> TargetId {
        self.targets.push(target);
        TargetId(self.targets.len() - 1)
    }

    /// Re-applies every target's saved style and forgets all of them.
    pub fn restore_all<S>(&mut self, surface: &mut S)
    where
        S: Surface<Element = E>,
    {
        self.by_element.clear();
        for target in self.targets.drain(..) {
            surface.set_style(&target.element, &target.initial_style);
        }
    }
}
