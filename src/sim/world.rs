//! World controller
//!
//! Owns every live body and advances them once per animation frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{Body, BodyId, BodyKind, Command, Shot};
use super::collision::colliding;
use crate::consts::*;
use crate::error::GameError;
use crate::renderer::{Canvas, colors};

/// Logical keys the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// Keyboard snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    pub fn is_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
        }
    }
}

/// Things that happened during a tick that the platform layer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player shot a bullet (play the laser sound)
    PlayerFired,
    /// The player ship was removed by a collision
    PlayerDestroyed,
}

/// Formation spacing and first-slot offset for a viewport width
fn grid_layout(width: f32) -> (f32, f32) {
    let spacing = (width / GRID_DIVISIONS).floor();
    (spacing, spacing * GRID_START_CELLS)
}

/// Center of formation slot `grid_index`
pub fn grid_position(grid_index: usize, width: f32) -> Vec2 {
    let (spacing, start) = grid_layout(width);
    Vec2::new(
        start + (grid_index % INVADER_COLUMNS) as f32 * spacing,
        start + (grid_index % INVADER_ROWS) as f32 * spacing,
    )
}

/// Invader edge length for a viewport width
fn invader_edge(width: f32) -> f32 {
    (width / INVADER_SIZE_DIVISOR).max(INVADER_MIN_SIZE)
}

/// The game world
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    bounds: Vec2,
    rng: Pcg32,
    events: Vec<GameEvent>,
    tick_count: u64,
    next_id: u32,
}

impl World {
    /// Create a world with the player and a full invader formation
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        let mut world = Self::empty(bounds, seed);

        let player = Body::player(world.next_entity_id(), bounds);
        world.push_valid(player);
        world.spawn_invaders();

        log::info!(
            "World created: {}x{} with {} invaders (seed {})",
            bounds.x,
            bounds.y,
            world.invader_count(),
            seed
        );
        world
    }

    /// Create a world with no bodies
    pub fn empty(bounds: Vec2, seed: u64) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tick_count: 0,
            next_id: 1,
        }
    }

    /// Allocate a new body ID
    pub fn next_entity_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_invaders(&mut self) {
        let edge = invader_edge(self.bounds.x);
        for grid_index in 0..INVADER_COUNT {
            let id = self.next_entity_id();
            let center = grid_position(grid_index, self.bounds.x);
            self.push_valid(Body::invader(id, grid_index, center, edge));
        }
    }

    fn push_valid(&mut self, body: Body) {
        if let Err(e) = self.add_body(body) {
            log::error!("Dropping body: {e}");
        }
    }

    /// Advance the simulation by one frame
    ///
    /// Collisions are resolved on positions from the end of the previous
    /// tick; survivors then move.
    pub fn tick(&mut self, input: &TickInput) {
        self.tick_count += 1;
        self.prune_collisions();

        let mut shots: Vec<Shot> = Vec::new();
        let mut despawns: Vec<BodyId> = Vec::new();

        for index in 0..self.bodies.len() {
            let commands = self.bodies[index].update(input, self.bounds, &mut self.rng);
            for command in commands {
                match command {
                    Command::Fire(shot) => {
                        let shooter = &self.bodies[index];
                        // Invaders hold fire while a teammate is in the way
                        if shooter.is_invader() && self.are_invaders_below(shooter) {
                            continue;
                        }
                        shots.push(shot);
                    }
                    Command::Despawn(id) => despawns.push(id),
                    Command::Emit(event) => self.events.push(event),
                }
            }
        }

        for id in despawns {
            self.remove_bullet(id);
        }
        for shot in shots {
            let id = self.next_entity_id();
            self.push_valid(Body::bullet(id, shot.origin, shot.velocity, shot.color));
        }

        self.drop_invalid();
    }

    /// Remove every body that overlaps at least one other body
    fn prune_collisions(&mut self) {
        let doomed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|a| self.bodies.iter().any(|b| colliding(a, b)))
            .map(|b| b.id)
            .collect();

        if doomed.is_empty() {
            return;
        }

        if self
            .bodies
            .iter()
            .any(|b| b.is_player() && doomed.contains(&b.id))
        {
            self.events.push(GameEvent::PlayerDestroyed);
        }

        self.bodies.retain(|b| !doomed.contains(&b.id));
        log::debug!("Tick {}: {} bodies destroyed", self.tick_count, doomed.len());
    }

    fn drop_invalid(&mut self) {
        self.bodies.retain(|b| match b.validate() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Removing body: {e}");
                false
            }
        });
    }

    /// Clear the surface and paint the background and every body
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        let size = canvas.size();
        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, size, colors::BACKGROUND);
        for body in &self.bodies {
            body.draw(canvas);
        }
    }

    /// Add a body to the live set
    pub fn add_body(&mut self, body: Body) -> Result<BodyId, GameError> {
        body.validate()?;
        let id = body.id;
        self.bodies.push(body);
        Ok(id)
    }

    /// Remove a body by identity; returns false if it was already gone
    pub fn remove_bullet(&mut self, id: BodyId) -> bool {
        match self.bodies.iter().position(|b| b.id == id) {
            Some(index) => {
                self.bodies.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether another invader sits lower on screen within one body width
    pub fn are_invaders_below(&self, invader: &Body) -> bool {
        self.bodies.iter().any(|b| {
            b.is_invader()
                && b.center.y > invader.center.y
                && (b.center.x - invader.center.x).abs() < invader.size.x
        })
    }

    /// Adopt new viewport dimensions
    ///
    /// Invaders snap back to their formation slots for the new width and
    /// keep the size they were created with. Bullets and the player keep
    /// their coordinates; anything now outside the playfield is cleaned up
    /// by later ticks.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        for body in &mut self.bodies {
            if let BodyKind::Invader(invader) = &body.kind {
                body.center = grid_position(invader.grid_index, bounds.x);
            }
        }
        log::info!("World resized to {}x{}", bounds.x, bounds.y);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_player())
    }

    pub fn invader_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_invader()).count()
    }

    pub fn bullet_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_bullet()).count()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
