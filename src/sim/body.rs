//! Bodies: the player ship, bullets and invaders
//!
//! Bodies never touch the world directly. `update` returns the commands
//! the body wants applied (fire a bullet, remove me) and the world applies
//! them once every body has moved.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::is_out_of_bounds;
use super::world::{GameEvent, Key, TickInput};
use crate::consts::*;
use crate::error::GameError;
use crate::renderer::{Canvas, Color, colors};

/// Stable identity of a body within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Patrol state for one member of the formation
#[derive(Debug, Clone, PartialEq)]
pub struct Invader {
    /// Formation slot (column = index % 11, row = index % 5)
    pub grid_index: usize,
    /// Horizontal displacement accumulated since the last bounce
    pub patrol_x: f32,
    /// Signed horizontal speed (pixels/tick)
    pub speed_x: f32,
}

/// What a body is, plus any per-variant state
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Player,
    Bullet { velocity: Vec2 },
    Invader(Invader),
}

/// A bullet the world should spawn
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub color: Color,
}

/// Requests a body makes of the world during `update`
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fire(Shot),
    Despawn(BodyId),
    Emit(GameEvent),
}

/// Any simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub center: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub kind: BodyKind,
}

impl Body {
    /// Player ship parked at the bottom middle of the playfield
    pub fn player(id: BodyId, bounds: Vec2) -> Self {
        Self {
            id,
            center: Vec2::new(bounds.x / 2.0, bounds.y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            color: colors::PLAYER,
            kind: BodyKind::Player,
        }
    }

    pub fn bullet(id: BodyId, center: Vec2, velocity: Vec2, color: Color) -> Self {
        Self {
            id,
            center,
            size: Vec2::splat(BULLET_SIZE),
            color,
            kind: BodyKind::Bullet { velocity },
        }
    }

    /// Invader in formation slot `grid_index`
    pub fn invader(id: BodyId, grid_index: usize, center: Vec2, edge: f32) -> Self {
        Self {
            id,
            center,
            size: Vec2::splat(edge),
            color: colors::INVADER,
            kind: BodyKind::Invader(Invader {
                grid_index,
                patrol_x: 0.0,
                speed_x: INVADER_SPEED,
            }),
        }
    }

    pub fn is_invader(&self) -> bool {
        matches!(self.kind, BodyKind::Invader(_))
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, BodyKind::Bullet { .. })
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, BodyKind::Player)
    }

    /// Check the geometry invariant: positive extents and a finite center
    pub fn validate(&self) -> Result<(), GameError> {
        let reason = if !(self.size.x > 0.0 && self.size.y > 0.0) {
            format!("non-positive size {:?}", self.size)
        } else if !self.center.is_finite() {
            format!("non-finite center {:?}", self.center)
        } else {
            return Ok(());
        };
        Err(GameError::InvalidBodyState {
            id: self.id,
            reason,
        })
    }

    /// Advance one tick
    pub fn update<R: Rng>(&mut self, input: &TickInput, bounds: Vec2, rng: &mut R) -> Vec<Command> {
        let Body {
            id,
            center,
            size,
            kind,
            ..
        } = self;

        match kind {
            BodyKind::Player => update_player(center, *size, input, bounds),
            BodyKind::Bullet { velocity } => {
                *center += *velocity;
                if is_out_of_bounds(*center, bounds) {
                    vec![Command::Despawn(*id)]
                } else {
                    Vec::new()
                }
            }
            BodyKind::Invader(invader) => update_invader(invader, center, *size, rng),
        }
    }

    /// Paint the bounding box
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.fill_rect(self.center - self.size / 2.0, self.size, self.color);
    }
}

fn update_player(center: &mut Vec2, size: Vec2, input: &TickInput, bounds: Vec2) -> Vec<Command> {
    let half_width = size.x / 2.0;

    // Right wins when both are held
    if input.is_down(Key::Right) {
        center.x = (center.x + PLAYER_STEP).min(bounds.x - half_width);
    } else if input.is_down(Key::Left) {
        center.x = (center.x - PLAYER_STEP).max(half_width);
    }

    if !input.is_down(Key::Fire) {
        return Vec::new();
    }

    // No cooldown: holding fire shoots every tick
    vec![
        Command::Fire(Shot {
            origin: Vec2::new(center.x, center.y - size.y / 2.0 - MUZZLE_GAP),
            velocity: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            color: colors::PLAYER_BULLET,
        }),
        Command::Emit(GameEvent::PlayerFired),
    ]
}

fn update_invader<R: Rng>(invader: &mut Invader, center: &mut Vec2, size: Vec2, rng: &mut R) -> Vec<Command> {
    // Bounce once the patrol has drifted a full body width
    if invader.patrol_x < 0.0 || invader.patrol_x > size.x {
        invader.speed_x = -invader.speed_x;
    }
    center.x += invader.speed_x;
    invader.patrol_x += invader.speed_x;

    if rng.random::<f32>() <= INVADER_FIRE_THRESHOLD {
        return Vec::new();
    }

    let drift = rng.random::<f32>() * INVADER_BULLET_MAX_DRIFT;
    vec![Command::Fire(Shot {
        origin: Vec2::new(center.x, center.y + size.y / 2.0 + MUZZLE_GAP),
        velocity: Vec2::new(drift, INVADER_BULLET_SPEED),
        color: colors::INVADER_BULLET,
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuilder;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(1300.0, 800.0);

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_spawns_at_bottom_middle() {
        let player = Body::player(BodyId(1), BOUNDS);
        assert_eq!(player.center, Vec2::new(650.0, 785.0));
        assert_eq!(player.size, Vec2::splat(15.0));
    }

    #[test]
    fn test_player_fire_spawns_bullet_above_ship() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = Body::player(BodyId(1), BOUNDS);
        player.center = Vec2::new(100.0, 100.0);

        let commands = player.update(&fire_input(), BOUNDS, &mut rng);
        let shots: Vec<&Shot> = commands
            .iter()
            .filter_map(|c| match c {
                Command::Fire(shot) => Some(shot),
                _ => None,
            })
            .collect();

        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].origin, Vec2::new(100.0, 100.0 - 15.0 / 2.0 - 2.0));
        assert_eq!(shots[0].velocity, Vec2::new(0.0, -3.0));
        assert_eq!(shots[0].color, colors::PLAYER_BULLET);
        assert!(commands.contains(&Command::Emit(GameEvent::PlayerFired)));
    }

    #[test]
    fn test_player_right_wins_over_left() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = Body::player(BodyId(1), BOUNDS);
        let start = player.center.x;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };

        let commands = player.update(&input, BOUNDS, &mut rng);
        assert!(commands.is_empty());
        assert_eq!(player.center.x, start + 2.0);
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = Body::player(BodyId(1), BOUNDS);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let left = TickInput {
            left: true,
            ..Default::default()
        };

        player.center.x = BOUNDS.x - 8.0;
        player.update(&right, BOUNDS, &mut rng);
        assert_eq!(player.center.x, BOUNDS.x - 7.5);

        player.center.x = 8.0;
        player.update(&left, BOUNDS, &mut rng);
        assert_eq!(player.center.x, 7.5);
    }

    #[test]
    fn test_bullet_moves_and_despawns_past_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullet = Body::bullet(
            BodyId(9),
            Vec2::new(50.0, 5.0),
            Vec2::new(0.0, -3.0),
            colors::PLAYER_BULLET,
        );
        let input = TickInput::default();

        assert!(bullet.update(&input, BOUNDS, &mut rng).is_empty());
        assert_eq!(bullet.center, Vec2::new(50.0, 2.0));

        let commands = bullet.update(&input, BOUNDS, &mut rng);
        assert_eq!(bullet.center, Vec2::new(50.0, -1.0));
        assert_eq!(commands, vec![Command::Despawn(BodyId(9))]);
    }

    #[test]
    fn test_invader_patrol_bounces_after_one_width() {
        let mut rng = Pcg32::seed_from_u64(3);
        let edge = 10.0;
        let start = Vec2::new(200.0, 200.0);
        let mut invader = Body::invader(BodyId(2), 0, start, edge);
        let input = TickInput::default();

        let mut max_x = start.x;
        let mut min_x = start.x;
        for _ in 0..500 {
            invader.update(&input, BOUNDS, &mut rng);
            max_x = max_x.max(invader.center.x);
            min_x = min_x.min(invader.center.x);
        }

        // Oscillates around its slot by about one body width
        assert!(max_x > start.x + edge - 1.0);
        assert!(max_x < start.x + edge + 1.0);
        assert!(min_x > start.x - 1.0);
        assert_eq!(invader.center.y, start.y);
    }

    #[test]
    fn test_invader_fires_downward_sometimes() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut invader = Body::invader(BodyId(2), 0, Vec2::new(200.0, 200.0), 20.0);
        let input = TickInput::default();

        let mut shots = Vec::new();
        for _ in 0..5000 {
            for command in invader.update(&input, BOUNDS, &mut rng) {
                if let Command::Fire(shot) = command {
                    shots.push((invader.center, shot));
                }
            }
        }

        // ~0.5% of 5000 ticks
        assert!(!shots.is_empty());
        assert!(shots.len() < 100);
        for (center, shot) in shots {
            assert_eq!(shot.origin, Vec2::new(center.x, center.y + 10.0 + 2.0));
            assert_eq!(shot.velocity.y, 3.0);
            assert!(shot.velocity.x >= 0.0 && shot.velocity.x < 0.5);
            assert_eq!(shot.color, colors::INVADER_BULLET);
        }
    }

    #[test]
    fn test_validate_rejects_degenerate_geometry() {
        let mut body = Body::player(BodyId(1), BOUNDS);
        assert!(body.validate().is_ok());

        body.size.x = 0.0;
        assert!(matches!(
            body.validate(),
            Err(GameError::InvalidBodyState { id: BodyId(1), .. })
        ));

        body.size.x = 15.0;
        body.center.y = f32::NAN;
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_draw_fills_bounding_box() {
        let body = Body::player(BodyId(1), Vec2::new(100.0, 100.0));
        let mut frame = FrameBuilder::new(Vec2::new(100.0, 100.0));
        body.draw(&mut frame);
        assert_eq!(frame.rect_count(), 1);
        assert_eq!(frame.vertices()[0].color, colors::PLAYER);
    }
}
