//! Collision detection and catch/miss resolution
//!
//! Axis-aligned bounding boxes are all this game needs: the basket is a box,
//! every falling entity is a box. Resolution applies the score and effect
//! consequences and emits the tick's one-shot events.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::particles::ParticlePool;
use super::score::ScoreBoard;
use super::state::{Basket, EntityKind, FallingEntity, GameEvent, PowerUpKind};
use crate::consts::*;
use crate::stats::SessionTally;

/// AABB overlap test on top-left anchored boxes
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Does the basket's box overlap this entity's box?
pub fn basket_catches(basket: &Basket, entity: &FallingEntity) -> bool {
    aabb_overlap(
        basket.pos,
        Vec2::new(basket.width, basket.height),
        entity.pos,
        Vec2::splat(ENTITY_SIZE),
    )
}

/// Magnet attraction step.
///
/// Point-scoring objects whose center lies within `radius` horizontally of
/// the basket center get pulled toward it at `pull` px/s. The pull is capped
/// at the remaining distance so an object never overshoots the center, and
/// capture still goes through the ordinary AABB test.
pub fn apply_magnet(
    basket: &Basket,
    entities: &mut [FallingEntity],
    radius: f32,
    pull: f32,
    dt: f32,
) {
    let target = basket.center_x();
    for entity in entities.iter_mut() {
        let attractable = match entity.kind {
            EntityKind::Object(kind) => !kind.is_hostile(),
            EntityKind::PowerUp(_) => false,
        };
        if !attractable {
            continue;
        }

        let dx = target - entity.center().x;
        if dx.abs() > radius {
            continue;
        }
        let step = (pull * dt).min(dx.abs());
        entity.pos.x += step.copysign(dx);
    }
}

/// Resolve every live entity against the basket and the bottom edge.
///
/// Catches run before miss checks so an entity overlapping the basket on the
/// same tick it crosses the bottom still counts as caught.
#[allow(clippy::too_many_arguments)]
pub fn resolve_frame(
    basket: &Basket,
    entities: &mut Vec<FallingEntity>,
    score: &mut ScoreBoard,
    particles: &mut ParticlePool,
    rng: &mut Pcg32,
    tally: &mut SessionTally,
    events: &mut Vec<GameEvent>,
) {
    entities.retain_mut(|entity| {
        if basket_catches(basket, entity) {
            let at = entity.center();
            match entity.kind {
                EntityKind::Object(kind) if kind.is_hostile() => {
                    score.penalize(BOMB_DAMAGE);
                    tally.misses += 1;
                    particles.emit(rng, at, [255, 100, 0], CATCH_BURST * 3);
                    events.push(GameEvent::BombCaught {
                        penalty: BOMB_DAMAGE,
                    });
                }
                EntityKind::Object(kind) => {
                    let points = score.award_catch(kind.points());
                    tally.catches += 1;
                    particles.emit(rng, at, kind.color(), CATCH_BURST);
                    events.push(GameEvent::ObjectCaught {
                        kind,
                        points,
                        combo: score.combo,
                    });
                }
                EntityKind::PowerUp(kind) => {
                    score.activate(kind);
                    particles.emit(rng, at, kind.color(), CATCH_BURST * 2);
                    events.push(GameEvent::PowerUpActivated { kind });
                }
            }
            return false;
        }

        if entity.below_playfield() {
            match entity.kind {
                EntityKind::Object(kind) if kind.is_hostile() => {
                    // Dodging a bomb is the intended outcome - free removal
                }
                EntityKind::Object(_) => {
                    let shielded = score.is_active(PowerUpKind::Shield);
                    if shielded {
                        score.reset_combo();
                    } else {
                        score.penalize(MISS_PENALTY);
                    }
                    tally.misses += 1;
                    events.push(GameEvent::ObjectMissed { shielded });
                }
                EntityKind::PowerUp(_) => {
                    // Silent removal, no penalty
                }
            }
            return false;
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;
    use rand::SeedableRng;

    fn object(kind: ObjectKind, x: f32, y: f32) -> FallingEntity {
        let mut e = FallingEntity::new(1, EntityKind::Object(kind), x, 300.0, 0.0);
        e.pos.y = y;
        e
    }

    fn powerup(kind: PowerUpKind, x: f32, y: f32) -> FallingEntity {
        let mut e = FallingEntity::new(2, EntityKind::PowerUp(kind), x, 210.0, 0.0);
        e.pos.y = y;
        e
    }

    struct Fixture {
        basket: Basket,
        score: ScoreBoard,
        particles: ParticlePool,
        rng: Pcg32,
        tally: SessionTally,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                basket: Basket::default(),
                score: ScoreBoard::new(0),
                particles: ParticlePool::with_capacity(MAX_PARTICLES),
                rng: Pcg32::seed_from_u64(1),
                tally: SessionTally::default(),
                events: Vec::new(),
            }
        }

        fn resolve(&mut self, entities: &mut Vec<FallingEntity>) {
            resolve_frame(
                &self.basket,
                entities,
                &mut self.score,
                &mut self.particles,
                &mut self.rng,
                &mut self.tally,
                &mut self.events,
            );
        }

        /// An entity sitting squarely on the basket
        fn on_basket(&self, kind: EntityKind) -> FallingEntity {
            let x = self.basket.center_x() - ENTITY_SIZE / 2.0;
            let y = self.basket.pos.y - ENTITY_SIZE / 2.0;
            match kind {
                EntityKind::Object(k) => object(k, x, y),
                EntityKind::PowerUp(k) => powerup(k, x, y),
            }
        }
    }

    #[test]
    fn aabb_detects_overlap_and_separation() {
        let size = Vec2::splat(10.0);
        assert!(aabb_overlap(
            Vec2::ZERO,
            size,
            Vec2::new(5.0, 5.0),
            size
        ));
        assert!(!aabb_overlap(
            Vec2::ZERO,
            size,
            Vec2::new(10.0, 0.0),
            size
        ));
        assert!(!aabb_overlap(
            Vec2::ZERO,
            size,
            Vec2::new(0.0, 20.0),
            size
        ));
    }

    #[test]
    fn catch_awards_points_and_bursts_particles() {
        let mut fx = Fixture::new();
        let mut entities = vec![fx.on_basket(EntityKind::Object(ObjectKind::Green))];
        fx.resolve(&mut entities);

        assert!(entities.is_empty());
        assert_eq!(fx.score.score, STARTING_SCORE + 2);
        assert_eq!(fx.score.combo, 1);
        assert_eq!(fx.tally.catches, 1);
        assert_eq!(fx.particles.len(), CATCH_BURST);
        assert!(matches!(
            fx.events[..],
            [GameEvent::ObjectCaught {
                kind: ObjectKind::Green,
                points: 2,
                combo: 1
            }]
        ));
    }

    #[test]
    fn bomb_catch_costs_points_and_breaks_combo() {
        let mut fx = Fixture::new();
        fx.score.combo = 4;
        let mut entities = vec![fx.on_basket(EntityKind::Object(ObjectKind::Bomb))];
        fx.resolve(&mut entities);

        assert_eq!(fx.score.score, STARTING_SCORE - BOMB_DAMAGE);
        assert_eq!(fx.score.combo, 0);
        assert_eq!(fx.tally.misses, 1);
        assert!(matches!(fx.events[..], [GameEvent::BombCaught { .. }]));
    }

    #[test]
    fn powerup_catch_activates_without_scoring() {
        let mut fx = Fixture::new();
        fx.score.combo = 2;
        let mut entities = vec![fx.on_basket(EntityKind::PowerUp(PowerUpKind::Magnet))];
        fx.resolve(&mut entities);

        assert_eq!(fx.score.score, STARTING_SCORE);
        assert_eq!(fx.score.combo, 2);
        assert!(fx.score.is_active(PowerUpKind::Magnet));
        assert!(matches!(
            fx.events[..],
            [GameEvent::PowerUpActivated {
                kind: PowerUpKind::Magnet
            }]
        ));
    }

    #[test]
    fn unshielded_miss_costs_one_point() {
        let mut fx = Fixture::new();
        fx.score.combo = 3;
        let mut entities = vec![object(ObjectKind::Red, 10.0, PLAYFIELD_HEIGHT + 1.0)];
        fx.resolve(&mut entities);

        assert!(entities.is_empty());
        assert_eq!(fx.score.score, STARTING_SCORE - MISS_PENALTY);
        assert_eq!(fx.score.combo, 0);
        assert_eq!(fx.tally.misses, 1);
        assert!(matches!(
            fx.events[..],
            [GameEvent::ObjectMissed { shielded: false }]
        ));
    }

    #[test]
    fn shielded_miss_keeps_score_but_still_breaks_combo() {
        let mut fx = Fixture::new();
        fx.score.activate(PowerUpKind::Shield);
        fx.score.combo = 3;
        let mut entities = vec![object(ObjectKind::Red, 10.0, PLAYFIELD_HEIGHT + 1.0)];
        fx.resolve(&mut entities);

        assert_eq!(fx.score.score, STARTING_SCORE);
        assert_eq!(fx.score.combo, 0);
        assert!(matches!(
            fx.events[..],
            [GameEvent::ObjectMissed { shielded: true }]
        ));
    }

    #[test]
    fn bomb_and_powerup_misses_are_silent() {
        let mut fx = Fixture::new();
        let mut entities = vec![
            object(ObjectKind::Bomb, 10.0, PLAYFIELD_HEIGHT + 1.0),
            powerup(PowerUpKind::Shield, 60.0, PLAYFIELD_HEIGHT + 1.0),
        ];
        fx.resolve(&mut entities);

        assert!(entities.is_empty());
        assert_eq!(fx.score.score, STARTING_SCORE);
        assert_eq!(fx.tally.misses, 0);
        assert!(fx.events.is_empty());
    }

    #[test]
    fn magnet_pulls_objects_without_overshoot() {
        let basket = Basket::default();
        let target = basket.center_x();
        let mut entities = vec![object(ObjectKind::Red, target - 100.0 - ENTITY_SIZE / 2.0, 0.0)];

        apply_magnet(&basket, &mut entities, 150.0, 300.0, 0.1);
        let moved = entities[0].center().x;
        assert!((moved - (target - 70.0)).abs() < 1e-3);

        // A long step lands exactly on center, never past it
        apply_magnet(&basket, &mut entities, 150.0, 300.0, 10.0);
        assert!((entities[0].center().x - target).abs() < 1e-3);
    }

    #[test]
    fn magnet_ignores_bombs_and_out_of_range_objects() {
        let basket = Basket::default();
        let target = basket.center_x();
        let mut entities = vec![
            object(ObjectKind::Bomb, target - 50.0, 0.0),
            object(ObjectKind::Red, target + 400.0, 0.0),
        ];
        let before: Vec<f32> = entities.iter().map(|e| e.pos.x).collect();

        apply_magnet(&basket, &mut entities, 150.0, 300.0, 0.1);
        for (entity, x) in entities.iter().zip(before) {
            assert_eq!(entity.pos.x, x);
        }
    }
}
