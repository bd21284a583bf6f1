//! Cosmetic particle bursts backed by a fixed-capacity pool
//!
//! Slots are recycled through a free list; once the pool saturates, the
//! oldest live particle gives up its slot. Nothing here affects gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// A single cosmetic particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in seconds
    pub ttl: f32,
    pub size: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone)]
struct Slot {
    particle: Particle,
    /// Allocation order, used to find the oldest slot when saturated
    stamp: u64,
    live: bool,
}

/// Fixed-capacity particle arena with a free list of recyclable slots
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Slot>,
    free: Vec<usize>,
    capacity: usize,
    next_stamp: u64,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
            next_stamp: 0,
        }
    }

    /// Emit a burst of `count` particles at `at` with the given color.
    ///
    /// Velocity spread and sizes come from the session RNG so bursts stay
    /// reproducible under a fixed seed.
    pub fn emit(&mut self, rng: &mut Pcg32, at: Vec2, color: [u8; 3], count: usize) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
            let particle = Particle {
                pos: at,
                vel: Vec2::new(
                    angle.cos() * speed,
                    angle.sin() * speed - PARTICLE_UPWARD_BIAS,
                ),
                ttl: PARTICLE_LIFETIME,
                size: rng.random_range(2.0..6.0),
                color,
            };
            self.insert(particle);
        }
    }

    fn insert(&mut self, particle: Particle) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Slot {
                particle,
                stamp,
                live: true,
            };
        } else if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                particle,
                stamp,
                live: true,
            });
        } else {
            // Saturated: recycle the oldest live slot
            let oldest = self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.live)
                .min_by_key(|(_, s)| s.stamp)
                .map(|(i, _)| i);
            if let Some(idx) = oldest {
                self.slots[idx] = Slot {
                    particle,
                    stamp,
                    live: true,
                };
            }
        }
    }

    /// Age all particles by `dt`, freeing expired slots
    pub fn advance(&mut self, dt: f32) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if !slot.live {
                continue;
            }
            let p = &mut slot.particle;
            p.pos += p.vel * dt;
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.ttl -= dt;
            if p.ttl <= 0.0 {
                slot.live = false;
                self.free.push(idx);
            }
        }
    }

    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|s| s.live).map(|s| &s.particle)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn pool_never_exceeds_capacity() {
        let mut pool = ParticlePool::with_capacity(16);
        let mut rng = rng();
        pool.emit(&mut rng, Vec2::ZERO, [255, 0, 0], 100);
        assert_eq!(pool.len(), 16);
    }

    #[test]
    fn saturation_recycles_oldest_slot() {
        let mut pool = ParticlePool::with_capacity(2);
        let mut rng = rng();
        pool.emit(&mut rng, Vec2::ZERO, [1, 1, 1], 2);
        // Third emission must evict the stamp-0 particle, not grow the pool
        pool.emit(&mut rng, Vec2::new(9.0, 9.0), [2, 2, 2], 1);
        assert_eq!(pool.len(), 2);
        assert!(pool.live().any(|p| p.color == [2, 2, 2]));
    }

    #[test]
    fn expired_particles_free_their_slots() {
        let mut pool = ParticlePool::with_capacity(8);
        let mut rng = rng();
        pool.emit(&mut rng, Vec2::ZERO, [1, 1, 1], 8);
        pool.advance(PARTICLE_LIFETIME + 0.01);
        assert!(pool.is_empty());

        // Freed slots are reused without growing past capacity
        pool.emit(&mut rng, Vec2::ZERO, [3, 3, 3], 8);
        assert_eq!(pool.len(), 8);
    }

    #[test]
    fn advance_applies_gravity() {
        let mut pool = ParticlePool::with_capacity(4);
        let mut rng = rng();
        pool.emit(&mut rng, Vec2::ZERO, [1, 1, 1], 1);
        let vy_before = pool.live().next().map(|p| p.vel.y);
        pool.advance(0.1);
        let vy_after = pool.live().next().map(|p| p.vel.y);
        match (vy_before, vy_after) {
            (Some(before), Some(after)) => assert!(after > before),
            _ => panic!("particle vanished early"),
        }
    }
}
