//! Cosmetic particle bursts
//!
//! Particles never affect gameplay. Spread is drawn from the state's seeded
//! RNG so a given seed and input sequence always produce the same bursts.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::PARTICLE_DRIFT;

/// Default live particle limit
pub const MAX_PARTICLES: usize = 512;

/// Spawn `count` particles at `origin`, dropping the oldest past `cap`
pub fn burst(
    particles: &mut Vec<Particle>,
    cap: usize,
    rng: &mut Pcg32,
    origin: Vec2,
    color: u32,
    count: usize,
) {
    if cap == 0 {
        return;
    }
    // Only the newest `cap` can survive; make room in one shift
    let count = count.min(cap);
    let excess = (particles.len() + count).saturating_sub(cap);
    particles.drain(..excess.min(particles.len()));

    for _ in 0..count {
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-7.0..-2.0)),
            life: rng.random_range(30.0..50.0),
            color,
            size: rng.random_range(3.0..7.0),
        });
    }
}

/// Advance every particle one tick and drop the expired ones in place
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_DRIFT;
        p.life -= 1.0;
        p.life > 0.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        burst(&mut particles, MAX_PARTICLES, &mut rng, Vec2::new(100.0, 50.0), 0xFFD700, 20);

        assert_eq!(particles.len(), 20);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(100.0, 50.0));
            assert!(p.vel.x >= -3.0 && p.vel.x < 3.0);
            assert!(p.vel.y >= -7.0 && p.vel.y < -2.0);
            assert!(p.life >= 30.0 && p.life < 50.0);
            assert!(p.size >= 3.0 && p.size < 7.0);
            assert_eq!(p.color, 0xFFD700);
        }
    }

    #[test]
    fn test_burst_is_seeded() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        burst(&mut a, 64, &mut Pcg32::seed_from_u64(9), Vec2::ZERO, 0, 8);
        burst(&mut b, 64, &mut Pcg32::seed_from_u64(9), Vec2::ZERO, 0, 8);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.life, pb.life);
        }
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        burst(&mut particles, 4, &mut rng, Vec2::ZERO, 1, 3);
        burst(&mut particles, 4, &mut rng, Vec2::ZERO, 2, 3);
        assert_eq!(particles.len(), 4);
        assert_eq!(particles[0].color, 1);
        assert_eq!(particles[1].color, 2);

        // A burst larger than the cap keeps only `cap` of its own
        burst(&mut particles, 4, &mut rng, Vec2::ZERO, 3, 10);
        assert_eq!(particles.len(), 4);
        assert!(particles.iter().all(|p| p.color == 3));

        let mut none = Vec::new();
        burst(&mut none, 0, &mut rng, Vec2::ZERO, 1, 5);
        assert!(none.is_empty());
    }

    #[test]
    fn test_decay_and_removal() {
        let mut particles = vec![
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(1.0, -2.0),
                life: 2.0,
                color: 0,
                size: 3.0,
            },
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                life: 1.0,
                color: 1,
                size: 3.0,
            },
        ];

        update_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        let p = &particles[0];
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.y - (-2.0 + PARTICLE_DRIFT)).abs() < 1e-6);
        assert_eq!(p.life, 1.0);

        update_particles(&mut particles);
        assert!(particles.is_empty());
    }
}
