//! CPU particle fountain.
//!
//! Particles launch from the origin with an upward velocity, fall under
//! gravity, fade out over two seconds and respawn. The simulation is plain
//! data so it can be stepped and inspected without a GPU.

mod rng;

use bytemuck::{Pod, Zeroable};
use cgmath::{Vector3, Zero};

pub use rng::Pcg32;

pub const MAX_PARTICLES: usize = 1000;

/// Downward acceleration, units per second squared.
pub const GRAVITY: f32 = 9.8;

/// Life lost per second; a particle lives `1.0 / DECAY_RATE` seconds.
pub const DECAY_RATE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub color: [f32; 3],
    /// Remaining life in `(0, 1]`.
    pub life: f32,
    pub size: f32,
}

/// Per-instance GPU data for one particle billboard.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub life: f32,
}

impl ParticleInstance {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            1 => Float32x3, // position
            2 => Float32,   // size
            3 => Float32x3, // color
            4 => Float32    // life
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleSystem {
    /// `count` freshly spawned particles drawn from `seed`.
    pub fn new(count: usize, seed: u64) -> Self {
        Self::with_rng(count, Pcg32::new(seed))
    }

    pub fn with_rng(count: usize, mut rng: Pcg32) -> Self {
        let particles = (0..count).map(|_| spawn(&mut rng)).collect();
        Self { particles, rng }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advances every particle by `dt` seconds.
    ///
    /// A particle whose life runs out is respawned in place and does not move
    /// this step.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.life -= dt * DECAY_RATE;

            if p.life <= 0.0 {
                *p = spawn(&mut self.rng);
            } else {
                p.position += p.velocity * dt;
                p.velocity.y -= GRAVITY * dt;
            }
        }
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        let mut out = Vec::with_capacity(self.particles.len());
        self.write_instances(&mut out);
        out
    }

    /// Writes GPU instance data for every particle into `out`, reusing its
    /// allocation.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| ParticleInstance {
            position: p.position.into(),
            size: p.size,
            color: p.color,
            life: p.life,
        }));
    }
}

fn spawn(rng: &mut Pcg32) -> Particle {
    let velocity = Vector3::new(
        rng.signed() * 0.5,
        rng.signed() * 0.5 + 1.0,
        rng.signed() * 0.5,
    );
    let color = [rng.unit(), rng.unit(), rng.unit()];
    // 0.02 ± 0.03 can go negative; a negative billboard would render inverted.
    let size = (0.02 + rng.signed() * 0.03).max(0.0);

    Particle {
        position: Vector3::zero(),
        velocity,
        color,
        life: 1.0,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── spawning ──────────────────────────────────────────────────────────

    #[test]
    fn spawns_requested_count_at_origin() {
        let sys = ParticleSystem::new(MAX_PARTICLES, 1);
        assert_eq!(sys.len(), 1000);
        for p in sys.particles() {
            assert_eq!(p.position, Vector3::zero());
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn spawn_velocity_and_color_ranges() {
        let sys = ParticleSystem::new(500, 9);
        for p in sys.particles() {
            assert!((-0.5..=0.5).contains(&p.velocity.x));
            assert!((0.5..=1.5).contains(&p.velocity.y));
            assert!((-0.5..=0.5).contains(&p.velocity.z));
            assert!(p.color.iter().all(|c| (0.0..1.0).contains(c)));
            assert!((0.0..=0.05).contains(&p.size));
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let mut a = ParticleSystem::new(50, 77);
        let mut b = ParticleSystem::new(50, 77);
        for _ in 0..30 {
            a.update(0.016);
            b.update(0.016);
        }
        assert_eq!(a.particles(), b.particles());
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_integrates_position_then_gravity() {
        let mut sys = ParticleSystem::new(1, 3);
        let before = sys.particles()[0].clone();
        sys.update(0.1);
        let after = &sys.particles()[0];

        assert!(approx(after.life, 0.95));
        assert!(approx(after.position.x, before.velocity.x * 0.1));
        assert!(approx(after.position.y, before.velocity.y * 0.1));
        assert!(approx(after.velocity.y, before.velocity.y - 0.98));
        assert!(approx(after.velocity.x, before.velocity.x));
    }

    #[test]
    fn particle_respawns_after_two_seconds() {
        let mut sys = ParticleSystem::new(1, 5);
        // 19 steps of 0.1s: life 0.05, still alive and airborne
        for _ in 0..19 {
            sys.update(0.1);
        }
        assert!(sys.particles()[0].life > 0.0);
        assert_ne!(sys.particles()[0].position, Vector3::zero());

        sys.update(0.2);
        let p = &sys.particles()[0];
        assert_eq!(p.life, 1.0);
        assert_eq!(p.position, Vector3::zero());
    }

    #[test]
    fn life_never_exceeds_one() {
        let mut sys = ParticleSystem::new(200, 11);
        for _ in 0..100 {
            sys.update(0.033);
            assert!(sys.particles().iter().all(|p| p.life > 0.0 && p.life <= 1.0));
        }
    }

    // ── gpu data ──────────────────────────────────────────────────────────

    #[test]
    fn instances_mirror_particles() {
        let sys = ParticleSystem::new(10, 2);
        let mut out = Vec::new();
        sys.write_instances(&mut out);
        assert_eq!(out.len(), 10);
        for (inst, p) in out.iter().zip(sys.particles()) {
            assert_eq!(inst.color, p.color);
            assert_eq!(inst.size, p.size);
        }
    }

    #[test]
    fn write_instances_replaces_previous_contents() {
        let sys = ParticleSystem::new(4, 5);
        let mut out = ParticleSystem::new(9, 6).instances();
        sys.write_instances(&mut out);
        assert_eq!(out, sys.instances());
    }

    #[test]
    fn instance_layout_stride() {
        assert_eq!(ParticleInstance::layout().array_stride, 32);
    }
}
