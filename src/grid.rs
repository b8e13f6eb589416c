//! Background "liquid grid": a lattice of dots that breathes in concentric
//! waves from the viewport center and bends away from the pointer.
//!
//! The simulation is pure state; `crate::web::background` owns the canvas,
//! pointer listeners and the animation-frame loop that drive it.

use crate::config::GridConfig;
use crate::surface::Surface;

/// Last known pointer position over the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    Present { x: f64, y: f64 },
    #[default]
    Absent,
}

/// One lattice dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    pub home_x: f64,
    pub home_y: f64,
    pub x: f64,
    pub y: f64,
    // Assigned at creation for noise-driven drift; not read by `step` yet.
    pub noise_x: f64,
    pub noise_y: f64,
}

impl GridPoint {
    fn new(x: f64, y: f64, noise_x: f64, noise_y: f64) -> Self {
        Self { home_x: x, home_y: y, x, y, noise_x, noise_y }
    }
}

/// xorshift64 source for the per-point noise offsets (not crypto secure).
#[derive(Clone, Debug)]
struct NoiseSource(u64);

impl NoiseSource {
    fn new(seed: u64) -> Self {
        // xorshift is stuck at zero forever
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    /// Uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        let mut s = self.0;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.0 = s;
        (s >> 11) as f64 / (1u64 << 53) as f64
    }
}

pub struct GridSimulation {
    config: GridConfig,
    width: f64,
    height: f64,
    phase: f64,
    points: Vec<GridPoint>,
    noise: NoiseSource,
}

impl GridSimulation {
    pub fn new(config: GridConfig, width: f64, height: f64, seed: u64) -> Self {
        let mut sim = Self {
            config,
            width: 0.0,
            height: 0.0,
            phase: 0.0,
            points: Vec::new(),
            noise: NoiseSource::new(seed),
        };
        sim.initialize(width, height);
        sim
    }

    /// Throw away every point and lay a fresh lattice over `[0,width) × [0,height)`.
    pub fn initialize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.points.clear();
        let spacing = self.config.spacing;
        if spacing <= 0.0 {
            log::warn!("grid spacing {spacing} is not positive; grid left empty");
            return;
        }
        let cols = (self.width / spacing).ceil() as usize;
        let rows = (self.height / spacing).ceil() as usize;
        self.points.reserve(cols * rows);
        for col in 0..cols {
            let x = col as f64 * spacing;
            for row in 0..rows {
                let y = row as f64 * spacing;
                let nx = self.noise.next_unit() * 1000.0;
                let ny = self.noise.next_unit() * 1000.0;
                self.points.push(GridPoint::new(x, y, nx, ny));
            }
        }
    }

    /// Viewport changed: rebuild the lattice, keep the wave phase.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.initialize(width, height);
        log::debug!("grid resized to {width}x{height}: {} points", self.points.len());
    }

    pub fn advance(&mut self) {
        self.phase += self.config.phase_step;
    }

    /// Recompute every point's rendered position for the current phase.
    ///
    /// The wave distance is taken from where the point was last drawn, so a
    /// pointer push in one frame shifts the breathing of the next.
    pub fn step(&mut self, pointer: PointerState) {
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let cfg = &self.config;
        for p in &mut self.points {
            let dist = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
            let angle = dist * cfg.wave_frequency - self.phase;
            let (dx, dy) = repel_offset(cfg, p.home_x, p.home_y, pointer);
            p.x = p.home_x + dx;
            p.y = p.home_y + dy + angle.sin() * cfg.breathing_amplitude;
        }
    }

    pub fn render(&self, surface: &dyn Surface) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        surface.set_fill_style(&self.config.dot_color);
        let size = self.config.dot_size;
        for p in &self.points {
            surface.fill_rect(p.x, p.y, size, size);
        }
    }

    /// One animation frame: advance, move every point, then draw.
    pub fn frame(&mut self, pointer: PointerState, surface: &dyn Surface) {
        self.advance();
        self.step(pointer);
        self.render(surface);
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Displacement pushing a home position away from the pointer. Magnitude
/// falls linearly from `strength * reach` at the pointer to zero at the
/// interaction radius.
fn repel_offset(cfg: &GridConfig, home_x: f64, home_y: f64, pointer: PointerState) -> (f64, f64) {
    let PointerState::Present { x, y } = pointer else {
        return (0.0, 0.0);
    };
    let dx = home_x - x;
    let dy = home_y - y;
    let distance = (dx * dx + dy * dy).sqrt();
    let radius = cfg.interaction_radius;
    if distance >= radius {
        return (0.0, 0.0);
    }
    let force = (radius - distance) / radius;
    let magnitude = force * cfg.repel_strength * cfg.repel_reach;
    if distance == 0.0 {
        // no direction to push along; lift straight up
        return (0.0, -magnitude);
    }
    (dx / distance * magnitude, dy / distance * magnitude)
}
