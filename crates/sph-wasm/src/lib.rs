mod palette;

use glam::Vec2;
use sph_core::config::Bounds;
use sph_core::quality::AdaptiveQuality;
use sph_core::Solver;
use wasm_bindgen::prelude::*;

/// Render-ready particle: 32 bytes, laid out for a JS Float32Array view.
#[repr(C)]
#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
struct RenderParticle {
    position: [f32; 2], //  8 bytes
    velocity: [f32; 2], //  8 bytes
    color: [f32; 4],    // 16 bytes
}

#[wasm_bindgen]
pub struct FluidWorld {
    solver: Solver,
    quality: AdaptiveQuality,
    render_buffer: Vec<RenderParticle>,
}

#[wasm_bindgen]
impl FluidWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize, width: f32, height: f32) -> FluidWorld {
        Self::from_solver(Solver::new(particle_count, Bounds::new(width, height)))
    }

    /// Same as the constructor, with a reproducible population.
    pub fn with_seed(particle_count: usize, width: f32, height: f32, seed: u32) -> FluidWorld {
        Self::from_solver(Solver::with_seed(
            particle_count,
            Bounds::new(width, height),
            seed as u64,
        ))
    }

    /// Advance one frame of `dt` seconds. Returns the time spent in ms.
    #[wasm_bindgen]
    pub fn run_frame(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.run_frame(dt);
        self.write_render_output();
        let elapsed = (js_sys::Date::now() - start) as f32;

        if self.quality.enabled {
            self.quality.update(elapsed);
            let substeps = self.quality.substeps();
            if substeps != self.solver.config().substeps_per_frame {
                self.solver.substeps_per_frame(Some(substeps));
            }
        }
        elapsed
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn width(&self) -> f32 {
        self.solver.bounds().width
    }

    #[wasm_bindgen]
    pub fn height(&self) -> f32 {
        self.solver.bounds().height
    }

    // ---------- configuration (get-or-set) ----------

    #[wasm_bindgen]
    pub fn gravity(&mut self, value: Option<f32>) -> f32 {
        self.solver.gravity(value)
    }

    #[wasm_bindgen]
    pub fn collision_damping(&mut self, value: Option<f32>) -> f32 {
        self.solver.collision_damping(value)
    }

    #[wasm_bindgen]
    pub fn smoothing_radius(&mut self, value: Option<f32>) -> f32 {
        if let Some(v) = value {
            if v.is_nan() || v <= 0.0 {
                web_sys::console::warn_1(&format!("smoothing radius {} is not positive", v).into());
            }
        }
        self.solver.smoothing_radius(value)
    }

    #[wasm_bindgen]
    pub fn target_density(&mut self, value: Option<f32>) -> f32 {
        self.solver.target_density(value)
    }

    #[wasm_bindgen]
    pub fn pressure_multiplier(&mut self, value: Option<f32>) -> f32 {
        self.solver.pressure_multiplier(value)
    }

    #[wasm_bindgen]
    pub fn near_pressure_multiplier(&mut self, value: Option<f32>) -> f32 {
        self.solver.near_pressure_multiplier(value)
    }

    #[wasm_bindgen]
    pub fn viscosity(&mut self, value: Option<f32>) -> f32 {
        self.solver.viscosity(value)
    }

    #[wasm_bindgen]
    pub fn particle_radius(&mut self, value: Option<f32>) -> f32 {
        self.solver.particle_radius(value)
    }

    /// Setting this directly also becomes the adaptive controller's ceiling.
    #[wasm_bindgen]
    pub fn substeps_per_frame(&mut self, value: Option<u32>) -> u32 {
        if let Some(v) = value {
            self.quality.max_substeps = v.max(1);
            self.quality.reset();
        }
        self.solver.substeps_per_frame(value)
    }

    #[wasm_bindgen]
    pub fn set_adaptive_quality(&mut self, enabled: bool, budget_ms: f32) {
        self.quality.enabled = enabled;
        self.quality.budget_ms = budget_ms;
        self.quality.reset();
        if !enabled {
            self.solver.substeps_per_frame(Some(self.quality.max_substeps));
        }
    }

    // ---------- interaction ----------

    /// Pointer interaction; `strength` 0 disables it.
    #[wasm_bindgen]
    pub fn set_interaction_force(&mut self, strength: f32, x: f32, y: f32) {
        self.solver.set_interaction_force(strength, Vec2::new(x, y));
    }

    /// `[strength, x, y]` of the current interaction.
    #[wasm_bindgen]
    pub fn interaction_force(&mut self) -> Vec<f32> {
        let force = self.solver.interaction_force(None);
        vec![force.strength, force.center.x, force.center.y]
    }

    // ---------- output ----------

    /// Flat `[x0, y0, x1, y1, ...]` copy of the positions.
    #[wasm_bindgen]
    pub fn positions(&self) -> Vec<f32> {
        self.solver.positions().iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Flat `[vx0, vy0, ...]` copy of the velocities.
    #[wasm_bindgen]
    pub fn velocities(&self) -> Vec<f32> {
        self.solver.velocities().iter().flat_map(|v| [v.x, v.y]).collect()
    }

    #[wasm_bindgen]
    pub fn render_buffer_ptr(&self) -> *const f32 {
        self.render_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn render_buffer_byte_length(&self) -> usize {
        self.render_buffer.len() * std::mem::size_of::<RenderParticle>()
    }

    /// Copy of the render buffer as 8 floats per particle.
    #[wasm_bindgen]
    pub fn render_data(&self) -> Vec<f32> {
        bytemuck::cast_slice::<RenderParticle, f32>(&self.render_buffer).to_vec()
    }

    /// Forget the population; the next frame spawns a fresh one from `seed`.
    #[wasm_bindgen]
    pub fn reset(&mut self, seed: u32) {
        self.solver.reset(seed as u64);
        self.render_buffer.clear();
    }
}

impl FluidWorld {
    fn from_solver(solver: Solver) -> FluidWorld {
        let bounds = solver.bounds();
        web_sys::console::log_1(
            &format!(
                "WASM FluidWorld created: {} particles, {}x{}",
                solver.particle_count(),
                bounds.width,
                bounds.height
            )
            .into(),
        );
        if solver.particle_count() == 0 {
            web_sys::console::warn_1(&"FluidWorld created with no particles".into());
        }

        let quality = AdaptiveQuality::new(solver.config().substeps_per_frame);
        FluidWorld {
            solver,
            quality,
            render_buffer: Vec::new(),
        }
    }

    fn write_render_output(&mut self) {
        let positions = self.solver.positions();
        let velocities = self.solver.velocities();
        self.render_buffer.resize(positions.len(), RenderParticle::default());
        let particles = positions.iter().zip(velocities);
        for (out, (pos, vel)) in self.render_buffer.iter_mut().zip(particles) {
            *out = RenderParticle {
                position: [pos.x, pos.y],
                velocity: [vel.x, vel.y],
                color: palette::speed_color(vel.length()),
            };
        }
    }
}
