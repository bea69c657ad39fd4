pub mod density;
pub mod pressure;
pub mod viscosity;

pub use density::{
    compute_density, density_to_pressure, near_density_to_pressure, update_densities, Densities,
};
pub use pressure::compute_pressure_force;
pub use viscosity::compute_viscosity_force;
