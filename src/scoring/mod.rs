pub mod equilibrium;
pub mod features;
pub mod rank;
pub mod scenario;
pub mod validation;

pub use equilibrium::score;
pub use features::engineer;
pub use rank::rank_to_unit;
pub use scenario::{run_scenario, ScenarioParams};
pub use validation::validate_params;
