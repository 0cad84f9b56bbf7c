mod factory;
mod types;

pub use factory::{run_action, run_redirect_action};
pub use types::{ActionResult, FormData, Outcome};
