//! Command implementations for the relnotes CLI

mod link;
mod render;

pub use link::execute as link_dependencies;
pub use render::execute as render;
