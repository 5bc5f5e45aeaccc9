pub mod mindicador;

pub use mindicador::MindicadorProvider;
