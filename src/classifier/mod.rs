pub mod labels;
pub mod model;
pub mod predict;


pub use labels::*;
pub use model::*;
pub use predict::*;
