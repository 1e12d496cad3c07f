//! Chart layer: backend-independent chart descriptions, the three
//! comparison charts built from the measurement table, and PNG output.

pub mod figures;
pub mod model;
pub mod render;
