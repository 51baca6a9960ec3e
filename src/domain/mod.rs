// Domain layer: the place model and the ports the session talks through.

pub mod model;
pub mod ports;
