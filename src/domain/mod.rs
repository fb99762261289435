// Domain layer: models and ports (capability interfaces). No adapters here.

pub mod model;
pub mod ports;
