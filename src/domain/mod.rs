// Domain layer: core models and ports (interfaces). No dependencies on core/ or adapters/.

pub mod model;
pub mod ports;
