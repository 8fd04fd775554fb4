// Domain layer: tile model and the two seams, the engine-facing provider and the injected source.

pub mod model;
pub mod ports;
