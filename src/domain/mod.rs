// Domain layer: value types and ports (interfaces) for the slot mapping core.

pub mod model;
pub mod ports;
