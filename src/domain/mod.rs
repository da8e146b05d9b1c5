// Domain layer: roster and grouping models plus the ports the pipeline is wired through.

pub mod model;
pub mod ports;
