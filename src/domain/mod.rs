// Domain layer - Editor state and its rules

pub mod chunks;
pub mod display;
pub mod errors;
pub mod model;
pub mod rules;
pub mod selection;
pub mod timeline;
