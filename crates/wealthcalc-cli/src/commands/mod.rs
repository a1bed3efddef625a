pub mod advisor;
pub mod comparison;
pub mod margin;
pub mod projection;
