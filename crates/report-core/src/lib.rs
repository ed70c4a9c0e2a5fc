pub mod classify;
pub mod error;
pub mod geom;
pub mod memory;
pub mod model;
pub mod naming;
pub mod options;
pub mod report;
pub mod scene;
pub mod units;
