//! Scale Review - building scale estimation for mixed-use sites

pub mod core;
pub mod lookup;
pub mod scale;
pub mod tables;
