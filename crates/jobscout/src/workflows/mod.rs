pub mod applications;
pub mod search;
