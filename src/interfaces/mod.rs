pub mod capabilities;
pub mod cli;
