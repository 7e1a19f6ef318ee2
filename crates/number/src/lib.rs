pub mod units;

pub use units::Ether;
