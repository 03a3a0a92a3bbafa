pub mod jackknife;
pub mod sim_wq;
pub mod sums;
pub mod sums_wq;
