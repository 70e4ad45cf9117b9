pub mod base;
pub mod sid;

pub use base::SedBase;
pub use sid::{SidError, is_valid_sid, parse_sid};
