pub mod common;
pub mod locker;
pub mod processing;

pub use locker::{Locker, LockerEntry};
pub use processing::{decode_message, encode_message, StegoError};
