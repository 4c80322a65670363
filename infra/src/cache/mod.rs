//! Cache module for OTP storage
//!
//! Records live only in process memory and are lost on restart.

pub mod memory_store;


pub use memory_store::InMemoryOtpStore;
