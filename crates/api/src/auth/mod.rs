//! The access gate: credential verification, session tokens, and the live
//! session set that makes logout an actual revocation.

pub mod password;
pub mod sessions;
pub mod token;
