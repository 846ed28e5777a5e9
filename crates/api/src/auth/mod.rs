//! Bearer-token verification for the session provider boundary.

pub mod jwt;
