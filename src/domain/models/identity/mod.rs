pub mod verified_identity;

pub use verified_identity::VerifiedIdentity;
