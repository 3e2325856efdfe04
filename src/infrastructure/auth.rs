pub mod credentials;
pub mod gate;
