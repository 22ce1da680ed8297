pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::user;
pub use outbound::repositories;

/// Application identifier written to the `iss` and `aud` claims of every token.
pub const TOKEN_ISSUER: &str = "thatSong";
