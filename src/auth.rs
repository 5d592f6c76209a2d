//! Auth-domain models: requested scopes and issued access tokens.

pub mod scope;
pub mod token;

pub use scope::*;
pub use token::*;
