//! Auth-domain identifiers, scope sets, token secrets, and login-name helpers.

pub mod id;
pub mod scope;
pub mod secret;
pub mod username;

pub use id::*;
pub use scope::*;
pub use secret::*;
pub use username::*;
