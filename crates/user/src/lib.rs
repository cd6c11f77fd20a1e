mod api;
mod input;
mod profile;
mod session;
mod token;

pub use api::*;
pub use input::*;
pub use profile::*;
pub use session::{Phase, Session, SessionManager};
pub use token::*;
