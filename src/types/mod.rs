mod auth;
mod forms;
mod queries;

pub use auth::*;
pub use forms::*;
pub use queries::*;
