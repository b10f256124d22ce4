pub mod actions;
pub mod helpers;
mod create;
mod update;
mod delete;

pub use create::*;
pub use update::*;
pub use delete::*;
