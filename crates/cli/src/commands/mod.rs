mod check;
mod config;
mod locate;
mod patch;

pub use check::CheckArgs;
pub use check::handle_check;
pub use config::ConfigArgs;
pub use config::handle_config;
pub use locate::LocateArgs;
pub use locate::handle_locate;
pub use patch::PatchArgs;
pub use patch::handle_patch;
