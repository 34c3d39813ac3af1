//! Read-only name tables consulted while duplicating records.

pub mod nicknames;
pub mod states;

pub use nicknames::NicknameLookup;
pub use states::StateNameLookup;
