//! Alias synthesis from command frequencies.

mod alias;
mod files;
mod frequency;
mod naming;

pub use alias::{Alias, ExistingAliases};
pub use files::{AliasFileError, append_aliases, ensure_sourced, read_existing, source_line};
pub use frequency::CommandCounts;
pub use naming::{AliasPlan, abbreviate, plan_aliases, unique_alias_name};
