// The core module contains all business logic.
// Each feature gets its own submodule. No Discord types in here.

#[path = "warns/warn_service.rs"]
pub mod warns;

#[path = "filter/profanity_filter.rs"]
pub mod filter;

#[path = "commands/command_parser.rs"]
pub mod commands;

#[path = "jokes/joke_service.rs"]
pub mod jokes;

#[path = "ai/mod.rs"]
pub mod ai;
