// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "warns/json_store.rs"]
pub mod warns;

#[path = "ai/mod.rs"]
pub mod ai;
