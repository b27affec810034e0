// Command handlers module
pub mod cleanup;
pub mod config;
pub mod probe;
pub mod run;

// Re-exports for cleaner imports
pub use cleanup::execute as cleanup;
pub use probe::execute as probe;
pub use run::execute as run;
