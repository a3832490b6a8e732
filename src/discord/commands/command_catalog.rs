// Discord commands module.
// Each feature gets its own command file.

pub mod moderate;

pub mod posts;

// Bot presence management
pub mod presence;

pub mod words;
