pub mod calculators;
pub mod conditions;
pub mod engine;
pub mod pacing;
pub mod runner;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;
