pub mod app;

pub use app::{GqDeps, GqUseCase};
