pub mod emotions;
pub mod health;
pub mod mood_logs;
