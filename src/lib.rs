pub mod autoplay;
pub mod chart;
pub mod config;
pub mod curve;
pub mod difficulty;
pub mod draw_order;
pub mod hit_objects;
pub mod import;
pub mod math;
pub mod osu_input;
pub mod palette;
pub mod processor;
pub mod rgb;
pub mod runner;
pub mod scheduler;
pub mod score;
pub mod timer;
pub mod timing;
