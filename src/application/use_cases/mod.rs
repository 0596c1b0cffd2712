mod generate_tasks;

pub use generate_tasks::*;
