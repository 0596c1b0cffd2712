mod generation_request;
mod generation_result;
mod task;

pub use generation_request::*;
pub use generation_result::*;
pub use task::*;
