pub mod deliver_job;
pub mod render_message;

pub use deliver_job::DeliverJob;
pub use render_message::{Dialect, MessageRenderer};
