pub mod table;
pub mod errors;
pub mod time;

pub use table::Table;
pub use errors::user_message;
pub use time::{format_age, format_elapsed_secs};
