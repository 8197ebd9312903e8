pub mod machine;
pub mod state;
pub mod tracer;
pub mod transition;


pub use machine::{execute, Machine, Run};
pub use state::{Pending, Stack, State};
pub use tracer::{History, Silent, Snapshot, Tracer};
