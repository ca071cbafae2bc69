pub mod email;
pub mod phone;
pub mod task;
pub mod user;

pub use email::Email;
pub use phone::Phone;
pub use task::{Task, TaskInput};
pub use user::{User, UserBuilder, UserResponse, UserUpdate};
