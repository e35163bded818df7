//! Storage capability traits.
//!
//! Student and user operations are separate capabilities so services depend
//! only on what they use.

pub mod student;
pub mod user;

pub use student::StudentRepository;
pub use user::UserRepository;
