pub mod dispatch;
pub mod resolver;

pub use dispatch::recognize;
pub use resolver::ConstraintResolver;
