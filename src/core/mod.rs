pub mod guard;
pub mod parser;
pub mod token;
pub mod validator;

pub use parser::{parse_pattern, RoutePattern, Segment};
pub use validator::{RecordValidator, ValidationError};
