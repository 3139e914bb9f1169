pub mod session_code;

pub use session_code::{is_valid_session_code, normalize_session_code, random_session_code};
