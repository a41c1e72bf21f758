pub mod batch_size;
pub mod env;
pub mod error;
pub mod validated;
pub mod validator;
