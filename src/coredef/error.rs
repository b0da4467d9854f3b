use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq)]
pub enum StatusCode {
    /// Carries the offending index
    IndexOutOfRange(usize),
    EmptyContainer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub code: StatusCode,
    pub err: String,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl Error for Status {}

impl Status {
    pub fn new(code: StatusCode, msg: &str) -> Self {
        let err = format!("{:?}: [{}]", code, msg);
        Status { code, err }
    }
}

/// Global result type for the crate
pub type Result<T> = std::result::Result<T, Status>;

pub fn err<T>(code: StatusCode, msg: &str) -> Result<T> {
    Err(Status::new(code, msg))
}
