//! Integer status codes returned by mutating service calls.

use serde::{Deserialize, Serialize};

/// Coarse outcome of create/delete: positive on success, negative on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum StatusCode {
    Success,
    Failure,
}

impl StatusCode {
    pub const SUCCESS_CODE: i32 = 100;
    pub const FAILURE_CODE: i32 = -100;

    pub fn code(self) -> i32 {
        match self {
            StatusCode::Success => Self::SUCCESS_CODE,
            StatusCode::Failure => Self::FAILURE_CODE,
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for StatusCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            StatusCode::SUCCESS_CODE => Ok(StatusCode::Success),
            StatusCode::FAILURE_CODE => Ok(StatusCode::Failure),
            other => Err(format!("unknown status code: {}", other)),
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
