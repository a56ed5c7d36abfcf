use thiserror::Error;

use crate::forms::FieldErrors;

pub mod client;
pub mod main;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("client not found")]
    NotFound,

    #[error("form validation failed")]
    Form(FieldErrors),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
