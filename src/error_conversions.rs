//! Conversions between the error types of the individual layers.

use crate::forms::FormError;
use crate::services::ServiceError;

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.field_errors())
    }
}
