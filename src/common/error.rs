use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,
    Unauthorized,

    AccountsNotFound,
    AccountsDisplayNameMissing,
    AccountsDepartmentImmutable,

    MessagesNotFound,
    MessagesInvalidLength,
    MessagesNotOwned,

    StylesNotEligible,

    ProvisioningUnauthorized,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::Unauthorized => "unauthorized",

            AppError::AccountsNotFound => "accounts.not_found",
            AppError::AccountsDisplayNameMissing => "accounts.display_name_missing",
            AppError::AccountsDepartmentImmutable => "accounts.department_immutable",

            AppError::MessagesNotFound => "messages.not_found",
            AppError::MessagesInvalidLength => "messages.invalid_length",
            AppError::MessagesNotOwned => "messages.not_owned",

            AppError::StylesNotEligible => "styles.not_eligible",

            AppError::ProvisioningUnauthorized => "provisioning.unauthorized",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::Unauthorized => "You are not authorized to perform this action.",

            AppError::AccountsNotFound => "This account does not exist.",
            AppError::AccountsDisplayNameMissing => {
                "Set a display name on your profile before sending messages."
            }
            AppError::AccountsDepartmentImmutable => {
                "Your department is assigned at provisioning and cannot be changed."
            }

            AppError::MessagesNotFound => "The message could not be found.",
            AppError::MessagesInvalidLength => {
                "Your message was empty or too long. It has not been saved."
            }
            AppError::MessagesNotOwned => "Only the original sender can modify this message.",

            AppError::StylesNotEligible => {
                "This card design is not available to your department or role."
            }

            AppError::ProvisioningUnauthorized => {
                "Only executives may provision accounts."
            }
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::MessagesInvalidLength | AppError::AccountsDepartmentImmutable => {
                StatusCode::BAD_REQUEST
            }

            AppError::Unauthorized => StatusCode::UNAUTHORIZED,

            AppError::AccountsDisplayNameMissing
            | AppError::MessagesNotOwned
            | AppError::StylesNotEligible
            | AppError::ProvisioningUnauthorized => StatusCode::FORBIDDEN,

            AppError::AccountsNotFound | AppError::MessagesNotFound => StatusCode::NOT_FOUND,

            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
