use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante carrega a mensagem que o frontend espera receber.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    MissingFields(String),

    #[error("E-mail já cadastrado")]
    EmailAlreadyExists,

    #[error("SKU já cadastrado")]
    SkuAlreadyExists,

    #[error("Configuração já existe")]
    SettingAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Profissional não encontrado")]
    ProfessionalNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Agendamento não encontrado")]
    AppointmentNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Transação não encontrada")]
    TransactionNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Estoque insuficiente")]
    InsufficientStock,

    #[error("A venda deve ter pelo menos um item")]
    EmptySaleItems,

    #[error("A venda deve ter pelo menos uma forma de pagamento")]
    EmptySalePayments,

    #[error("Tipo de relatório inválido")]
    InvalidReportType,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingFields(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::BAD_REQUEST, "Email já cadastrado"),
            AppError::SkuAlreadyExists => (StatusCode::BAD_REQUEST, "SKU já cadastrado"),
            AppError::SettingAlreadyExists => (
                StatusCode::CONFLICT,
                "Configuração já existe. Use PUT para atualizar.",
            ),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Credenciais inválidas"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado"),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado"),
            AppError::ProfessionalNotFound => {
                (StatusCode::NOT_FOUND, "Profissional não encontrado")
            }
            AppError::ServiceNotFound => (StatusCode::NOT_FOUND, "Serviço não encontrado"),
            AppError::AppointmentNotFound => (StatusCode::NOT_FOUND, "Agendamento não encontrado"),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado"),
            AppError::TransactionNotFound => (StatusCode::NOT_FOUND, "Transação não encontrada"),
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, "Venda não encontrada"),
            AppError::InsufficientStock => (StatusCode::BAD_REQUEST, "Estoque insuficiente"),
            AppError::EmptySaleItems => {
                (StatusCode::BAD_REQUEST, "A venda deve ter pelo menos um item")
            }
            AppError::EmptySalePayments => (
                StatusCode::BAD_REQUEST,
                "A venda deve ter pelo menos uma forma de pagamento",
            ),
            AppError::InvalidReportType => (StatusCode::BAD_REQUEST, "Tipo de relatório inválido"),

            // Todos os outros erros (DatabaseError, BcryptError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos dá.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(status_of(AppError::ProductNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::ClientNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::SaleNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn business_rule_failures_map_to_400() {
        assert_eq!(
            status_of(AppError::InsufficientStock),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::EmptySaleItems), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::EmptySalePayments),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::MissingFields("Campos obrigatórios".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn conflicts_and_credentials_keep_their_statuses() {
        assert_eq!(
            status_of(AppError::EmailAlreadyExists),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::SettingAlreadyExists),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
    }
}
