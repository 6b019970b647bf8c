// src/services/auth_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{LoginResponse, UserPublic, UserRole},
};

// Autenticação do painel. A senha é verificada com bcrypt, mas o token
// devolvido é um mock: nenhum endpoint valida sessão.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(pool: SqlitePool, user_repo: UserRepository) -> Self {
        Self { pool, user_repo }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = format!("mock-jwt-token-{}", user.id);
        Ok(LoginResponse {
            success: true,
            user: UserPublic {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
                phone: user.phone,
                active: user.active,
                created_at: user.created_at,
            },
            token,
        })
    }

    /// Garante o usuário administrador padrão na primeira subida.
    pub async fn seed_admin(&self) -> Result<(), AppError> {
        if self
            .user_repo
            .find_by_email(&self.pool, "admin@bunx.io")
            .await?
            .is_some()
        {
            return Ok(());
        }

        let hashed = bcrypt::hash("admin123", bcrypt::DEFAULT_COST)?;
        self.user_repo
            .create(
                &self.pool,
                "admin-1",
                "Administrador",
                "admin@bunx.io",
                &hashed,
                UserRole::Admin,
                Some("(11) 99999-9999"),
                true,
            )
            .await?;
        tracing::info!("Usuário administrador padrão criado");
        Ok(())
    }
}
