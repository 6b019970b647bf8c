// src/services/stock_service.rs

use sqlx::{Acquire, Executor, Sqlite, SqliteConnection};

use crate::{
    common::{error::AppError, ids::generate_id},
    db::{ProductRepository, StockRepository},
    models::inventory::{MovementType, StockChange, StockMovement, StockSummary},
};

// O livro-razão de estoque. Toda escrita em products.current_stock passa
// por aqui, acompanhada do registro de movimentação correspondente: o
// saldo é sempre derivável do histórico.
#[derive(Clone)]
pub struct StockService {
    product_repo: ProductRepository,
    stock_repo: StockRepository,
}

impl StockService {
    pub fn new(product_repo: ProductRepository, stock_repo: StockRepository) -> Self {
        Self {
            product_repo,
            stock_repo,
        }
    }

    /// Registra uma movimentação manual (tela de estoque).
    ///
    /// Valida antes de escrever: produto existente e, para saídas, saldo
    /// suficiente. Depois são exatamente duas escritas (movimentação +
    /// novo saldo), dentro de uma transação.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product_id: &str,
        kind: MovementType,
        quantity: f64,
        reason: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<(StockMovement, StockSummary), AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let change = StockChange::new(kind, quantity);
        if let StockChange::Out(qty) = change {
            if product.current_stock < qty {
                return Err(AppError::InsufficientStock);
            }
        }

        let movement_id = generate_id("mov");
        self.stock_repo
            .insert_movement(&mut *tx, &movement_id, product_id, kind, quantity, reason, user_id)
            .await?;

        let new_stock = change.apply(product.current_stock);
        self.product_repo
            .set_current_stock(&mut *tx, product_id, new_stock)
            .await?;

        let movement = self
            .stock_repo
            .find_by_id(&mut *tx, &movement_id)
            .await?
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("movimentação recém-criada não encontrada")))?;

        tx.commit().await?;

        tracing::info!(
            produto = %product.name,
            tipo = ?kind,
            quantidade = quantity,
            saldo = new_stock,
            "Movimentação de estoque registrada"
        );

        Ok((
            movement,
            StockSummary {
                id: product.id,
                name: product.name,
                current_stock: new_stock,
                min_stock: product.min_stock,
            },
        ))
    }

    /// Histórico de movimentações, mais recentes primeiro.
    pub async fn list_movements<'e, E>(
        &self,
        executor: E,
        product_id: Option<&str>,
    ) -> Result<Vec<StockMovement>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.stock_repo.list(executor, product_id).await
    }

    /// Baixa de estoque do checkout. Difere da movimentação manual em dois
    /// pontos herdados do fluxo de venda: produto inexistente é ignorado
    /// (a venda segue sem os efeitos de estoque daquele item) e não há
    /// verificação de saldo suficiente. O registro OUT é gravado com a
    /// razão "Venda #<id>", mantendo a trilha de auditoria.
    pub async fn register_sale_output(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: f64,
        reason: &str,
    ) -> Result<bool, AppError> {
        let Some(product) = self.product_repo.find_by_id(&mut *conn, product_id).await? else {
            tracing::warn!(
                produto = %product_id,
                "Item de venda referencia produto inexistente; baixa de estoque ignorada"
            );
            return Ok(false);
        };

        let new_stock = product.current_stock - quantity;
        self.product_repo
            .set_current_stock(&mut *conn, product_id, new_stock)
            .await?;

        let movement_id = generate_id("mov");
        self.stock_repo
            .insert_movement(
                &mut *conn,
                &movement_id,
                product_id,
                MovementType::Out,
                quantity,
                Some(reason),
                None,
            )
            .await?;

        Ok(true)
    }
}
