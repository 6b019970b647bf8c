// src/services/sale_service.rs

use chrono::{NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    common::{error::AppError, ids::generate_id},
    db::{ClientRepository, SaleRepository, TransactionRepository},
    models::{
        finance::{TransactionStatus, TransactionType},
        sales::{CreateSalePayload, Sale, SaleItemKind, SaleStatus, SaleWithChildren},
    },
    services::StockService,
};

// O motor de checkout do PDV. Transforma o carrinho (itens + pagamentos)
// em uma venda persistida, baixa o estoque dos produtos, lança a receita
// no financeiro e atualiza as estatísticas do cliente: nesta ordem fixa.
#[derive(Clone)]
pub struct SaleService {
    pool: SqlitePool,
    sale_repo: SaleRepository,
    transaction_repo: TransactionRepository,
    client_repo: ClientRepository,
    stock_service: StockService,
    // Com false (padrão), cada passo é um statement independente, como o
    // fluxo original; com true, a sequência inteira roda numa transação e
    // checkouts concorrentes sobre o mesmo produto serializam.
    atomic_checkout: bool,
}

impl SaleService {
    pub fn new(
        pool: SqlitePool,
        sale_repo: SaleRepository,
        transaction_repo: TransactionRepository,
        client_repo: ClientRepository,
        stock_service: StockService,
        atomic_checkout: bool,
    ) -> Self {
        Self {
            pool,
            sale_repo,
            transaction_repo,
            client_repo,
            stock_service,
            atomic_checkout,
        }
    }

    /// Conclui uma venda. Validações acontecem antes de qualquer escrita;
    /// a partir daí os passos seguem a ordem contratual do checkout.
    pub async fn finalize_sale(
        &self,
        input: CreateSalePayload,
    ) -> Result<SaleWithChildren, AppError> {
        if input.items.is_empty() {
            return Err(AppError::EmptySaleItems);
        }
        if input.payments.is_empty() {
            return Err(AppError::EmptySalePayments);
        }

        let sale_id = if self.atomic_checkout {
            let mut tx = self.pool.begin().await?;
            let sale_id = self.run_checkout(&mut tx, &input).await?;
            tx.commit().await?;
            sale_id
        } else {
            // Paridade com o fluxo original: statements independentes,
            // sem rollback dos passos anteriores em caso de falha.
            let mut conn = self.pool.acquire().await?;
            self.run_checkout(&mut conn, &input).await?
        };

        tracing::info!(venda = %sale_id, total = input.total, "Venda concluída");

        self.get_sale(&sale_id).await
    }

    // Os passos do checkout, na ordem que é o contrato semântico do fluxo:
    // venda, itens (com baixa de estoque por item), pagamentos, lançamento
    // financeiro e estatísticas do cliente.
    async fn run_checkout(
        &self,
        conn: &mut SqliteConnection,
        input: &CreateSalePayload,
    ) -> Result<String, AppError> {
        let sale_id = generate_id("sal");
        let today = Utc::now().date_naive();

        // 1. Cabeçalho da venda
        self.sale_repo
            .insert_sale(
                &mut *conn,
                &sale_id,
                input.client_id.as_deref(),
                input.professional_id.as_deref(),
                input.subtotal,
                input.discount,
                input.total,
                SaleStatus::Completed,
                input.notes.as_deref(),
            )
            .await?;

        // 2. Itens, com snapshot de nome/preço e baixa de estoque para
        //    itens do tipo PRODUCT
        for item in &input.items {
            let item_id = generate_id("itm");
            self.sale_repo
                .insert_item(
                    &mut *conn,
                    &item_id,
                    &sale_id,
                    item.kind,
                    &item.item_id,
                    &item.name,
                    item.quantity,
                    item.price,
                    item.discount,
                    item.total,
                )
                .await?;

            if item.kind == SaleItemKind::Product {
                let reason = format!("Venda #{}", sale_id);
                self.stock_service
                    .register_sale_output(&mut *conn, &item.item_id, item.quantity, &reason)
                    .await?;
            }
        }

        // 3. Pagamentos (pode haver mais de um: pagamento dividido)
        for payment in &input.payments {
            let payment_id = generate_id("pay");
            self.sale_repo
                .insert_payment(&mut *conn, &payment_id, &sale_id, payment.method, payment.amount)
                .await?;
        }

        // 4. Lançamento financeiro da receita
        let transaction_id = generate_id("txn");
        let first_method = input.payments[0].method;
        self.transaction_repo
            .create(
                &mut *conn,
                &transaction_id,
                TransactionType::Income,
                "SALE",
                &format!("Venda #{}", sale_id),
                input.total,
                TransactionStatus::Paid,
                Some(first_method.as_str()),
                today,
                Some(today),
                input.client_id.as_deref(),
                input.professional_id.as_deref(),
                None,
            )
            .await?;

        // 5. Estatísticas de fidelidade do cliente
        if let Some(client_id) = input.client_id.as_deref() {
            self.update_client_stats(&mut *conn, client_id, input.total, today)
                .await?;
        }

        Ok(sale_id)
    }

    async fn update_client_stats(
        &self,
        conn: &mut SqliteConnection,
        client_id: &str,
        total: f64,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        // Cliente desconhecido não interrompe a venda, igual à baixa de
        // estoque de produto inexistente.
        let Some(client) = self.client_repo.find_by_id(&mut *conn, client_id).await? else {
            tracing::warn!(
                cliente = %client_id,
                "Venda referencia cliente inexistente; estatísticas não atualizadas"
            );
            return Ok(());
        };

        self.client_repo
            .update_stats(
                &mut *conn,
                client_id,
                client.total_visits + 1,
                client.total_spent + total,
                today,
            )
            .await
    }

    /// Venda completa com itens e pagamentos.
    pub async fn get_sale(&self, id: &str) -> Result<SaleWithChildren, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;
        let items = self.sale_repo.list_items(&self.pool, id).await?;
        let payments = self.sale_repo.list_payments(&self.pool, id).await?;
        Ok(SaleWithChildren::assemble(sale, items, payments))
    }

    /// Resumos por intervalo de datas, mais recentes primeiro.
    pub async fn list_sales(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.list(&self.pool, start_date, end_date).await
    }
}
