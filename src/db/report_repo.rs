// src/db/report_repo.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::reports::{
        AppointmentStatusStat, AppointmentsByDay, AppointmentsByHour, AppointmentsReport,
        CategoryTotal, ClientsReport, ClientsSummary, FinancialReport, FinancialSummary,
        LowStockProduct, MovementTypeTotal, PaymentMethodTotal, ProductStat, ProductsReport,
        ProfessionalStat, ProfessionalsReport, ServiceStat, ServicesReport, TopClient, TopService,
    },
};

/// Janela de datas dos relatórios: ou um intervalo explícito, ou apenas um
/// início derivado do período (today/week/month/year). Vazia = sem filtro.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    // Gera a cláusula para a expressão de data da tabela em questão,
    // na mesma ordem dos binds devolvidos.
    fn clause(&self, expr: &str) -> (String, Vec<NaiveDate>) {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (
                format!(" AND date({}) BETWEEN ? AND ?", expr),
                vec![start, end],
            ),
            (Some(start), None) => (format!(" AND date({}) >= ?", expr), vec![start]),
            (None, Some(end)) => (format!(" AND date({}) <= ?", expr), vec![end]),
            (None, None) => (String::new(), Vec::new()),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SumCount {
    total: Option<f64>,
    count: i64,
}

#[derive(Clone)]
pub struct ReportRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn financial<'e, E>(
        &self,
        executor: E,
        window: DateWindow,
    ) -> Result<FinancialReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;
        // Transações contam pela data de pagamento quando existir
        let (clause, binds) = window.clause("COALESCE(paid_date, created_at)");

        let income = fetch_sum_count(&mut tx, "INCOME", &clause, &binds).await?;
        let expenses = fetch_sum_count(&mut tx, "EXPENSE", &clause, &binds).await?;

        let income_by_category = {
            let sql = format!(
                "SELECT category, SUM(amount) AS total FROM transactions \
                 WHERE type = 'INCOME' AND status = 'PAID'{} GROUP BY category",
                clause
            );
            let mut query = sqlx::query_as::<_, CategoryTotal>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        let expenses_by_category = {
            let sql = format!(
                "SELECT category, SUM(amount) AS total FROM transactions \
                 WHERE type = 'EXPENSE' AND status = 'PAID'{} GROUP BY category",
                clause
            );
            let mut query = sqlx::query_as::<_, CategoryTotal>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        let income_by_payment_method = {
            let sql = format!(
                "SELECT payment_method, SUM(amount) AS total FROM transactions \
                 WHERE type = 'INCOME' AND status = 'PAID'{} GROUP BY payment_method",
                clause
            );
            let mut query = sqlx::query_as::<_, PaymentMethodTotal>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        tx.commit().await?;

        let total_income = income.total.unwrap_or(0.0);
        let total_expenses = expenses.total.unwrap_or(0.0);
        Ok(FinancialReport {
            summary: FinancialSummary {
                total_income,
                total_expenses,
                net_profit: total_income - total_expenses,
                transactions_count: income.count + expenses.count,
            },
            income_by_category,
            expenses_by_category,
            income_by_payment_method,
        })
    }

    pub async fn services<'e, E>(
        &self,
        executor: E,
        window: DateWindow,
    ) -> Result<ServicesReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;
        let (clause, binds) = window.clause("a.date");

        let service_stats = {
            let sql = format!(
                "SELECT s.id, s.name, s.category, s.price, \
                        COUNT(a.id) AS total_appointments, SUM(a.price) AS total_revenue \
                 FROM services s \
                 LEFT JOIN appointments a ON s.id = a.service_id{} \
                 GROUP BY s.id, s.name, s.category, s.price \
                 ORDER BY total_revenue DESC",
                clause
            );
            let mut query = sqlx::query_as::<_, ServiceStat>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        let top_services = {
            let sql = format!(
                "SELECT s.name, COUNT(a.id) AS count, SUM(a.price) AS revenue \
                 FROM appointments a \
                 JOIN services s ON a.service_id = s.id \
                 WHERE 1=1{} \
                 GROUP BY s.id, s.name \
                 ORDER BY count DESC \
                 LIMIT 10",
                clause
            );
            let mut query = sqlx::query_as::<_, TopService>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        tx.commit().await?;
        Ok(ServicesReport {
            service_stats,
            top_services,
        })
    }

    pub async fn professionals<'e, E>(
        &self,
        executor: E,
        window: DateWindow,
    ) -> Result<ProfessionalsReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;
        let (clause, binds) = window.clause("a.date");

        let professional_stats = {
            let sql = format!(
                "SELECT p.id, p.name, p.commission_rate, \
                        COUNT(a.id) AS total_appointments, \
                        SUM(a.price) AS total_revenue, \
                        SUM(a.price * p.commission_rate / 100) AS total_commission \
                 FROM professionals p \
                 LEFT JOIN appointments a ON p.id = a.professional_id{} \
                 WHERE p.active = 1 \
                 GROUP BY p.id, p.name, p.commission_rate \
                 ORDER BY total_revenue DESC",
                clause
            );
            let mut query = sqlx::query_as::<_, ProfessionalStat>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        tx.commit().await?;
        Ok(ProfessionalsReport { professional_stats })
    }

    pub async fn clients<'e, E>(&self, executor: E) -> Result<ClientsReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;

        let summary = sqlx::query_as::<_, ClientsSummary>(
            r#"
            SELECT COUNT(*) AS total_clients,
                   COALESCE(SUM(CASE WHEN last_visit IS NOT NULL THEN 1 ELSE 0 END), 0) AS active_clients,
                   AVG(total_spent) AS avg_spent,
                   AVG(total_visits) AS avg_visits
            FROM clients
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let top_clients = sqlx::query_as::<_, TopClient>(
            r#"
            SELECT id, name, email, phone, total_visits, total_spent
            FROM clients
            ORDER BY total_spent DESC
            LIMIT 20
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let new_clients = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE date(created_at) >= date('now', '-30 days')",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ClientsReport {
            summary,
            top_clients,
            new_clients,
        })
    }

    pub async fn products<'e, E>(
        &self,
        executor: E,
        window: DateWindow,
    ) -> Result<ProductsReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;
        let (clause, binds) = window.clause("created_at");

        let product_stats = sqlx::query_as::<_, ProductStat>(
            r#"
            SELECT id, name, category, current_stock, min_stock, sale_price,
                   CASE WHEN current_stock <= min_stock THEN 1 ELSE 0 END AS needs_restock
            FROM products
            WHERE type = 'RESALE'
            ORDER BY needs_restock DESC, current_stock ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let low_stock_products = sqlx::query_as::<_, LowStockProduct>(
            r#"
            SELECT name, current_stock, min_stock
            FROM products
            WHERE current_stock <= min_stock
            ORDER BY current_stock ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let stock_movements = {
            let sql = format!(
                "SELECT type, COUNT(*) AS count, SUM(quantity) AS total_quantity \
                 FROM stock_movements WHERE 1=1{} GROUP BY type",
                clause
            );
            let mut query = sqlx::query_as::<_, MovementTypeTotal>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        tx.commit().await?;
        Ok(ProductsReport {
            product_stats,
            low_stock_products,
            stock_movements,
        })
    }

    pub async fn appointments<'e, E>(
        &self,
        executor: E,
        window: DateWindow,
    ) -> Result<AppointmentsReport, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;
        let (clause, binds) = window.clause("date");

        let appointment_stats = {
            let sql = format!(
                "SELECT status, COUNT(*) AS count, SUM(price) AS total_revenue \
                 FROM appointments WHERE 1=1{} GROUP BY status",
                clause
            );
            let mut query = sqlx::query_as::<_, AppointmentStatusStat>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        let appointments_by_day = {
            let sql = format!(
                "SELECT date(date) AS day, COUNT(*) AS count \
                 FROM appointments WHERE 1=1{} GROUP BY date(date) ORDER BY day",
                clause
            );
            let mut query = sqlx::query_as::<_, AppointmentsByDay>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        let appointments_by_hour = {
            let sql = format!(
                "SELECT substr(time, 1, 2) AS hour, COUNT(*) AS count \
                 FROM appointments WHERE 1=1{} GROUP BY hour ORDER BY count DESC",
                clause
            );
            let mut query = sqlx::query_as::<_, AppointmentsByHour>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            query.fetch_all(&mut *tx).await?
        };

        tx.commit().await?;
        Ok(AppointmentsReport {
            appointment_stats,
            appointments_by_day,
            appointments_by_hour,
        })
    }
}

async fn fetch_sum_count(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    kind: &str,
    clause: &str,
    binds: &[NaiveDate],
) -> Result<SumCount, AppError> {
    let sql = format!(
        "SELECT SUM(amount) AS total, COUNT(*) AS count FROM transactions \
         WHERE type = ? AND status = 'PAID'{}",
        clause
    );
    let mut query = sqlx::query_as::<_, SumCount>(&sql);
    query = query.bind(kind);
    for bind in binds {
        query = query.bind(bind);
    }
    let row = query.fetch_one(&mut **tx).await?;
    Ok(row)
}
