// Testes do motor de checkout: carrinho → venda + itens + pagamentos,
// baixa de estoque com trilha de auditoria, lançamento financeiro e
// estatísticas do cliente.

use std::str::FromStr;

use chrono::Utc;
use salonx_backend::{
    common::error::AppError,
    config::AppState,
    models::{
        finance::{TransactionStatus, TransactionType},
        inventory::ProductKind,
        sales::{
            CreateSalePayload, PaymentMethod, SaleItemInput, SaleItemKind, SalePaymentInput,
            SaleStatus,
        },
    },
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn setup_state(atomic_checkout: bool) -> AppState {
    // Banco em memória exige uma única conexão na pool
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    AppState::from_pool(pool, atomic_checkout)
}

async fn create_product(state: &AppState, sku: &str, stock: f64, sale_price: f64) -> String {
    let id = format!("prd-{}", sku);
    state
        .product_repo
        .create(
            &state.db_pool,
            &id,
            "Óleo Reparador",
            ProductKind::Resale,
            "Tratamento",
            None,
            sku,
            stock,
            5.0,
            40.0,
            "UN",
            4.0,
            Some(sale_price),
            None,
            None,
        )
        .await
        .unwrap();
    id
}

async fn create_client(state: &AppState, email: &str) -> String {
    let id = format!("cli-{}", email);
    state
        .client_repo
        .create(
            &state.db_pool,
            &id,
            "Maria Souza",
            email,
            "(11) 98888-7777",
            None,
            None,
            None,
            None,
            None,
            None,
            "NEW",
        )
        .await
        .unwrap();
    id
}

fn product_cart(product_id: &str, quantity: f64, price: f64) -> CreateSalePayload {
    let total = quantity * price;
    CreateSalePayload {
        items: vec![SaleItemInput {
            kind: SaleItemKind::Product,
            item_id: product_id.to_string(),
            name: "Óleo Reparador".to_string(),
            quantity,
            price,
            discount: 0.0,
            total,
        }],
        payments: vec![SalePaymentInput {
            method: PaymentMethod::Money,
            amount: total,
        }],
        client_id: None,
        professional_id: None,
        subtotal: total,
        discount: 0.0,
        total,
        notes: None,
    }
}

#[tokio::test]
async fn empty_cart_is_rejected_without_writes() {
    let state = setup_state(false).await;

    let payload = CreateSalePayload {
        items: vec![],
        payments: vec![SalePaymentInput {
            method: PaymentMethod::Pix,
            amount: 10.0,
        }],
        client_id: None,
        professional_id: None,
        subtotal: 10.0,
        discount: 0.0,
        total: 10.0,
        notes: None,
    };
    let result = state.sale_service.finalize_sale(payload).await;
    assert!(matches!(result, Err(AppError::EmptySaleItems)));

    // Nenhuma linha pode ter sido criada em nenhuma das tabelas do fluxo
    for table in ["sales", "sale_items", "sale_payments", "transactions"] {
        assert_eq!(state.count_rows(table).await, 0, "tabela {}", table);
    }
}

#[tokio::test]
async fn missing_payments_are_rejected() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-001", 10.0, 10.0).await;

    let mut payload = product_cart(&product_id, 1.0, 10.0);
    payload.payments.clear();

    let result = state.sale_service.finalize_sale(payload).await;
    assert!(matches!(result, Err(AppError::EmptySalePayments)));
    assert_eq!(state.count_rows("sales").await, 0);
}

#[tokio::test]
async fn single_product_checkout_touches_every_ledger() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-002", 10.0, 10.0).await;

    let sale = state
        .sale_service
        .finalize_sale(product_cart(&product_id, 2.0, 10.0))
        .await
        .unwrap();

    // Venda e filhos
    assert_eq!(sale.status, SaleStatus::Completed);
    assert_eq!(sale.total, 20.0);
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].total, 20.0);
    assert_eq!(sale.items[0].item_name, "Óleo Reparador");
    assert_eq!(sale.payments.len(), 1);
    assert_eq!(sale.payments[0].amount, 20.0);
    assert_eq!(sale.payments[0].method, PaymentMethod::Money);

    // Lançamento financeiro: exatamente um INCOME/PAID da categoria SALE
    let transactions = state
        .transaction_repo
        .list(&state.db_pool, Some("INCOME"), None, None, None)
        .await
        .unwrap();
    assert_eq!(transactions.len(), 1);
    let transaction = &transactions[0];
    assert_eq!(transaction.kind, TransactionType::Income);
    assert_eq!(transaction.status, TransactionStatus::Paid);
    assert_eq!(transaction.category, "SALE");
    assert_eq!(transaction.amount, 20.0);
    assert_eq!(transaction.description, format!("Venda #{}", sale.id));
    assert_eq!(transaction.payment_method.as_deref(), Some("MONEY"));
    let today = Utc::now().date_naive();
    assert_eq!(transaction.due_date, today);
    assert_eq!(transaction.paid_date, Some(today));

    // Estoque baixado e trilha de auditoria preservada
    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 8.0);

    let movements = state
        .stock_service
        .list_movements(&state.db_pool, Some(&product_id))
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, 2.0);
    assert!(movements[0]
        .reason
        .as_deref()
        .unwrap()
        .contains(&sale.id));
}

#[tokio::test]
async fn client_counters_follow_each_sale() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-003", 50.0, 10.0).await;
    let client_id = create_client(&state, "maria@example.com").await;

    let mut first = product_cart(&product_id, 5.0, 10.0);
    first.client_id = Some(client_id.clone());
    state.sale_service.finalize_sale(first).await.unwrap();

    let mut second = product_cart(&product_id, 3.0, 10.0);
    second.client_id = Some(client_id.clone());
    state.sale_service.finalize_sale(second).await.unwrap();

    let client = state
        .client_repo
        .find_by_id(&state.db_pool, &client_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(client.total_visits, 2);
    assert_eq!(client.total_spent, 80.0);
    assert_eq!(client.last_visit, Some(Utc::now().date_naive()));

    // A reconciliação a partir do histórico chega nos mesmos números
    let stats = state
        .client_repo
        .recalculate_stats(&state.db_pool, &client_id)
        .await
        .unwrap();
    assert_eq!(stats.total_visits, client.total_visits);
    assert_eq!(stats.total_spent, client.total_spent);
}

#[tokio::test]
async fn supplied_total_is_trusted_as_is() {
    // O total vem do PDV e não é recalculado a partir dos itens; esta é a
    // política vigente e este teste a documenta.
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-004", 10.0, 10.0).await;

    let mut payload = product_cart(&product_id, 2.0, 10.0);
    payload.total = 999.0;

    let sale = state.sale_service.finalize_sale(payload).await.unwrap();
    assert_eq!(sale.total, 999.0);

    let item_sum: f64 = sale.items.iter().map(|i| i.total).sum();
    assert_eq!(item_sum, 20.0);

    let transactions = state
        .transaction_repo
        .list(&state.db_pool, Some("INCOME"), None, None, None)
        .await
        .unwrap();
    assert_eq!(transactions[0].amount, 999.0);
}

#[tokio::test]
async fn unknown_product_skips_stock_effects_but_sale_succeeds() {
    let state = setup_state(false).await;

    let sale = state
        .sale_service
        .finalize_sale(product_cart("prd-fantasma", 2.0, 10.0))
        .await
        .unwrap();

    // A venda e o item existem; nenhum efeito de estoque foi aplicado
    assert_eq!(sale.items.len(), 1);
    let movements = state
        .stock_service
        .list_movements(&state.db_pool, None)
        .await
        .unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn service_items_do_not_touch_stock() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-005", 10.0, 10.0).await;

    let payload = CreateSalePayload {
        items: vec![SaleItemInput {
            kind: SaleItemKind::Service,
            item_id: "s1".to_string(),
            name: "Corte Feminino".to_string(),
            quantity: 1.0,
            price: 80.0,
            discount: 0.0,
            total: 80.0,
        }],
        payments: vec![SalePaymentInput {
            method: PaymentMethod::CreditCard,
            amount: 80.0,
        }],
        client_id: None,
        professional_id: None,
        subtotal: 80.0,
        discount: 0.0,
        total: 80.0,
        notes: None,
    };
    state.sale_service.finalize_sale(payload).await.unwrap();

    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 10.0);

    let movements = state
        .stock_service
        .list_movements(&state.db_pool, None)
        .await
        .unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn split_payment_is_preserved() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-006", 10.0, 10.0).await;

    let mut payload = product_cart(&product_id, 3.0, 10.0);
    payload.payments = vec![
        SalePaymentInput {
            method: PaymentMethod::Money,
            amount: 12.0,
        },
        SalePaymentInput {
            method: PaymentMethod::Pix,
            amount: 18.0,
        },
    ];

    let sale = state.sale_service.finalize_sale(payload).await.unwrap();
    assert_eq!(sale.payments.len(), 2);

    // O lançamento financeiro usa o método do primeiro pagamento
    let transactions = state
        .transaction_repo
        .list(&state.db_pool, Some("INCOME"), None, None, None)
        .await
        .unwrap();
    assert_eq!(transactions[0].payment_method.as_deref(), Some("MONEY"));
}

#[tokio::test]
async fn atomic_mode_produces_the_same_happy_path() {
    let state = setup_state(true).await;
    let product_id = create_product(&state, "OL-007", 10.0, 10.0).await;

    let sale = state
        .sale_service
        .finalize_sale(product_cart(&product_id, 2.0, 10.0))
        .await
        .unwrap();
    assert_eq!(sale.total, 20.0);
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.payments.len(), 1);

    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 8.0);

    let movements = state
        .stock_service
        .list_movements(&state.db_pool, Some(&product_id))
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
}

#[tokio::test]
async fn listing_returns_sales_newest_first_with_matching_children() {
    let state = setup_state(false).await;
    let product_id = create_product(&state, "OL-008", 50.0, 10.0).await;

    let first = state
        .sale_service
        .finalize_sale(product_cart(&product_id, 1.0, 10.0))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = state
        .sale_service
        .finalize_sale(product_cart(&product_id, 2.0, 10.0))
        .await
        .unwrap();

    let sales = state.sale_service.list_sales(None, None).await.unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0].id, second.id);
    assert_eq!(sales[1].id, first.id);

    // Round-trip: buscar a venda devolve filhos cujos totais batem com o
    // total armazenado (dado que a entrada estava correta)
    let fetched = state.sale_service.get_sale(&second.id).await.unwrap();
    let item_sum: f64 = fetched.items.iter().map(|i| i.total).sum();
    let payment_sum: f64 = fetched.payments.iter().map(|p| p.amount).sum();
    assert_eq!(item_sum, fetched.total);
    assert_eq!(payment_sum, fetched.total);

    let today = Utc::now().date_naive();
    let filtered = state
        .sale_service
        .list_sales(Some(today), Some(today))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);

    let tomorrow = today + chrono::Duration::days(1);
    let none = state
        .sale_service
        .list_sales(Some(tomorrow), None)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn get_sale_for_unknown_id_is_not_found() {
    let state = setup_state(false).await;
    let result = state.sale_service.get_sale("sal-inexistente").await;
    assert!(matches!(result, Err(AppError::SaleNotFound)));
}

// Contagem direta nas tabelas, para os testes de "nenhuma linha criada".
trait CountRows {
    async fn count_rows(&self, table: &str) -> i64;
}

impl CountRows for AppState {
    async fn count_rows(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.db_pool)
            .await
            .unwrap()
    }
}
