use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use tokio::sync::OnceCell;

use crate::shared::data::db::get_connection;
use crate::shared::error::OrderLoadError;

pub const ORDERS_TABLE: &str = "food_delivery_orders";

/// Columns the loader requires. A source table missing any of them is
/// rejected before the first read; there is no partial-result mode.
const REQUIRED_COLUMNS: [&str; 13] = [
    "Order_ID",
    "Customer_ID",
    "Restaurant_Name",
    "City",
    "Cuisine_Type",
    "Order_Month",
    "Payment_Mode",
    "Order_Status",
    "Order_Value",
    "Final_Amount",
    "Delivery_Time_Min",
    "Delivery_Rating",
    "Restaurant_Rating",
];

/// One delivery order, held immutably in memory for the process lifetime.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct OrderRow {
    pub order_id: String,
    pub customer_id: String,
    pub restaurant_name: String,
    pub city: String,
    pub cuisine_type: String,
    pub order_month: String,
    pub payment_mode: String,
    pub order_status: String,
    pub order_value: f64,
    pub final_amount: f64,
    pub delivery_time_min: f64,
    pub delivery_rating: Option<f64>,
    pub restaurant_rating: f64,
}

static SNAPSHOT: OnceCell<Arc<Vec<OrderRow>>> = OnceCell::const_new();

/// Read-through cache over the full order table. The first call verifies
/// the schema and loads every row; later calls return the same immutable
/// snapshot. Invalidated only by process restart, never by data change.
pub async fn snapshot() -> Result<Arc<Vec<OrderRow>>, OrderLoadError> {
    SNAPSHOT
        .get_or_try_init(|| async { load_orders().await.map(Arc::new) })
        .await
        .map(Arc::clone)
}

async fn load_orders() -> Result<Vec<OrderRow>, OrderLoadError> {
    let db = get_connection();
    verify_schema(db).await?;

    // Identifiers may be stored as INTEGER; numeric columns may be stored
    // as INTEGER. Cast to the types the deriver works with.
    let sql = format!(
        r#"
        SELECT
            CAST(Order_ID AS TEXT)            AS order_id,
            CAST(Customer_ID AS TEXT)         AS customer_id,
            Restaurant_Name                   AS restaurant_name,
            City                              AS city,
            Cuisine_Type                      AS cuisine_type,
            Order_Month                       AS order_month,
            Payment_Mode                      AS payment_mode,
            Order_Status                      AS order_status,
            CAST(Order_Value AS REAL)         AS order_value,
            CAST(Final_Amount AS REAL)        AS final_amount,
            CAST(Delivery_Time_Min AS REAL)   AS delivery_time_min,
            CAST(Delivery_Rating AS REAL)     AS delivery_rating,
            CAST(Restaurant_Rating AS REAL)   AS restaurant_rating
        FROM {}
    "#,
        ORDERS_TABLE
    );

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, sql);
    let rows = OrderRow::find_by_statement(stmt).all(db).await?;

    tracing::info!("Loaded {} order rows from {}", rows.len(), ORDERS_TABLE);
    Ok(rows)
}

async fn verify_schema(db: &DatabaseConnection) -> Result<(), OrderLoadError> {
    let pragma = format!("PRAGMA table_info('{}');", ORDERS_TABLE);
    let cols = db
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;

    if cols.is_empty() {
        return Err(OrderLoadError::MissingTable(ORDERS_TABLE));
    }

    let names: Vec<String> = cols
        .iter()
        .map(|row| row.try_get("", "name").unwrap_or_default())
        .collect();

    for column in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == column) {
            return Err(OrderLoadError::SchemaMismatch {
                table: ORDERS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
