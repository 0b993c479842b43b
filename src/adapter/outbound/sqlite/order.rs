//! SQLite order store implementation.

use chrono::Utc;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    format_timestamp, parse_decimal, parse_optional_decimal, parse_timestamp, LastInsertRowId,
    NewOrderRow, OrderRow,
};
use crate::adapter::outbound::sqlite::database::schema::orders;
use crate::adapter::outbound::sqlite::database::write_error;
use crate::domain::order::{FulfillmentStatus, NewOrder, Order, OrderFilter, OrderStatus};
use crate::error::{Error, Result};
use crate::port::outbound::store::OrderStore;

/// SQLite-backed order store. Marketplace order ids are unique.
#[derive(Clone)]
pub struct SqliteOrderStore {
    pool: DbPool,
}

impl SqliteOrderStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(order: NewOrder, now: String) -> NewOrderRow {
        NewOrderRow {
            marketplace_order_id: order.marketplace_order_id,
            supplier_order_id: order.supplier_order_id,
            product_id: order.product_id,
            buyer_name: order.buyer_name,
            buyer_email: order.buyer_email,
            order_total: order.order_total.to_string(),
            order_status: order.order_status.as_str().to_string(),
            fulfillment_status: order.fulfillment_status.as_str().to_string(),
            tracking_number: order.tracking_number,
            carrier: order.carrier,
            profit: order.profit.map(|d| d.to_string()),
            user_id: order.user_id,
            created_at: now,
        }
    }

    fn from_row(row: OrderRow) -> Result<Order> {
        Ok(Order {
            id: row.id,
            order_total: parse_decimal(&row.order_total)?,
            order_status: row
                .order_status
                .parse::<OrderStatus>()
                .map_err(Error::Parse)?,
            fulfillment_status: row
                .fulfillment_status
                .parse::<FulfillmentStatus>()
                .map_err(Error::Parse)?,
            profit: parse_optional_decimal(row.profit.as_deref())?,
            created_at: parse_timestamp(&row.created_at)?,
            marketplace_order_id: row.marketplace_order_id,
            supplier_order_id: row.supplier_order_id,
            product_id: row.product_id,
            buyer_name: row.buyer_name,
            buyer_email: row.buyer_email,
            tracking_number: row.tracking_number,
            carrier: row.carrier,
            user_id: row.user_id,
        })
    }
}

impl OrderStore for SqliteOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let row = Self::to_row(order, format_timestamp(Utc::now()));
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let stored = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_into(orders::table)
                    .values(&row)
                    .execute(conn)?;
                let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)?
                    .id;
                orders::table
                    .find(id)
                    .select(OrderRow::as_select())
                    .first(conn)
            })
            .map_err(|e| write_error(e, "order"))?;

        Self::from_row(stored)
    }

    async fn find_all(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let mut query = orders::table.select(OrderRow::as_select()).into_boxed();
        if let Some(user_id) = filter.user_id {
            query = query.filter(orders::user_id.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(orders::order_status.eq(status.as_str()));
        }

        let rows: Vec<OrderRow> = query
            .order(orders::id.desc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn count_all(&self) -> Result<u64> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let count: i64 = orders::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        u64::try_from(count).map_err(|e| Error::Parse(e.to_string()))
    }
}
