//! SQLite product store implementation.

use chrono::Utc;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    format_timestamp, parse_decimal, parse_optional_decimal, parse_timestamp, LastInsertRowId,
    NewProductRow, ProductRow,
};
use crate::adapter::outbound::sqlite::database::schema::products;
use crate::adapter::outbound::sqlite::database::write_error;
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductStatus};
use crate::error::{Error, Result};
use crate::port::outbound::store::ProductStore;

/// SQLite-backed product store.
///
/// `source_id` and `listing_id` are unique columns; a conflicting insert
/// fails with [`Error::UniqueViolation`].
#[derive(Clone)]
pub struct SqliteProductStore {
    pool: DbPool,
}

impl SqliteProductStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(product: NewProduct, now: &str) -> NewProductRow {
        NewProductRow {
            source_id: product.source_id,
            listing_id: product.listing_id,
            title: product.title,
            description: product.description,
            category: product.category,
            cost_price: product.cost_price.to_string(),
            list_price: product.list_price.map(|d| d.to_string()),
            profit: product.profit.map(|d| d.to_string()),
            roi: product.roi.map(|d| d.to_string()),
            status: product.status.as_str().to_string(),
            image_url: product.image_url,
            user_id: product.user_id,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    fn from_row(row: ProductRow) -> Result<Product> {
        Ok(Product {
            id: row.id,
            status: row.status.parse::<ProductStatus>().map_err(Error::Parse)?,
            cost_price: parse_decimal(&row.cost_price)?,
            list_price: parse_optional_decimal(row.list_price.as_deref())?,
            profit: parse_optional_decimal(row.profit.as_deref())?,
            roi: parse_optional_decimal(row.roi.as_deref())?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            source_id: row.source_id,
            listing_id: row.listing_id,
            title: row.title,
            description: row.description,
            category: row.category,
            image_url: row.image_url,
            user_id: row.user_id,
        })
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

impl ProductStore for SqliteProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product> {
        let row = Self::to_row(product, &format_timestamp(Utc::now()));
        let mut conn = self.connection()?;

        let stored = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_into(products::table)
                    .values(&row)
                    .execute(conn)?;
                let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)?
                    .id;
                products::table
                    .find(id)
                    .select(ProductRow::as_select())
                    .first(conn)
            })
            .map_err(|e| write_error(e, "product"))?;

        Self::from_row(stored)
    }

    async fn find_all(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut conn = self.connection()?;

        let mut query = products::table
            .select(ProductRow::as_select())
            .into_boxed();
        if let Some(user_id) = filter.user_id {
            query = query.filter(products::user_id.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(products::status.eq(status.as_str()));
        }

        let rows: Vec<ProductRow> = query
            .order(products::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Product>> {
        let mut conn = self.connection()?;

        let row: Option<ProductRow> = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn count_all(&self) -> Result<u64> {
        let mut conn = self.connection()?;

        let count: i64 = products::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        u64::try_from(count).map_err(|e| Error::Parse(e.to_string()))
    }
}
