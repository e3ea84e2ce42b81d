//! Product persistence: lifecycle operations and finders.

use tracing::{debug, info, instrument, warn};

use catalog_core::ValidationError;
use catalog_products::{Category, Product, ProductId};

use crate::db::Database;
use crate::error::RecordResult;
use crate::query::{PriceFilter, ProductFilter, ProductQuery};
use crate::row::{PRODUCT_COLUMNS, ProductRow};

/// Store operations for `Product`.
///
/// Instance methods mutate the stored row behind a record; associated
/// functions are type-level lookups. All of them block until the store
/// answers.
pub trait ProductRecord: Sized {
    /// Insert a new row and write the generated id back onto the record.
    ///
    /// Any id already on the record is ignored; the store always assigns one.
    fn create(&mut self, db: &Database) -> RecordResult<ProductId>;

    /// Rewrite the stored row with the record's current fields.
    ///
    /// Fails with a validation error, without touching the store, when the
    /// record has no id.
    fn update(&self, db: &Database) -> RecordResult<()>;

    /// Remove the stored row. Deleting a row that is already gone succeeds.
    ///
    /// Consumes the record: once deleted it no longer describes stored state.
    fn delete(self, db: &Database) -> RecordResult<()>;

    /// Every stored product. Order is not part of the contract.
    fn all(db: &Database) -> RecordResult<Vec<Self>>;

    /// Look up one product by id; absence is `Ok(None)`.
    fn find(db: &Database, id: ProductId) -> RecordResult<Option<Self>>;

    fn find_by_name<'db>(db: &'db Database, name: &str) -> ProductQuery<'db>;

    fn find_by_availability(db: &Database, available: bool) -> ProductQuery<'_>;

    fn find_by_category(db: &Database, category: Category) -> ProductQuery<'_>;

    /// Products at exactly `price`, given as a `Price`, `Decimal` or text.
    ///
    /// The argument is never rounded: `"12.499"` matches no row.
    fn find_by_price<P: Into<PriceFilter>>(db: &Database, price: P) -> RecordResult<ProductQuery<'_>>;
}

impl ProductRecord for Product {
    #[instrument(skip(self, db), fields(name = %self.name), err)]
    fn create(&mut self, db: &Database) -> RecordResult<ProductId> {
        info!("creating {}", self);

        let result = db.block_on(
            sqlx::query(
                r#"
                INSERT INTO products (name, description, price, available, category)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.price.to_string())
            .bind(self.available)
            .bind(self.category.as_str())
            .execute(db.pool()),
        )?;

        let id = ProductId::new(result.last_insert_rowid());
        self.id = Some(id);
        info!(%id, "created product");
        Ok(id)
    }

    #[instrument(skip(self, db), fields(name = %self.name, id = ?self.id), err)]
    fn update(&self, db: &Database) -> RecordResult<()> {
        let id = self.id.ok_or(ValidationError::missing_identifier("update"))?;
        info!("saving {}", self);

        let result = db.block_on(
            sqlx::query(
                r#"
                UPDATE products
                SET name = ?1,
                    description = ?2,
                    price = ?3,
                    available = ?4,
                    category = ?5
                WHERE id = ?6
                "#,
            )
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.price.to_string())
            .bind(self.available)
            .bind(self.category.as_str())
            .bind(id.get())
            .execute(db.pool()),
        )?;

        if result.rows_affected() == 0 {
            warn!(%id, "update matched no stored product");
        }
        Ok(())
    }

    #[instrument(skip(self, db), fields(name = %self.name, id = ?self.id), err)]
    fn delete(self, db: &Database) -> RecordResult<()> {
        let id = self.id.ok_or(ValidationError::missing_identifier("delete"))?;
        info!("deleting {}", self);

        let result = db.block_on(
            sqlx::query("DELETE FROM products WHERE id = ?1")
                .bind(id.get())
                .execute(db.pool()),
        )?;

        if result.rows_affected() == 0 {
            warn!(%id, "delete matched no stored product");
        }
        Ok(())
    }

    fn all(db: &Database) -> RecordResult<Vec<Self>> {
        debug!("listing all products");
        ProductQuery::new(db, ProductFilter::All).fetch()
    }

    #[instrument(skip(db), err)]
    fn find(db: &Database, id: ProductId) -> RecordResult<Option<Self>> {
        let row: Option<ProductRow> = db.block_on(
            sqlx::query_as::<_, ProductRow>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
            ))
            .bind(id.get())
            .fetch_optional(db.pool()),
        )?;

        Ok(row.map(Product::try_from).transpose()?)
    }

    fn find_by_name<'db>(db: &'db Database, name: &str) -> ProductQuery<'db> {
        debug!(name, "finding products by name");
        ProductQuery::new(db, ProductFilter::Name(name.to_string()))
    }

    fn find_by_availability(db: &Database, available: bool) -> ProductQuery<'_> {
        debug!(available, "finding products by availability");
        ProductQuery::new(db, ProductFilter::Availability(available))
    }

    fn find_by_category(db: &Database, category: Category) -> ProductQuery<'_> {
        debug!(%category, "finding products by category");
        ProductQuery::new(db, ProductFilter::Category(category))
    }

    fn find_by_price<P: Into<PriceFilter>>(db: &Database, price: P) -> RecordResult<ProductQuery<'_>> {
        let price: PriceFilter = price.into();
        debug!(price = ?price, "finding products by price");
        Ok(ProductQuery::new(db, price.into_filter()?))
    }
}
