//! Re-executable product queries.
//!
//! A `ProductQuery` is a descriptor (filter + store handle), not a result set.
//! Nothing runs until `fetch`, `count` or `first` is called, and every call
//! runs the statement again, so the same query can be consumed any number of
//! times and always reflects the current table contents.

use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use catalog_core::ValidationError;
use catalog_products::{Category, Price, Product};

use crate::db::Database;
use crate::error::RecordResult;
use crate::row::{PRODUCT_COLUMNS, ProductRow};

/// Equality filter over a single `products` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    /// Selects no rows, e.g. a price no stored value can equal.
    Nothing,
    Name(String),
    Availability(bool),
    Category(Category),
    Price(Price),
}

impl ProductFilter {
    fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            ProductFilter::All => {}
            ProductFilter::Nothing => {
                builder.push(" WHERE 1 = 0");
            }
            ProductFilter::Name(name) => {
                builder.push(" WHERE name = ").push_bind(name.clone());
            }
            ProductFilter::Availability(available) => {
                builder.push(" WHERE available = ").push_bind(*available);
            }
            ProductFilter::Category(category) => {
                builder.push(" WHERE category = ").push_bind(category.as_str());
            }
            ProductFilter::Price(price) => {
                // Stored prices are normalized text, so text equality is exact.
                builder.push(" WHERE price = ").push_bind(price.to_string());
            }
        }
    }
}

/// Price argument for a price lookup: an exact value or its text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceFilter {
    Exact(Price),
    Decimal(Decimal),
    Text(String),
}

impl PriceFilter {
    /// Resolve to the stored price this argument is equal to.
    ///
    /// Text is trimmed of whitespace and double quotes before parsing, so
    /// `"12.50"`, `" 12.5 "` and `"\"12.50\""` all resolve to `12.50`.
    /// Nothing is rounded: a value with nonzero digits past two places
    /// (`12.499`) or beyond the column range equals no stored price and
    /// resolves to `None`. Unparseable text is an error.
    pub fn resolve(self) -> Result<Option<Price>, ValidationError> {
        match self {
            PriceFilter::Exact(price) => Ok(Some(price)),
            PriceFilter::Decimal(value) => Ok(Price::exact(value)),
            PriceFilter::Text(text) => Ok(Price::exact(Price::parse_decimal(&text)?)),
        }
    }

    /// The row filter selecting products at exactly this price.
    pub fn into_filter(self) -> Result<ProductFilter, ValidationError> {
        Ok(match self.resolve()? {
            Some(price) => ProductFilter::Price(price),
            None => ProductFilter::Nothing,
        })
    }
}

impl From<Price> for PriceFilter {
    fn from(value: Price) -> Self {
        PriceFilter::Exact(value)
    }
}

impl From<Decimal> for PriceFilter {
    fn from(value: Decimal) -> Self {
        PriceFilter::Decimal(value)
    }
}

impl From<&str> for PriceFilter {
    fn from(value: &str) -> Self {
        PriceFilter::Text(value.to_string())
    }
}

impl From<String> for PriceFilter {
    fn from(value: String) -> Self {
        PriceFilter::Text(value)
    }
}

/// Lazy, restartable product query.
#[derive(Debug, Clone)]
pub struct ProductQuery<'db> {
    db: &'db Database,
    filter: ProductFilter,
}

impl<'db> ProductQuery<'db> {
    pub fn new(db: &'db Database, filter: ProductFilter) -> Self {
        Self { db, filter }
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Run the query and materialize every matching product, ascending by id.
    pub fn fetch(&self) -> RecordResult<Vec<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        self.filter.push_where(&mut builder);
        builder.push(" ORDER BY id");

        let rows: Vec<ProductRow> = self
            .db
            .block_on(builder.build_query_as::<ProductRow>().fetch_all(self.db.pool()))?;

        debug!(filter = ?self.filter, rows = rows.len(), "fetched products");

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Number of matching rows, computed by the store with `COUNT(*)`.
    pub fn count(&self) -> RecordResult<u64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        self.filter.push_where(&mut builder);

        let count: i64 = self
            .db
            .block_on(builder.build_query_scalar::<i64>().fetch_one(self.db.pool()))?;

        debug!(filter = ?self.filter, count, "counted products");
        Ok(count as u64)
    }

    /// Lowest-id matching product, if any.
    pub fn first(&self) -> RecordResult<Option<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        self.filter.push_where(&mut builder);
        builder.push(" ORDER BY id LIMIT 1");

        let row: Option<ProductRow> = self
            .db
            .block_on(builder.build_query_as::<ProductRow>().fetch_optional(self.db.pool()))?;

        Ok(row.map(Product::try_from).transpose()?)
    }

    /// Whether at least one row matches.
    pub fn exists(&self) -> RecordResult<bool> {
        Ok(self.count()? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_filter_resolves_all_inputs_alike() {
        let expected = Price::from_cents(1250).unwrap();
        let inputs: Vec<PriceFilter> = vec![
            expected.into(),
            Decimal::new(125, 1).into(),
            Decimal::new(12500, 3).into(),
            "12.50".into(),
            " 12.5 ".to_string().into(),
            "\"12.50\"".into(),
            "1.25e1".into(),
        ];
        for input in inputs {
            assert_eq!(input.clone().resolve().unwrap(), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn price_filter_does_not_round() {
        let inputs: Vec<PriceFilter> = vec![
            "12.499".into(),
            "12.501".into(),
            Decimal::new(12501, 3).into(),
            "1e-30".into(),
            "1000000000000".into(),
        ];
        for input in inputs {
            assert_eq!(input.clone().resolve().unwrap(), None, "input {input:?}");
            assert_eq!(input.into_filter().unwrap(), ProductFilter::Nothing);
        }
    }

    #[test]
    fn price_filter_rejects_garbage_text() {
        let err = PriceFilter::from("twelve-fifty").resolve().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPrice(_)));
        assert!(PriceFilter::from("1.5e").into_filter().is_err());
    }

    #[test]
    fn where_clause_binds_one_parameter() {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        ProductFilter::Category(Category::Food).push_where(&mut builder);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM products WHERE category = ?");

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        ProductFilter::All.push_where(&mut builder);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM products");

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        ProductFilter::Nothing.push_where(&mut builder);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM products WHERE 1 = 0");
    }
}
