//! Mapping between `products` rows and `Product` values.

use catalog_core::ValidationError;
use catalog_products::{Category, Price, Product, ProductId};
use sqlx::FromRow;

/// Column list shared by every product SELECT, in `ProductRow` order.
pub(crate) const PRODUCT_COLUMNS: &str = "id, name, description, price, available, category";

/// Raw `products` row as SQLite returns it.
#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: String,
    available: bool,
    category: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = row
            .price
            .parse::<Price>()
            .map_err(|e| column_decode("price", e))?;
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| column_decode("category", e))?;

        Ok(Product {
            id: Some(ProductId::new(row.id)),
            name: row.name,
            description: row.description,
            price,
            available: row.available,
            category,
        })
    }
}

fn column_decode(column: &str, err: ValidationError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(price: &str, category: &str) -> ProductRow {
        ProductRow {
            id: 4,
            name: "Kettle".to_string(),
            description: "Stovetop kettle".to_string(),
            price: price.to_string(),
            available: true,
            category: category.to_string(),
        }
    }

    #[test]
    fn converts_valid_row() {
        let product = Product::try_from(row("29.90", "HOUSEWARES")).unwrap();
        assert_eq!(product.id, Some(ProductId::new(4)));
        assert_eq!(product.price, Price::from_cents(2990).unwrap());
        assert_eq!(product.category, Category::Housewares);
    }

    #[test]
    fn corrupt_columns_surface_as_decode_errors() {
        match Product::try_from(row("n/a", "HOUSEWARES")) {
            Err(sqlx::Error::ColumnDecode { index, .. }) => assert_eq!(index, "price"),
            other => panic!("Expected ColumnDecode for price, got {other:?}"),
        }
        match Product::try_from(row("1.00", "GARDEN")) {
            Err(sqlx::Error::ColumnDecode { index, .. }) => assert_eq!(index, "category"),
            other => panic!("Expected ColumnDecode for category, got {other:?}"),
        }
    }
}
