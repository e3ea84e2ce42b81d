use serde_json::{Map, Value, json};

use catalog_core::{Entity, RecordId, ValidationError};

use crate::category::Category;
use crate::price::Price;

/// Product identifier (store-generated integer primary key).
pub type ProductId = RecordId;

/// A catalog product.
///
/// `id` is `None` until the record has been created in the store. The other
/// fields are plain data; callers mutate them directly and then persist with
/// an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Construct a new, not-yet-persisted product.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Build an unpersisted product from its JSON representation.
    ///
    /// Any `id` key in `data` is ignored.
    pub fn from_json(data: &Value) -> Result<Self, ValidationError> {
        let mut product = Self::default();
        product.deserialize(data)?;
        Ok(product)
    }

    /// Convert to a plain JSON object.
    ///
    /// `price` is written as decimal text (`"12.50"`) so no precision is lost
    /// on the way out.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "available": self.available,
            "category": self.category,
        })
    }

    /// Populate this product's fields from a JSON object.
    ///
    /// Every field except `id` is required. Unknown keys are ignored. The
    /// product is left untouched when any field is rejected.
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self, ValidationError> {
        let fields = data.as_object().ok_or(ValidationError::NotAnObject)?;

        let name = string_field(fields, "name")?;
        let description = string_field(fields, "description")?;

        let available = match required(fields, "available")? {
            Value::Bool(flag) => *flag,
            other => {
                return Err(ValidationError::invalid_type(
                    "available",
                    "boolean",
                    json_type_name(other),
                ));
            }
        };

        let category = match required(fields, "category")? {
            Value::String(name) => name.parse::<Category>()?,
            other => {
                return Err(ValidationError::invalid_type(
                    "category",
                    "string",
                    json_type_name(other),
                ));
            }
        };

        let price = match required(fields, "price")? {
            Value::String(text) => text.parse::<Price>()?,
            Value::Number(number) => number.to_string().parse::<Price>()?,
            other => {
                return Err(ValidationError::invalid_type(
                    "price",
                    "decimal",
                    json_type_name(other),
                ));
            }
        };

        self.name = name;
        self.description = description;
        self.available = available;
        self.category = category;
        self.price = price;
        Ok(self)
    }
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Price::default(),
            available: true,
            category: Category::Unknown,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, ValidationError> {
    fields.get(key).ok_or(ValidationError::MissingField(key))
}

fn string_field(fields: &Map<String, Value>, key: &'static str) -> Result<String, ValidationError> {
    match required(fields, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(ValidationError::invalid_type(key, "string", json_type_name(other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
