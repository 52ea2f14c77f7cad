use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Value of the `categoria` filter meaning "every category".
pub const ALL_CATEGORIES: &str = "todas";

/// Prices travel as decimal strings ("160.00"); reject anything else.
fn validate_price(price: &str) -> Result<(), validator::ValidationError> {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_price")),
    }
}

/// Product entity as stored and served to the shop frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "id_producto")]
    pub id: i64,
    #[serde(rename = "codigo_producto")]
    pub code: Option<String>,
    #[serde(rename = "nombre_producto")]
    pub name: Option<String>,
    #[serde(rename = "descripcion_producto")]
    pub description: Option<String>,
    #[serde(rename = "id_categoria_producto")]
    pub category_id: Option<i64>,
    #[serde(rename = "stock_producto")]
    pub stock: Option<i32>,
    #[serde(rename = "stock_minimo_producto")]
    pub min_stock: Option<i32>,
    /// Sale price formatted with two decimals
    #[serde(rename = "precio_producto")]
    pub price: Option<String>,
    #[serde(rename = "foto1_producto")]
    pub photo1: Option<String>,
    #[serde(rename = "foto2_producto")]
    pub photo2: Option<String>,
    #[serde(rename = "id_marca_producto")]
    pub brand_id: Option<i64>,
}

/// Body of `POST /productos` and `PUT /productos/{id}`.
///
/// PUT replaces the whole record, so omitted fields end up as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default, rename = "codigo_producto")]
    #[validate(length(max = 50))]
    pub code: Option<String>,
    #[serde(default, rename = "nombre_producto")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, rename = "descripcion_producto")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default, rename = "id_categoria_producto")]
    pub category_id: Option<i64>,
    #[serde(default, rename = "stock_producto")]
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[serde(default, rename = "stock_minimo_producto")]
    #[validate(range(min = 0))]
    pub min_stock: Option<i32>,
    #[serde(default, rename = "precio_producto")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<String>,
    #[serde(default, rename = "foto1_producto")]
    #[validate(length(max = 500))]
    pub photo1: Option<String>,
    #[serde(default, rename = "foto2_producto")]
    #[validate(length(max = 500))]
    pub photo2: Option<String>,
    #[serde(default, rename = "id_marca_producto")]
    pub brand_id: Option<i64>,
}

impl ProductInput {
    /// Trim the product code and drop it when blank.
    pub fn normalized(mut self) -> Self {
        self.code = self
            .code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }
}

impl Product {
    pub fn new(id: i64, input: ProductInput) -> Self {
        Self {
            id,
            code: input.code,
            name: input.name,
            description: input.description,
            category_id: input.category_id,
            stock: input.stock,
            min_stock: input.min_stock,
            price: input.price,
            photo1: input.photo1,
            photo2: input.photo2,
            brand_id: input.brand_id,
        }
    }

    /// Full replacement keeping only the id.
    pub fn replace(&mut self, input: ProductInput) {
        *self = Self::new(self.id, input);
    }

    /// Stock strictly below the configured minimum; missing values count as zero.
    pub fn is_low_stock(&self) -> bool {
        self.stock.unwrap_or(0) < self.min_stock.unwrap_or(0)
    }

    /// Case-insensitive substring match over code, name and description.
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        [&self.code, &self.name, &self.description]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle_lowercase))
    }
}

/// Query string of `GET /productos`
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Category id, or "todas" for every category
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    /// Free text searched in code, name and description
    #[serde(rename = "busqueda")]
    pub search: Option<String>,
    /// Only products whose stock is below their minimum
    #[serde(rename = "bajo_stock")]
    pub low_stock: Option<bool>,
}

/// A [`ProductFilter`] after parsing, as understood by repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
    /// Already lowercased
    pub search: Option<String>,
    pub low_stock: bool,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category_id) = self.category_id {
            if product.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(ref needle) = self.search {
            if !product.matches_search(needle) {
                return false;
            }
        }
        !self.low_stock || product.is_low_stock()
    }
}

impl TryFrom<ProductFilter> for ProductQuery {
    /// The offending `categoria` value
    type Error = String;

    fn try_from(filter: ProductFilter) -> Result<Self, Self::Error> {
        let category_id = match filter.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            Some(c) => Some(c.parse::<i64>().map_err(|_| c.to_string())?),
        };

        Ok(Self {
            category_id,
            search: filter
                .search
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase()),
            low_stock: filter.low_stock.unwrap_or(false),
        })
    }
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "id_categoria_producto")]
    pub id: i64,
    #[serde(rename = "nombre_categoria_producto")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[serde(rename = "nombre_categoria_producto")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Product brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    #[serde(rename = "id_marca_producto")]
    pub id: i64,
    #[serde(rename = "nombre_marca_producto")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct BrandInput {
    #[serde(rename = "nombre_marca_producto")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
