//! Inventory service - business rules over products, categories and brands

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    Brand, BrandInput, Category, CategoryInput, Product, ProductFilter, ProductInput, ProductQuery,
};
use crate::repository::InventoryRepository;

/// Service enforcing uniqueness and referential rules.
///
/// - Product codes are unique when present (case-insensitive)
/// - A product may only reference existing categories and brands
/// - Category and brand names are unique, and in-use ones cannot be deleted
pub struct InventoryService<R: InventoryRepository> {
    repository: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let query = ProductQuery::try_from(filter).map_err(|value| {
            ProductError::Validation(format!("Invalid category filter: {}", value))
        })?;
        self.repository.list_products(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let input = self.check_product_input(None, input).await?;
        self.repository.create_product(input).await
    }

    /// Full replacement of a product.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        self.get_product(id).await?;
        let input = self.check_product_input(Some(id), input).await?;
        self.repository.replace_product(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete_product(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    async fn check_product_input(
        &self,
        id: Option<i64>,
        input: ProductInput,
    ) -> ProductResult<ProductInput> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;
        let input = input.normalized();

        if let Some(category_id) = input.category_id {
            if self.repository.get_category(category_id).await?.is_none() {
                return Err(ProductError::Validation(format!(
                    "Category {} does not exist",
                    category_id
                )));
            }
        }

        if let Some(brand_id) = input.brand_id {
            if self.repository.get_brand(brand_id).await?.is_none() {
                return Err(ProductError::Validation(format!(
                    "Brand {} does not exist",
                    brand_id
                )));
            }
        }

        if let Some(ref code) = input.code {
            if let Some(existing) = self.repository.find_product_by_code(code).await? {
                if Some(existing.id) != id {
                    return Err(ProductError::DuplicateCode(code.clone()));
                }
            }
        }

        Ok(input)
    }

    pub async fn list_categories(&self) -> ProductResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    pub async fn get_category(&self, id: i64) -> ProductResult<Category> {
        self.repository
            .get_category(id)
            .await?
            .ok_or(ProductError::CategoryNotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> ProductResult<Category> {
        let input = CategoryInput {
            name: self.check_name(&input.name)?,
        };
        if self.repository.find_category_by_name(&input.name).await?.is_some() {
            return Err(ProductError::DuplicateCategory(input.name));
        }
        self.repository.create_category(input).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_category(&self, id: i64, input: CategoryInput) -> ProductResult<Category> {
        self.get_category(id).await?;
        let input = CategoryInput {
            name: self.check_name(&input.name)?,
        };
        if let Some(existing) = self.repository.find_category_by_name(&input.name).await? {
            if existing.id != id {
                return Err(ProductError::DuplicateCategory(input.name));
            }
        }
        self.repository.rename_category(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i64) -> ProductResult<()> {
        self.get_category(id).await?;

        let products = self.repository.count_products_in_category(id).await?;
        if products > 0 {
            return Err(ProductError::CategoryInUse { id, products });
        }

        if !self.repository.delete_category(id).await? {
            return Err(ProductError::CategoryNotFound(id));
        }
        Ok(())
    }

    pub async fn list_brands(&self) -> ProductResult<Vec<Brand>> {
        self.repository.list_brands().await
    }

    pub async fn get_brand(&self, id: i64) -> ProductResult<Brand> {
        self.repository
            .get_brand(id)
            .await?
            .ok_or(ProductError::BrandNotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_brand(&self, input: BrandInput) -> ProductResult<Brand> {
        let input = BrandInput {
            name: self.check_name(&input.name)?,
        };
        if self.repository.find_brand_by_name(&input.name).await?.is_some() {
            return Err(ProductError::DuplicateBrand(input.name));
        }
        self.repository.create_brand(input).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_brand(&self, id: i64, input: BrandInput) -> ProductResult<Brand> {
        self.get_brand(id).await?;
        let input = BrandInput {
            name: self.check_name(&input.name)?,
        };
        if let Some(existing) = self.repository.find_brand_by_name(&input.name).await? {
            if existing.id != id {
                return Err(ProductError::DuplicateBrand(input.name));
            }
        }
        self.repository.rename_brand(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: i64) -> ProductResult<()> {
        self.get_brand(id).await?;

        let products = self.repository.count_products_of_brand(id).await?;
        if products > 0 {
            return Err(ProductError::BrandInUse { id, products });
        }

        if !self.repository.delete_brand(id).await? {
            return Err(ProductError::BrandNotFound(id));
        }
        Ok(())
    }

    /// Trimmed, non-empty catalog name.
    fn check_name(&self, name: &str) -> ProductResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductError::Validation("Name must not be empty".to_string()));
        }
        Ok(name.to_string())
    }
}

impl<R: InventoryRepository> Clone for InventoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
