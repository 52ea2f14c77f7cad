use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Brand, BrandInput, Category, CategoryInput, Product, ProductInput, ProductQuery};

/// Data access for products and the catalogs they reference.
///
/// Lookups by code or name are case-insensitive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create_product(&self, input: ProductInput) -> ProductResult<Product>;

    async fn get_product(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products matching the query, ordered by id
    async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    async fn replace_product(&self, id: i64, input: ProductInput) -> ProductResult<Product>;

    async fn delete_product(&self, id: i64) -> ProductResult<bool>;

    async fn find_product_by_code(&self, code: &str) -> ProductResult<Option<Product>>;

    async fn count_products_in_category(&self, category_id: i64) -> ProductResult<usize>;

    async fn count_products_of_brand(&self, brand_id: i64) -> ProductResult<usize>;

    async fn create_category(&self, input: CategoryInput) -> ProductResult<Category>;

    async fn get_category(&self, id: i64) -> ProductResult<Option<Category>>;

    async fn list_categories(&self) -> ProductResult<Vec<Category>>;

    async fn rename_category(&self, id: i64, input: CategoryInput) -> ProductResult<Category>;

    async fn delete_category(&self, id: i64) -> ProductResult<bool>;

    async fn find_category_by_name(&self, name: &str) -> ProductResult<Option<Category>>;

    async fn create_brand(&self, input: BrandInput) -> ProductResult<Brand>;

    async fn get_brand(&self, id: i64) -> ProductResult<Option<Brand>>;

    async fn list_brands(&self) -> ProductResult<Vec<Brand>>;

    async fn rename_brand(&self, id: i64, input: BrandInput) -> ProductResult<Brand>;

    async fn delete_brand(&self, id: i64) -> ProductResult<bool>;

    async fn find_brand_by_name(&self, name: &str) -> ProductResult<Option<Brand>>;
}

/// Ids start at 1 and are never reused.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Inventory {
    products: Table<Product>,
    categories: Table<Category>,
    brands: Table<Brand>,
}

/// In-memory implementation of InventoryRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventoryRepository {
    inventory: Arc<RwLock<Inventory>>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let mut inventory = self.inventory.write().await;

        let id = inventory.products.allocate_id();
        let product = Product::new(id, input);
        inventory.products.rows.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> ProductResult<Option<Product>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.products.rows.get(&id).cloned())
    }

    async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let inventory = self.inventory.read().await;
        Ok(inventory
            .products
            .rows
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect())
    }

    async fn replace_product(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        let mut inventory = self.inventory.write().await;

        let product = inventory
            .products
            .rows
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.replace(input);

        tracing::info!(product_id = id, "Replaced product");
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> ProductResult<bool> {
        let mut inventory = self.inventory.write().await;

        if inventory.products.rows.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_product_by_code(&self, code: &str) -> ProductResult<Option<Product>> {
        let code = code.to_lowercase();
        let inventory = self.inventory.read().await;
        Ok(inventory
            .products
            .rows
            .values()
            .find(|p| p.code.as_deref().is_some_and(|c| c.to_lowercase() == code))
            .cloned())
    }

    async fn count_products_in_category(&self, category_id: i64) -> ProductResult<usize> {
        let inventory = self.inventory.read().await;
        Ok(inventory
            .products
            .rows
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .count())
    }

    async fn count_products_of_brand(&self, brand_id: i64) -> ProductResult<usize> {
        let inventory = self.inventory.read().await;
        Ok(inventory
            .products
            .rows
            .values()
            .filter(|p| p.brand_id == Some(brand_id))
            .count())
    }

    async fn create_category(&self, input: CategoryInput) -> ProductResult<Category> {
        let mut inventory = self.inventory.write().await;

        let id = inventory.categories.allocate_id();
        let category = Category {
            id,
            name: input.name,
        };
        inventory.categories.rows.insert(id, category.clone());

        tracing::info!(category_id = id, "Created category");
        Ok(category)
    }

    async fn get_category(&self, id: i64) -> ProductResult<Option<Category>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.categories.rows.get(&id).cloned())
    }

    async fn list_categories(&self) -> ProductResult<Vec<Category>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.categories.rows.values().cloned().collect())
    }

    async fn rename_category(&self, id: i64, input: CategoryInput) -> ProductResult<Category> {
        let mut inventory = self.inventory.write().await;

        let category = inventory
            .categories
            .rows
            .get_mut(&id)
            .ok_or(ProductError::CategoryNotFound(id))?;
        category.name = input.name;

        Ok(category.clone())
    }

    async fn delete_category(&self, id: i64) -> ProductResult<bool> {
        let mut inventory = self.inventory.write().await;
        Ok(inventory.categories.rows.remove(&id).is_some())
    }

    async fn find_category_by_name(&self, name: &str) -> ProductResult<Option<Category>> {
        let inventory = self.inventory.read().await;
        let name = name.to_lowercase();
        Ok(inventory
            .categories
            .rows
            .values()
            .find(|c| c.name.to_lowercase() == name)
            .cloned())
    }

    async fn create_brand(&self, input: BrandInput) -> ProductResult<Brand> {
        let mut inventory = self.inventory.write().await;

        let id = inventory.brands.allocate_id();
        let brand = Brand {
            id,
            name: input.name,
        };
        inventory.brands.rows.insert(id, brand.clone());

        tracing::info!(brand_id = id, "Created brand");
        Ok(brand)
    }

    async fn get_brand(&self, id: i64) -> ProductResult<Option<Brand>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.brands.rows.get(&id).cloned())
    }

    async fn list_brands(&self) -> ProductResult<Vec<Brand>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.brands.rows.values().cloned().collect())
    }

    async fn rename_brand(&self, id: i64, input: BrandInput) -> ProductResult<Brand> {
        let mut inventory = self.inventory.write().await;

        let brand = inventory
            .brands
            .rows
            .get_mut(&id)
            .ok_or(ProductError::BrandNotFound(id))?;
        brand.name = input.name;

        Ok(brand.clone())
    }

    async fn delete_brand(&self, id: i64) -> ProductResult<bool> {
        let mut inventory = self.inventory.write().await;
        Ok(inventory.brands.rows.remove(&id).is_some())
    }

    async fn find_brand_by_name(&self, name: &str) -> ProductResult<Option<Brand>> {
        let inventory = self.inventory.read().await;
        let name = name.to_lowercase();
        Ok(inventory
            .brands
            .rows
            .values()
            .find(|b| b.name.to_lowercase() == name)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(code: &str, category_id: Option<i64>) -> ProductInput {
        ProductInput {
            code: Some(code.to_string()),
            name: Some(format!("Producto {}", code)),
            category_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_find_by_code_folds_non_ascii_case() {
        let repo = InMemoryInventoryRepository::new();
        let created = repo.create_product(input("BATERÍA-1", None)).await.unwrap();

        let found = repo.find_product_by_code("batería-1").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_ids_are_ascending_and_not_reused() {
        let repo = InMemoryInventoryRepository::new();

        let first = repo.create_product(input("A", None)).await.unwrap();
        let second = repo.create_product(input("B", None)).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(repo.delete_product(second.id).await.unwrap());
        let third = repo.create_product(input("C", None)).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id_and_filtered() {
        let repo = InMemoryInventoryRepository::new();
        for (code, category) in [("A", Some(1)), ("B", Some(2)), ("C", Some(1))] {
            repo.create_product(input(code, category)).await.unwrap();
        }

        let all = repo.list_products(ProductQuery::default()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let in_first = repo
            .list_products(ProductQuery {
                category_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_first.len(), 2);
        assert_eq!(repo.count_products_in_category(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_code_ignores_case() {
        let repo = InMemoryInventoryRepository::new();
        repo.create_product(input("Bat-75", None)).await.unwrap();

        assert!(repo.find_product_by_code("BAT-75").await.unwrap().is_some());
        assert!(repo.find_product_by_code("BAT-76").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_missing_product_is_not_found() {
        let repo = InMemoryInventoryRepository::new();
        let result = repo.replace_product(9, ProductInput::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_category_and_brand_lookup_by_name() {
        let repo = InMemoryInventoryRepository::new();
        repo.create_category(CategoryInput {
            name: "Baterías".to_string(),
        })
        .await
        .unwrap();
        repo.create_brand(BrandInput {
            name: "Bosch".to_string(),
        })
        .await
        .unwrap();

        assert!(repo.find_category_by_name("BATERÍAS").await.unwrap().is_some());
        assert!(repo.find_brand_by_name("bosch").await.unwrap().is_some());
        assert_eq!(repo.list_brands().await.unwrap().len(), 1);
    }
}
