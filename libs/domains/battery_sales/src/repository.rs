use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{BatterySaleError, BatterySaleResult};
use crate::models::{BatterySale, BatterySaleFilter};

/// Repository trait for battery sale persistence
///
/// Sales are built by the service; the repository only assigns ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatterySaleRepository: Send + Sync {
    /// Next free id, never reused
    async fn next_id(&self) -> BatterySaleResult<i64>;

    async fn insert(&self, sale: BatterySale) -> BatterySaleResult<BatterySale>;

    async fn get_by_id(&self, id: i64) -> BatterySaleResult<Option<BatterySale>>;

    /// Matching sales, newest sale date first
    async fn list(&self, filter: BatterySaleFilter) -> BatterySaleResult<Vec<BatterySale>>;

    async fn update(&self, sale: BatterySale) -> BatterySaleResult<BatterySale>;

    async fn delete(&self, id: i64) -> BatterySaleResult<bool>;

    /// Flip the return flag; fails if it was already set
    async fn mark_returned(&self, id: i64) -> BatterySaleResult<BatterySale>;
}

#[derive(Debug, Default)]
struct Sales {
    rows: HashMap<i64, BatterySale>,
    last_id: i64,
}

/// In-memory implementation of BatterySaleRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryBatterySaleRepository {
    sales: Arc<RwLock<Sales>>,
}

impl InMemoryBatterySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BatterySaleRepository for InMemoryBatterySaleRepository {
    async fn next_id(&self) -> BatterySaleResult<i64> {
        let mut sales = self.sales.write().await;
        sales.last_id += 1;
        Ok(sales.last_id)
    }

    async fn insert(&self, sale: BatterySale) -> BatterySaleResult<BatterySale> {
        let mut sales = self.sales.write().await;

        if sales.rows.contains_key(&sale.id) {
            return Err(BatterySaleError::Internal(format!(
                "Battery sale id {} already in use",
                sale.id
            )));
        }
        sales.last_id = sales.last_id.max(sale.id);
        sales.rows.insert(sale.id, sale.clone());

        tracing::info!(sale_id = sale.id, "Registered battery sale");
        Ok(sale)
    }

    async fn get_by_id(&self, id: i64) -> BatterySaleResult<Option<BatterySale>> {
        let sales = self.sales.read().await;
        Ok(sales.rows.get(&id).cloned())
    }

    async fn list(&self, filter: BatterySaleFilter) -> BatterySaleResult<Vec<BatterySale>> {
        let sales = self.sales.read().await;

        let mut result: Vec<BatterySale> = sales
            .rows
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();

        // Newest first; same-day sales by registration order, latest first
        result.sort_by(|a, b| b.sale_date.cmp(&a.sale_date).then(b.id.cmp(&a.id)));

        Ok(result)
    }

    async fn update(&self, sale: BatterySale) -> BatterySaleResult<BatterySale> {
        let mut sales = self.sales.write().await;

        let slot = sales
            .rows
            .get_mut(&sale.id)
            .ok_or(BatterySaleError::NotFound(sale.id))?;
        *slot = sale.clone();

        tracing::info!(sale_id = sale.id, "Updated battery sale");
        Ok(sale)
    }

    async fn delete(&self, id: i64) -> BatterySaleResult<bool> {
        let mut sales = self.sales.write().await;

        if sales.rows.remove(&id).is_some() {
            tracing::info!(sale_id = id, "Deleted battery sale");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn mark_returned(&self, id: i64) -> BatterySaleResult<BatterySale> {
        let mut sales = self.sales.write().await;

        let sale = sales
            .rows
            .get_mut(&id)
            .ok_or(BatterySaleError::NotFound(id))?;
        if sale.returned {
            return Err(BatterySaleError::AlreadyReturned(id));
        }
        sale.returned = true;

        tracing::info!(sale_id = id, "Battery returned under warranty");
        Ok(sale.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BatterySaleInput;
    use chrono::NaiveDate;

    async fn register(repo: &InMemoryBatterySaleRepository, customer: &str, day: u32) -> BatterySale {
        let today = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        let input = BatterySaleInput {
            battery_code: format!("BAT-{}", day),
            brand_id: None,
            customer: customer.to_string(),
            customer_phone: None,
            sale_date: None,
            warranty_months: 12,
            sale_price: 800.0,
            notes: None,
        };
        let id = repo.next_id().await.unwrap();
        repo.insert(BatterySale::new(id, input, today).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryBatterySaleRepository::new();
        register(&repo, "Ana", 3).await;
        register(&repo, "Luis", 20).await;
        register(&repo, "Pedro", 10).await;

        let customers: Vec<String> = repo
            .list(BatterySaleFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.customer)
            .collect();
        assert_eq!(customers, vec!["Luis", "Pedro", "Ana"]);
    }

    #[tokio::test]
    async fn test_mark_returned_twice_conflicts() {
        let repo = InMemoryBatterySaleRepository::new();
        let sale = register(&repo, "Ana", 3).await;

        assert!(repo.mark_returned(sale.id).await.unwrap().returned);
        assert!(matches!(
            repo.mark_returned(sale.id).await,
            Err(BatterySaleError::AlreadyReturned(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_sale_is_not_found() {
        let repo = InMemoryBatterySaleRepository::new();
        let mut sale = register(&repo, "Ana", 3).await;
        sale.id = 99;

        assert!(matches!(
            repo.update(sale).await,
            Err(BatterySaleError::NotFound(99))
        ));
    }
}
