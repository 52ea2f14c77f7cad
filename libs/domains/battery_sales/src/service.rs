use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{BatterySaleError, BatterySaleResult};
use crate::models::{BatterySale, BatterySaleFilter, BatterySaleInput};
use crate::repository::BatterySaleRepository;

/// Shop-local calendar date
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Service layer for battery sales and warranty returns
pub struct BatterySaleService<R: BatterySaleRepository> {
    repository: Arc<R>,
}

impl<R: BatterySaleRepository> BatterySaleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(customer = %input.customer))]
    pub async fn register_sale(&self, input: BatterySaleInput) -> BatterySaleResult<BatterySale> {
        input
            .validate()
            .map_err(|e| BatterySaleError::Validation(e.to_string()))?;

        let id = self.repository.next_id().await?;
        let sale = BatterySale::new(id, input, today())?;
        self.repository.insert(sale).await
    }

    pub async fn get_sale(&self, id: i64) -> BatterySaleResult<BatterySale> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BatterySaleError::NotFound(id))
    }

    pub async fn list_sales(&self, filter: BatterySaleFilter) -> BatterySaleResult<Vec<BatterySale>> {
        self.repository.list(filter).await
    }

    /// Full replacement; the warranty end date is recomputed.
    #[instrument(skip(self, input))]
    pub async fn update_sale(&self, id: i64, input: BatterySaleInput) -> BatterySaleResult<BatterySale> {
        input
            .validate()
            .map_err(|e| BatterySaleError::Validation(e.to_string()))?;

        let mut sale = self.get_sale(id).await?;
        sale.replace(input, today())?;
        self.repository.update(sale).await
    }

    #[instrument(skip(self))]
    pub async fn delete_sale(&self, id: i64) -> BatterySaleResult<()> {
        if !self.repository.delete(id).await? {
            return Err(BatterySaleError::NotFound(id));
        }
        Ok(())
    }

    /// Register a warranty return.
    ///
    /// Rejected when the warranty ended before today or the battery was
    /// already returned.
    #[instrument(skip(self))]
    pub async fn register_return(&self, id: i64) -> BatterySaleResult<BatterySale> {
        self.register_return_on(id, today()).await
    }

    async fn register_return_on(&self, id: i64, today: NaiveDate) -> BatterySaleResult<BatterySale> {
        let sale = self.get_sale(id).await?;
        sale.check_return(today)?;
        self.repository.mark_returned(id).await
    }
}

impl<R: BatterySaleRepository> Clone for BatterySaleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBatterySaleRepository;
    use mockall::predicate::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input() -> BatterySaleInput {
        BatterySaleInput {
            battery_code: "LTH-65".to_string(),
            brand_id: Some(2),
            customer: "Carlos Pérez".to_string(),
            customer_phone: None,
            sale_date: Some(date(2024, 3, 15)),
            warranty_months: 6,
            sale_price: 1200.0,
            notes: Some("Instalada en taller".to_string()),
        }
    }

    fn sale(id: i64, returned: bool) -> BatterySale {
        let mut sale = BatterySale::new(id, input(), date(2024, 3, 15)).unwrap();
        sale.returned = returned;
        sale
    }

    #[tokio::test]
    async fn test_register_sale_uses_next_id() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo.expect_next_id().times(1).returning(|| Ok(5));
        mock_repo
            .expect_insert()
            .withf(|sale| sale.id == 5 && sale.warranty_until == date(2024, 9, 15))
            .returning(Ok);

        let service = BatterySaleService::new(mock_repo);
        let created = service.register_sale(input()).await.unwrap();

        assert_eq!(created.id, 5);
        assert!(!created.returned);
    }

    #[tokio::test]
    async fn test_register_sale_rejects_invalid_input() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo.expect_next_id().never();

        let service = BatterySaleService::new(mock_repo);
        let mut bad = input();
        bad.customer = String::new();

        let result = service.register_sale(bad).await;
        assert!(matches!(result, Err(BatterySaleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_return_within_warranty() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sale(id, false))));
        mock_repo
            .expect_mark_returned()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(sale(id, true)));

        let service = BatterySaleService::new(mock_repo);
        let returned = service.register_return_on(1, date(2024, 9, 15)).await.unwrap();

        assert!(returned.returned);
    }

    #[tokio::test]
    async fn test_return_after_warranty_is_rejected() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(sale(id, false))));
        mock_repo.expect_mark_returned().never();

        let service = BatterySaleService::new(mock_repo);
        let result = service.register_return_on(1, date(2024, 9, 16)).await;

        assert!(matches!(result, Err(BatterySaleError::WarrantyExpired { .. })));
    }

    #[tokio::test]
    async fn test_return_of_unknown_sale_is_not_found() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = BatterySaleService::new(mock_repo);
        let result = service.register_return(8).await;

        assert!(matches!(result, Err(BatterySaleError::NotFound(8))));
    }

    #[tokio::test]
    async fn test_update_keeps_return_flag() {
        let mut mock_repo = MockBatterySaleRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(sale(id, true))));
        mock_repo.expect_update().returning(Ok);

        let service = BatterySaleService::new(mock_repo);
        let mut changed = input();
        changed.warranty_months = 12;

        let updated = service.update_sale(3, changed).await.unwrap();
        assert!(updated.returned);
        assert_eq!(updated.warranty_until, date(2025, 3, 15));
    }
}
