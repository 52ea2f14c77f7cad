use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{BatterySaleError, BatterySaleResult};

/// Longest warranty the shop offers
pub const MAX_WARRANTY_MONTHS: u32 = 60;

/// A battery sold to a customer, with its warranty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatterySale {
    #[serde(rename = "id_venta_bateria")]
    pub id: i64,
    #[serde(rename = "codigo_bateria")]
    pub battery_code: String,
    #[serde(rename = "id_marca_producto")]
    pub brand_id: Option<i64>,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "telefono_cliente")]
    pub customer_phone: Option<String>,
    #[serde(rename = "fecha_venta")]
    pub sale_date: NaiveDate,
    #[serde(rename = "meses_garantia")]
    pub warranty_months: u32,
    #[serde(rename = "precio_venta")]
    pub sale_price: f64,
    #[serde(rename = "devuelta_garantia")]
    pub returned: bool,
    #[serde(rename = "observaciones")]
    pub notes: Option<String>,
    /// Always `fecha_venta + meses_garantia`
    #[serde(rename = "garantia_hasta")]
    pub warranty_until: NaiveDate,
}

/// Body of `POST /venta_baterias` and `PUT /venta_baterias/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct BatterySaleInput {
    #[serde(rename = "codigo_bateria")]
    #[validate(length(min = 1, max = 50))]
    pub battery_code: String,
    #[serde(default, rename = "id_marca_producto")]
    pub brand_id: Option<i64>,
    #[serde(rename = "cliente")]
    #[validate(length(min = 1, max = 200))]
    pub customer: String,
    #[serde(default, rename = "telefono_cliente")]
    #[validate(length(max = 30))]
    pub customer_phone: Option<String>,
    /// Defaults to today
    #[serde(default, rename = "fecha_venta")]
    pub sale_date: Option<NaiveDate>,
    #[serde(rename = "meses_garantia")]
    #[validate(range(max = 60))]
    pub warranty_months: u32,
    #[serde(rename = "precio_venta")]
    #[validate(range(min = 0.0))]
    pub sale_price: f64,
    #[serde(default, rename = "observaciones")]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Warranty end date, or `None` if it does not fit the calendar.
pub fn warranty_end(sale_date: NaiveDate, warranty_months: u32) -> Option<NaiveDate> {
    sale_date.checked_add_months(Months::new(warranty_months))
}

impl BatterySale {
    /// Build a new, not yet returned sale.
    pub fn new(id: i64, input: BatterySaleInput, today: NaiveDate) -> BatterySaleResult<Self> {
        let sale_date = input.sale_date.unwrap_or(today);
        let warranty_until = warranty_end(sale_date, input.warranty_months)
            .ok_or_else(|| BatterySaleError::Validation("Warranty end date out of range".into()))?;

        Ok(Self {
            id,
            battery_code: input.battery_code,
            brand_id: input.brand_id,
            customer: input.customer,
            customer_phone: input.customer_phone,
            sale_date,
            warranty_months: input.warranty_months,
            sale_price: input.sale_price,
            returned: false,
            notes: input.notes,
            warranty_until,
        })
    }

    /// Replace every editable field; the return flag is kept.
    pub fn replace(&mut self, input: BatterySaleInput, today: NaiveDate) -> BatterySaleResult<()> {
        let returned = self.returned;
        *self = Self::new(self.id, input, today)?;
        self.returned = returned;
        Ok(())
    }

    /// The warranty covers its last day inclusive.
    pub fn is_under_warranty(&self, today: NaiveDate) -> bool {
        today <= self.warranty_until
    }

    /// Whether a warranty return may be registered today.
    pub fn check_return(&self, today: NaiveDate) -> BatterySaleResult<()> {
        if self.returned {
            return Err(BatterySaleError::AlreadyReturned(self.id));
        }
        if !self.is_under_warranty(today) {
            return Err(BatterySaleError::WarrantyExpired {
                id: self.id,
                until: self.warranty_until,
            });
        }
        Ok(())
    }
}

/// Query string of `GET /venta_baterias`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BatterySaleFilter {
    /// Case-insensitive part of the customer name
    #[serde(rename = "cliente")]
    pub customer: Option<String>,
    /// Only returned (true) or only active (false) sales
    #[serde(rename = "devuelta")]
    pub returned: Option<bool>,
}

impl BatterySaleFilter {
    pub fn matches(&self, sale: &BatterySale) -> bool {
        if let Some(ref customer) = self.customer {
            if !sale
                .customer
                .to_lowercase()
                .contains(&customer.to_lowercase())
            {
                return false;
            }
        }
        self.returned.is_none_or(|returned| sale.returned == returned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(months: u32) -> BatterySaleInput {
        BatterySaleInput {
            battery_code: "LTH-65".to_string(),
            brand_id: None,
            customer: "María López".to_string(),
            customer_phone: Some("5555-1234".to_string()),
            sale_date: Some(date(2024, 1, 31)),
            warranty_months: months,
            sale_price: 950.0,
            notes: None,
        }
    }

    #[test]
    fn test_warranty_end_clamps_to_month_length() {
        let sale = BatterySale::new(1, input(1), date(2024, 6, 1)).unwrap();
        assert_eq!(sale.warranty_until, date(2024, 2, 29));
    }

    #[test]
    fn test_sale_date_defaults_to_today() {
        let mut without_date = input(12);
        without_date.sale_date = None;

        let sale = BatterySale::new(1, without_date, date(2025, 3, 10)).unwrap();
        assert_eq!(sale.sale_date, date(2025, 3, 10));
        assert_eq!(sale.warranty_until, date(2026, 3, 10));
    }

    #[test]
    fn test_return_allowed_on_last_warranty_day() {
        let sale = BatterySale::new(1, input(12), date(2024, 1, 31)).unwrap();
        assert!(sale.check_return(date(2025, 1, 31)).is_ok());
        assert!(matches!(
            sale.check_return(date(2025, 2, 1)),
            Err(BatterySaleError::WarrantyExpired { id: 1, .. })
        ));
    }

    #[test]
    fn test_second_return_is_rejected() {
        let mut sale = BatterySale::new(1, input(12), date(2024, 1, 31)).unwrap();
        sale.returned = true;
        assert!(matches!(
            sale.check_return(date(2024, 2, 1)),
            Err(BatterySaleError::AlreadyReturned(1))
        ));
    }

    #[test]
    fn test_replace_keeps_return_flag() {
        let mut sale = BatterySale::new(1, input(12), date(2024, 1, 31)).unwrap();
        sale.returned = true;

        sale.replace(input(24), date(2024, 2, 1)).unwrap();
        assert!(sale.returned);
        assert_eq!(sale.warranty_until, date(2026, 1, 31));
    }

    #[test]
    fn test_warranty_limit_validation() {
        assert!(input(MAX_WARRANTY_MONTHS).validate().is_ok());
        assert!(input(MAX_WARRANTY_MONTHS + 1).validate().is_err());
    }

    #[test]
    fn test_filter_by_customer_and_return_state() {
        let sale = BatterySale::new(1, input(12), date(2024, 1, 31)).unwrap();

        let by_name = BatterySaleFilter {
            customer: Some("lópez".to_string()),
            returned: None,
        };
        assert!(by_name.matches(&sale));

        let returned_only = BatterySaleFilter {
            customer: None,
            returned: Some(true),
        };
        assert!(!returned_only.matches(&sale));
    }

    #[test]
    fn test_wire_names() {
        let sale = BatterySale::new(7, input(6), date(2024, 1, 31)).unwrap();
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["id_venta_bateria"], 7);
        assert_eq!(json["fecha_venta"], "2024-01-31");
        assert_eq!(json["garantia_hasta"], "2024-07-31");
        assert_eq!(json["devuelta_garantia"], false);
    }
}
