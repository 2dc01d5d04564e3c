//! Settings DTOs

use domain_ledger::UnitPrice;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UpdateUnitPriceRequest {
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct UnitPriceResponse {
    pub unit_price: Decimal,
}

impl From<UnitPrice> for UnitPriceResponse {
    fn from(price: UnitPrice) -> Self {
        Self {
            unit_price: price.per_unit().amount(),
        }
    }
}
