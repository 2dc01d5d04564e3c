//! Customer DTOs

use chrono::{DateTime, Utc};
use domain_ledger::Customer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 4, message = "must be at least 4 characters"))]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    /// Signed running balance: negative means the customer owes
    pub wallet_balance: Decimal,
    /// The outstanding amount as a positive number, zero when in credit
    pub debt: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        let debt = customer.debt();
        Self {
            id: customer.id.into(),
            full_name: customer.full_name,
            phone: customer.phone,
            wallet_balance: customer.wallet_balance.amount(),
            debt: debt.amount(),
            created_at: customer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;
    use rust_decimal_macros::dec;
    use test_utils::CustomerBuilder;

    #[test]
    fn test_response_exposes_debt_as_positive_amount() {
        let customer = CustomerBuilder::new()
            .in_debt_by(Money::new(dec!(2500)))
            .build();

        let response = CustomerResponse::from(customer);
        assert_eq!(response.wallet_balance, dec!(-2500));
        assert_eq!(response.debt, dec!(2500));
    }

    #[test]
    fn test_request_validation_rejects_blank_name() {
        let request = CreateCustomerRequest {
            full_name: String::new(),
            phone: "0700111222".into(),
        };
        assert!(request.validate().is_err());
    }
}
