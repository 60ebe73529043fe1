//! Customer and reservation models
//!
//! A reservation multiplies a screening's cached fee by the audience count.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::money::Money;
use super::movie::Screening;
use crate::traits::Priced;
use crate::{FeeError, FeeResult};

/// Paying customer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub id: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Reservation entity
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique identifier (UUID)
    pub id: Uuid,

    customer: Customer,
    screening: Arc<Screening>,
    audience_count: u32,
    fee: Money,
}

impl Reservation {
    /// Create a reservation; `audience_count` must be at least one
    pub fn new(customer: Customer, screening: Arc<Screening>, audience_count: u32) -> FeeResult<Self> {
        if audience_count == 0 {
            return Err(FeeError::InvalidQuantity(audience_count));
        }

        let fee = screening.fee().times(Decimal::from(audience_count));
        Ok(Self {
            id: Uuid::new_v4(),
            customer,
            screening,
            audience_count,
            fee,
        })
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn screening(&self) -> &Screening {
        &self.screening
    }

    pub fn audience_count(&self) -> u32 {
        self.audience_count
    }

    /// Fee of a single seat
    pub fn unit_fee(&self) -> Money {
        self.screening.fee()
    }

    /// Total fee for every seat
    pub fn fee(&self) -> Money {
        self.fee
    }
}

impl Priced for Reservation {
    fn fee(&self) -> Money {
        self.fee
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} for {}: {}",
            self.screening, self.audience_count, self.customer, self.fee
        )
    }
}
