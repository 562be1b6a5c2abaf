//! Money amounts.
//!
//! All storefront prices are whole rupees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// An amount in whole Indian rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupees(pub u32);

impl Rupees {
    pub const ZERO: Rupees = Rupees(0);

    /// Returns the raw amount
    pub fn amount(self) -> u32 {
        self.0
    }

    /// Multiplies by a quantity, saturating instead of overflowing
    pub fn times(self, quantity: u32) -> Self {
        Rupees(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl Add for Rupees {
    type Output = Rupees;

    fn add(self, other: Rupees) -> Rupees {
        Rupees(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, other: Rupees) {
        *self = *self + other;
    }
}

impl Mul<u32> for Rupees {
    type Output = Rupees;

    fn mul(self, quantity: u32) -> Rupees {
        self.times(quantity)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Rupees>>(iter: I) -> Rupees {
        iter.fold(Rupees::ZERO, Add::add)
    }
}

impl From<u32> for Rupees {
    fn from(amount: u32) -> Self {
        Rupees(amount)
    }
}
