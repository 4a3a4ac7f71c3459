//! Domain DTOs for the vegetable inventory API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! The production store is a PHP/MySQL service that may return integers and
//! prices as strings, so `id`, `price` and the pagination counters decode from
//! JSON integers, whole-valued floats (`3.0`) or numeric strings. Whole prices
//! encode as JSON integers (`18000`, never `18000.0`); non-finite prices do not
//! encode at all.

use serde::{Deserialize, Serialize};

/// Number of records per page when the caller does not pick one.
pub const DEFAULT_PAGE_LIMIT: i64 = 5;

/// A single inventory entry as stored by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vegetable {
    #[serde(deserialize_with = "wire::number")]
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "wire::serialize_price", deserialize_with = "wire::number")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetablePage {
    #[serde(deserialize_with = "wire::number")]
    pub page: i64,
    #[serde(deserialize_with = "wire::number")]
    pub pages: u64,
    #[serde(deserialize_with = "wire::number")]
    pub total: u64,
    #[serde(default)]
    pub data: Vec<Vegetable>,
}

/// Query parameters for a listing. Values are sent as given; the remote API
/// decides what a zero or negative page means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
}

impl ListParams {
    /// The given page with the default page size.
    pub fn page(page: i64) -> Self {
        Self {
            page,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_limit(self, limit: i64) -> Self {
        Self { limit, ..self }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::page(1)
    }
}

/// Request payload for creating a new vegetable. `Default` yields the empty
/// payload, which fails validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewVegetable {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        serialize_with = "wire::serialize_price",
        deserialize_with = "wire::number"
    )]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewVegetable {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for updating an existing vegetable. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VegetableChanges {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire::serialize_optional_price",
        deserialize_with = "wire::optional_number"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VegetableChanges {
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Server confirmation for a create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Created {
    pub message: String,
    pub data: Vegetable,
}

/// Server confirmation for an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Updated {
    pub message: String,
    #[serde(default)]
    pub updated_fields: Vec<String>,
}

/// Server confirmation for a delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deleted {
    pub message: String,
}

mod wire {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Largest magnitude an `f64` holds without losing integer precision.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    /// `Whole` catches floats like `3.0` that PHP's `json_encode` writes for
    /// integer-valued results of `ceil()` and friends.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Number(T),
        Whole(f64),
        Text(String),
    }

    impl<T> Lenient<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        fn resolve<E: serde::de::Error>(self) -> Result<T, E> {
            match self {
                Lenient::Number(n) => Ok(n),
                Lenient::Whole(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT => {
                    (f as i64).to_string().parse().map_err(E::custom)
                }
                Lenient::Whole(f) => Err(E::custom(format!("expected a whole number, got {f}"))),
                Lenient::Text(s) => s.trim().parse().map_err(E::custom),
            }
        }
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Lenient::<T>::deserialize(deserializer)?.resolve()
    }

    pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Option::<Lenient<T>>::deserialize(deserializer)?
            .map(|raw| raw.resolve())
            .transpose()
    }

    pub fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if !price.is_finite() {
            return Err(S::Error::custom(format!("price must be a finite number, got {price}")));
        }
        if price.fract() == 0.0 && price.abs() < MAX_EXACT {
            serializer.serialize_i64(*price as i64)
        } else {
            serializer.serialize_f64(*price)
        }
    }

    pub fn serialize_optional_price<S: Serializer>(
        price: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match price {
            Some(price) => serialize_price(price, serializer),
            None => serializer.serialize_none(),
        }
    }
}
