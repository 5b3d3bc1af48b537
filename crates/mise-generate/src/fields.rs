//! Per-column field rules backed by the `fake` crate.

use chrono::{Duration, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::errors::GenerateError;
use crate::foreign::ForeignContext;
use crate::values::{Row, Value};

/// Dishes the kitchen actually serves, with their category and ingredients.
const DISHES: &[(&str, &str, &str)] = &[
    ("Pizza", "Main Course", "tomato sauce, mozzarella, basil"),
    ("Burger", "Main Course", "beef patty, lettuce, tomato"),
    ("Pasta", "Main Course", "penne, marinara, parmesan"),
    ("Caesar Salad", "Appetizer", "romaine, croutons, parmesan"),
    ("Grilled Chicken", "Main Course", "chicken breast, olive oil, garlic"),
    ("Cheesecake", "Dessert", "cream cheese, sugar, eggs"),
    ("Latte", "Beverage", "milk, coffee, sugar"),
    ("Pancakes", "Breakfast", "flour, eggs, maple syrup"),
    ("Omelette", "Breakfast", "eggs, cheese, chives"),
];

/// Stock the storeroom tracks.
const SUPPLY_ITEMS: &[&str] = &[
    "tomatoes", "cheese", "lettuce", "chicken", "flour", "sugar", "milk", "olive oil", "garlic",
];

/// How to fill one column of a generated row.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Person full name.
    FullName,
    /// Email address, null with the given probability.
    Email { null_rate: f64 },
    Phone,
    /// Composed street address.
    Address,
    CompanyName,
    /// Short free-text sentence, null with the given probability.
    Sentence { null_rate: f64 },
    /// Uniform choice over an enumerated domain.
    Choice(&'static [&'static str]),
    /// Uniform integer in `min..=max`.
    IntRange { min: i64, max: i64 },
    /// Uniform monetary amount in `min..=max`, rounded to cents.
    Price { min: f64, max: f64 },
    /// Date up to `days_back` days before the profile's base date.
    PastDate { days_back: i64 },
    /// Dish name from the house menu.
    Dish,
    /// Category of the dish already placed in `dish_column`.
    DishCategory { dish_column: &'static str },
    /// Ingredient list of the dish already placed in `dish_column`.
    DishIngredients { dish_column: &'static str },
    /// Storeroom stock item name.
    SupplyItem,
    /// Copy a column from the parent row referenced by `fk_column`.
    ParentColumn {
        fk_column: &'static str,
        parent_table: &'static str,
        source_column: &'static str,
    },
}

impl FieldRule {
    pub fn generate(
        &self,
        row: &Row,
        foreign: &ForeignContext,
        base_date: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<Value, GenerateError> {
        let value = match self {
            FieldRule::FullName => Value::Text(Name().fake_with_rng::<String, _>(rng)),
            FieldRule::Email { null_rate } => {
                if *null_rate > 0.0 && rng.random_bool(*null_rate) {
                    Value::Null
                } else {
                    Value::Text(SafeEmail().fake_with_rng::<String, _>(rng))
                }
            }
            FieldRule::Phone => Value::Text(PhoneNumber().fake_with_rng::<String, _>(rng)),
            FieldRule::Address => {
                let number: String = BuildingNumber().fake_with_rng(rng);
                let street: String = StreetName().fake_with_rng(rng);
                let city: String = CityName().fake_with_rng(rng);
                let state: String = StateAbbr().fake_with_rng(rng);
                let zip: String = ZipCode().fake_with_rng(rng);
                Value::Text(format!("{number} {street}, {city}, {state} {zip}"))
            }
            FieldRule::CompanyName => Value::Text(CompanyName().fake_with_rng::<String, _>(rng)),
            FieldRule::Sentence { null_rate } => {
                if *null_rate > 0.0 && rng.random_bool(*null_rate) {
                    Value::Null
                } else {
                    Value::Text(Sentence(4..10).fake_with_rng::<String, _>(rng))
                }
            }
            FieldRule::Choice(domain) => {
                let picked = domain.choose(rng).ok_or_else(|| {
                    GenerateError::InvalidProfile("choice rule with empty domain".to_string())
                })?;
                Value::Text((*picked).to_string())
            }
            FieldRule::IntRange { min, max } => Value::Int(rng.random_range(*min..=*max)),
            FieldRule::Price { min, max } => {
                let amount: f64 = rng.random_range(*min..=*max);
                Value::Real(round_cents(amount))
            }
            FieldRule::PastDate { days_back } => {
                let offset = rng.random_range(0..=*days_back);
                Value::Date(base_date - Duration::days(offset))
            }
            FieldRule::Dish => {
                let (name, _, _) = DISHES.choose(rng).ok_or_else(|| {
                    GenerateError::InvalidProfile("empty dish catalog".to_string())
                })?;
                Value::Text((*name).to_string())
            }
            FieldRule::DishCategory { dish_column } => {
                let dish = dish_entry(row, dish_column)?;
                Value::Text(dish.1.to_string())
            }
            FieldRule::DishIngredients { dish_column } => {
                let dish = dish_entry(row, dish_column)?;
                Value::Text(dish.2.to_string())
            }
            FieldRule::SupplyItem => {
                let picked = SUPPLY_ITEMS.choose(rng).ok_or_else(|| {
                    GenerateError::InvalidProfile("empty supply list".to_string())
                })?;
                Value::Text((*picked).to_string())
            }
            FieldRule::ParentColumn {
                fk_column,
                parent_table,
                source_column,
            } => {
                let pk = row.get(*fk_column).ok_or_else(|| {
                    GenerateError::InvalidProfile(format!(
                        "parent_column rule needs '{fk_column}' filled first"
                    ))
                })?;
                foreign
                    .lookup_parent(parent_table, pk, source_column)
                    .cloned()
                    .ok_or_else(|| GenerateError::InvalidProfile(format!(
                        "no parent row in '{parent_table}' for key {}",
                        pk.key()
                    )))?
            }
        };

        Ok(value)
    }
}

fn dish_entry(row: &Row, dish_column: &str) -> Result<&'static (&'static str, &'static str, &'static str), GenerateError> {
    let name = row
        .get(dish_column)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            GenerateError::InvalidProfile(format!(
                "dish lookup needs text column '{dish_column}' filled first"
            ))
        })?;
    DISHES
        .iter()
        .find(|(dish, _, _)| *dish == name)
        .ok_or_else(|| GenerateError::InvalidProfile(format!("unknown dish '{name}'")))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn prices_round_to_cents_within_bounds() {
        let rule = FieldRule::Price { min: 5.0, max: 50.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let ctx = ForeignContext::new();
        for _ in 0..100 {
            let value = rule.generate(&Row::new(), &ctx, base_date(), &mut rng).unwrap();
            let price = value.as_f64().unwrap();
            assert!((5.0..=50.0).contains(&price));
            assert!(((price * 100.0).round() - price * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn past_dates_stay_behind_base() {
        let rule = FieldRule::PastDate { days_back: 30 };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ctx = ForeignContext::new();
        for _ in 0..50 {
            let value = rule.generate(&Row::new(), &ctx, base_date(), &mut rng).unwrap();
            let date = value.as_date().unwrap();
            assert!(date <= base_date());
            assert!(date >= base_date() - Duration::days(30));
        }
    }

    #[test]
    fn dish_category_matches_picked_dish() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let ctx = ForeignContext::new();

        let mut row = Row::new();
        let dish = FieldRule::Dish
            .generate(&row, &ctx, base_date(), &mut rng)
            .unwrap();
        row.insert("item_name".to_string(), dish.clone());

        let category = FieldRule::DishCategory { dish_column: "item_name" }
            .generate(&row, &ctx, base_date(), &mut rng)
            .unwrap();
        let expected = DISHES
            .iter()
            .find(|(name, _, _)| Some(*name) == dish.as_str())
            .unwrap()
            .1;
        assert_eq!(category.as_str(), Some(expected));
    }

    #[test]
    fn email_null_rate_zero_never_yields_null() {
        let rule = FieldRule::Email { null_rate: 0.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = ForeignContext::new();
        for _ in 0..50 {
            let value = rule.generate(&Row::new(), &ctx, base_date(), &mut rng).unwrap();
            assert!(value.as_str().is_some_and(|email| email.contains('@')));
        }
    }
}
