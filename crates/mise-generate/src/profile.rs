//! Generation profile for the restaurant catalog: which field rule fills
//! each column, how many rows each table gets, and which aggregates are
//! derived after generation.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use mise_schema::restaurant::{
    AVAILABILITY, EMPLOYEE_ROLES, LOYALTY_TIERS, PAYMENT_STATUSES, PRIORITIES, TABLE_STATUSES,
    YES_NO,
};

use crate::fields::FieldRule;

const TABLE_LOCATIONS: &[&str] = &["Main Hall", "Patio", "Terrace", "Private Room", "Bar"];
const SUPPLY_CATEGORIES: &[&str] = &[
    "Produce", "Meat", "Seafood", "Dairy", "Bakery", "Beverages", "Dry Goods",
];

/// Cross-table derivation: recompute `table.target_column` as the sum of
/// `quantity_column * price_column` over child rows grouped by `child_fk`.
#[derive(Debug, Clone)]
pub struct AggregateRule {
    pub table: &'static str,
    pub key_column: &'static str,
    pub target_column: &'static str,
    pub child_table: &'static str,
    pub child_fk: &'static str,
    pub quantity_column: &'static str,
    pub price_column: &'static str,
}

/// Integer-range rule whose upper bound tracks another table's row target,
/// so row-count overrides keep the two coherent.
#[derive(Debug, Clone, Copy)]
pub struct RowCountLink {
    pub table: &'static str,
    pub column: &'static str,
    pub tracks: &'static str,
}

/// Field rules and row targets for one generation run.
#[derive(Debug, Clone)]
pub struct Profile {
    rules: HashMap<String, FieldRule>,
    row_counts: BTreeMap<String, u64>,
    links: Vec<RowCountLink>,
    pub aggregates: Vec<AggregateRule>,
    /// All generated dates are at or before this day, keeping runs with a
    /// fixed seed reproducible.
    pub base_date: NaiveDate,
}

impl Profile {
    pub fn rule_for(&self, table: &str, column: &str) -> Option<&FieldRule> {
        self.rules.get(&rule_key(table, column))
    }

    pub fn rows_for(&self, table: &str) -> u64 {
        self.row_counts.get(table).copied().unwrap_or(0)
    }

    /// Override the row target for a table; unknown names are rejected.
    /// Rules linked to the target are retargeted along with it.
    pub fn set_rows(&mut self, table: &str, rows: u64) -> bool {
        let Some(entry) = self.row_counts.get_mut(table) else {
            return false;
        };
        *entry = rows;

        for index in 0..self.links.len() {
            let link = self.links[index];
            if link.tracks == table {
                self.rules.insert(
                    rule_key(link.table, link.column),
                    FieldRule::IntRange {
                        min: 1,
                        max: rows.max(1) as i64,
                    },
                );
            }
        }

        true
    }

    pub fn row_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.row_counts
            .iter()
            .map(|(table, rows)| (table.as_str(), *rows))
    }
}

/// Default profile for the restaurant catalog.
pub fn restaurant_profile() -> Profile {
    let mut rules = HashMap::new();
    let mut add = |table: &str, column: &str, rule: FieldRule| {
        rules.insert(rule_key(table, column), rule);
    };

    add("Customers", "name", FieldRule::FullName);
    add("Customers", "email", FieldRule::Email { null_rate: 0.1 });
    add("Customers", "phone", FieldRule::Phone);
    add("Customers", "loyalty_tier", FieldRule::Choice(LOYALTY_TIERS));
    add("Customers", "address", FieldRule::Address);
    add("Customers", "registered_date", FieldRule::PastDate { days_back: 1826 });

    add("Menu_Items", "item_name", FieldRule::Dish);
    add("Menu_Items", "category", FieldRule::DishCategory { dish_column: "item_name" });
    add("Menu_Items", "price", FieldRule::Price { min: 5.0, max: 50.0 });
    add("Menu_Items", "ingredients", FieldRule::DishIngredients { dish_column: "item_name" });
    add("Menu_Items", "calories", FieldRule::IntRange { min: 100, max: 1000 });
    add("Menu_Items", "availability", FieldRule::Choice(AVAILABILITY));

    add("Orders", "order_date", FieldRule::PastDate { days_back: 365 });
    // Tables are generated after Orders and table_no carries no FK in the
    // published contract; the range tracks the Tables row target instead.
    add("Orders", "table_no", FieldRule::IntRange { min: 1, max: 20 });
    add("Orders", "total_amount", FieldRule::Price { min: 8.0, max: 220.0 });
    add("Orders", "payment_status", FieldRule::Choice(PAYMENT_STATUSES));
    add("Orders", "priority", FieldRule::Choice(PRIORITIES));

    add("Order_Details", "quantity", FieldRule::IntRange { min: 1, max: 5 });
    add(
        "Order_Details",
        "price_per_item",
        FieldRule::ParentColumn {
            fk_column: "item_id",
            parent_table: "Menu_Items",
            source_column: "price",
        },
    );

    add("Employees", "name", FieldRule::FullName);
    add("Employees", "role", FieldRule::Choice(EMPLOYEE_ROLES));
    add("Employees", "salary", FieldRule::Price { min: 2200.0, max: 9500.0 });
    add("Employees", "hire_date", FieldRule::PastDate { days_back: 3650 });
    add("Employees", "phone", FieldRule::Phone);
    add("Employees", "email", FieldRule::Email { null_rate: 0.0 });

    add("Tables", "status", FieldRule::Choice(TABLE_STATUSES));
    add("Tables", "seating_capacity", FieldRule::IntRange { min: 2, max: 12 });
    add("Tables", "location", FieldRule::Choice(TABLE_LOCATIONS));
    add("Tables", "reservation_allowed", FieldRule::Choice(YES_NO));

    add("Suppliers", "name", FieldRule::CompanyName);
    add("Suppliers", "phone", FieldRule::Phone);
    add("Suppliers", "email", FieldRule::Email { null_rate: 0.0 });
    add("Suppliers", "address", FieldRule::Address);
    add("Suppliers", "supply_category", FieldRule::Choice(SUPPLY_CATEGORIES));

    add("Inventory", "item_name", FieldRule::SupplyItem);
    add("Inventory", "quantity", FieldRule::IntRange { min: 0, max: 500 });
    add("Inventory", "restock_date", FieldRule::PastDate { days_back: 45 });

    // The feedback author is the customer who placed the referenced order.
    add(
        "Feedback",
        "customer_id",
        FieldRule::ParentColumn {
            fk_column: "order_id",
            parent_table: "Orders",
            source_column: "customer_id",
        },
    );
    add("Feedback", "rating", FieldRule::IntRange { min: 1, max: 5 });
    add("Feedback", "comments", FieldRule::Sentence { null_rate: 0.3 });
    add("Feedback", "feedback_date", FieldRule::PastDate { days_back: 365 });

    let mut row_counts = BTreeMap::new();
    for (table, rows) in [
        ("Customers", 1500),
        ("Menu_Items", 100),
        ("Orders", 800),
        ("Order_Details", 2400),
        ("Employees", 40),
        ("Tables", 20),
        ("Suppliers", 30),
        ("Inventory", 150),
        ("Feedback", 500),
        ("Menu_Supplier", 200),
    ] {
        row_counts.insert(table.to_string(), rows);
    }

    Profile {
        rules,
        row_counts,
        links: vec![RowCountLink {
            table: "Orders",
            column: "table_no",
            tracks: "Tables",
        }],
        aggregates: vec![AggregateRule {
            table: "Orders",
            key_column: "order_id",
            target_column: "total_amount",
            child_table: "Order_Details",
            child_fk: "order_id",
            quantity_column: "quantity",
            price_column: "price_per_item",
        }],
        base_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
    }
}

fn rule_key(table: &str, column: &str) -> String {
    format!("{table}.{column}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_cover_every_table() {
        let profile = restaurant_profile();
        let catalog = mise_schema::restaurant_catalog();
        for table in &catalog.tables {
            assert!(
                profile.rows_for(&table.name) > 0,
                "no row target for {}",
                table.name
            );
        }
        assert_eq!(profile.rows_for("Customers"), 1500);
    }

    #[test]
    fn set_rows_rejects_unknown_tables() {
        let mut profile = restaurant_profile();
        assert!(profile.set_rows("Orders", 10));
        assert_eq!(profile.rows_for("Orders"), 10);
        assert!(!profile.set_rows("Reservations", 10));
    }

    #[test]
    fn default_table_number_range_matches_tables_target() {
        let profile = restaurant_profile();
        match profile.rule_for("Orders", "table_no") {
            Some(FieldRule::IntRange { min: 1, max }) => {
                assert_eq!(*max as u64, profile.rows_for("Tables"));
            }
            other => panic!("unexpected table_no rule: {other:?}"),
        }
    }

    #[test]
    fn tables_override_retargets_order_table_numbers() {
        let mut profile = restaurant_profile();
        assert!(profile.set_rows("Tables", 5));
        match profile.rule_for("Orders", "table_no") {
            Some(FieldRule::IntRange { min: 1, max: 5 }) => {}
            other => panic!("table_no rule not retargeted: {other:?}"),
        }
    }
}
