//! The restaurant-management catalog: ten tables and five secondary indexes.
//!
//! Column names, types, enumerated domains, defaults, and foreign keys are
//! the external contract and must not drift.

use crate::constraints::{
    CheckConstraint, CheckRule, Constraint, FkAction, ForeignKey, Index, PrimaryKey,
    UniqueConstraint,
};
use crate::schema::{Catalog, Column, Table};
use crate::types::SqlType;

pub const LOYALTY_TIERS: &[&str] = &["Bronze", "Silver", "Gold"];
pub const MENU_CATEGORIES: &[&str] =
    &["Appetizer", "Main Course", "Dessert", "Beverage", "Breakfast"];
pub const AVAILABILITY: &[&str] = &["Available", "Out of Stock"];
pub const PAYMENT_STATUSES: &[&str] = &["Paid", "Pending", "Failed"];
pub const PRIORITIES: &[&str] = &["Low", "Medium", "High"];
pub const EMPLOYEE_ROLES: &[&str] =
    &["Manager", "Chef", "Waiter", "Host", "Team Member", "Cleaner"];
pub const TABLE_STATUSES: &[&str] = &["Available", "Reserved", "Occupied"];
pub const YES_NO: &[&str] = &["Yes", "No"];

/// Build the full restaurant catalog.
pub fn restaurant_catalog() -> Catalog {
    Catalog {
        tables: vec![
            customers(),
            menu_items(),
            orders(),
            order_details(),
            employees(),
            tables(),
            suppliers(),
            inventory(),
            feedback(),
            menu_supplier(),
        ],
        indexes: vec![
            index("idx_orders_customer_id", "Orders", &["customer_id"]),
            index("idx_order_date", "Orders", &["order_date"]),
            index("idx_feedback_customer_id", "Feedback", &["customer_id"]),
            index("idx_inventory_supplier_id", "Inventory", &["supplier_id"]),
            index("idx_order_details_order_id", "Order_Details", &["order_id"]),
        ],
        // Stale name from earlier layouts; dropped during clean-slate,
        // never recreated.
        legacy_tables: vec!["Reservations".to_string()],
    }
}

fn customers() -> Table {
    Table {
        name: "Customers".to_string(),
        columns: vec![
            Column::new("customer_id", SqlType::Integer),
            Column::new("name", SqlType::Text).not_null(),
            Column::new("email", SqlType::Text),
            Column::new("phone", SqlType::Text).not_null(),
            Column::new("loyalty_tier", SqlType::Text).not_null(),
            Column::new("address", SqlType::Text).not_null(),
            Column::new("registered_date", SqlType::Date).not_null(),
        ],
        constraints: vec![
            surrogate_pk("customer_id"),
            unique(&["email"]),
            one_of("loyalty_tier", LOYALTY_TIERS),
        ],
    }
}

fn menu_items() -> Table {
    Table {
        name: "Menu_Items".to_string(),
        columns: vec![
            Column::new("item_id", SqlType::Integer),
            Column::new("item_name", SqlType::Text).not_null(),
            Column::new("category", SqlType::Text).not_null(),
            Column::new("price", SqlType::Real).not_null(),
            Column::new("ingredients", SqlType::Text).not_null(),
            Column::new("calories", SqlType::Integer).not_null(),
            Column::new("availability", SqlType::Text).not_null(),
        ],
        constraints: vec![
            surrogate_pk("item_id"),
            one_of("category", MENU_CATEGORIES),
            greater_than("price", 0.0),
            at_least("calories", 0.0),
            one_of("availability", AVAILABILITY),
        ],
    }
}

fn orders() -> Table {
    Table {
        name: "Orders".to_string(),
        columns: vec![
            Column::new("order_id", SqlType::Integer),
            Column::new("customer_id", SqlType::Integer).not_null(),
            Column::new("order_date", SqlType::Date).not_null(),
            Column::new("table_no", SqlType::Integer).not_null(),
            Column::new("total_amount", SqlType::Real).not_null(),
            Column::new("payment_status", SqlType::Text).not_null(),
            Column::new("priority", SqlType::Text).default_literal("'Medium'"),
        ],
        constraints: vec![
            surrogate_pk("order_id"),
            greater_than("total_amount", 0.0),
            one_of("payment_status", PAYMENT_STATUSES),
            one_of("priority", PRIORITIES),
            fk_cascade(&["customer_id"], "Customers", &["customer_id"]),
        ],
    }
}

fn order_details() -> Table {
    Table {
        name: "Order_Details".to_string(),
        columns: vec![
            Column::new("detail_id", SqlType::Integer),
            Column::new("order_id", SqlType::Integer).not_null(),
            Column::new("item_id", SqlType::Integer).not_null(),
            Column::new("quantity", SqlType::Integer),
            Column::new("price_per_item", SqlType::Real),
        ],
        constraints: vec![
            surrogate_pk("detail_id"),
            greater_than("quantity", 0.0),
            greater_than("price_per_item", 0.0),
            fk(&["order_id"], "Orders", &["order_id"]),
            fk(&["item_id"], "Menu_Items", &["item_id"]),
        ],
    }
}

fn employees() -> Table {
    Table {
        name: "Employees".to_string(),
        columns: vec![
            Column::new("employee_id", SqlType::Integer),
            Column::new("name", SqlType::Text).not_null(),
            Column::new("role", SqlType::Text).not_null(),
            Column::new("salary", SqlType::Real),
            Column::new("hire_date", SqlType::Date).not_null(),
            Column::new("phone", SqlType::Text).not_null(),
            Column::new("email", SqlType::Text).not_null(),
        ],
        constraints: vec![
            surrogate_pk("employee_id"),
            one_of("role", EMPLOYEE_ROLES),
            greater_than("salary", 0.0),
            unique(&["email"]),
        ],
    }
}

fn tables() -> Table {
    Table {
        name: "Tables".to_string(),
        columns: vec![
            Column::new("table_no", SqlType::Integer),
            Column::new("status", SqlType::Text),
            Column::new("seating_capacity", SqlType::Integer),
            Column::new("location", SqlType::Text).not_null(),
            Column::new("reservation_allowed", SqlType::Text),
            Column::new("waiter_assigned", SqlType::Integer).not_null(),
        ],
        constraints: vec![
            surrogate_pk("table_no"),
            one_of("status", TABLE_STATUSES),
            greater_than("seating_capacity", 0.0),
            one_of("reservation_allowed", YES_NO),
            fk(&["waiter_assigned"], "Employees", &["employee_id"]),
        ],
    }
}

fn suppliers() -> Table {
    Table {
        name: "Suppliers".to_string(),
        columns: vec![
            Column::new("supplier_id", SqlType::Integer),
            Column::new("name", SqlType::Text).not_null(),
            Column::new("phone", SqlType::Text).not_null(),
            Column::new("email", SqlType::Text).not_null(),
            Column::new("address", SqlType::Text).not_null(),
            Column::new("supply_category", SqlType::Text).not_null(),
        ],
        constraints: vec![surrogate_pk("supplier_id"), unique(&["email"])],
    }
}

fn inventory() -> Table {
    Table {
        name: "Inventory".to_string(),
        columns: vec![
            Column::new("inventory_id", SqlType::Integer),
            Column::new("item_name", SqlType::Text).not_null(),
            Column::new("quantity", SqlType::Integer).not_null(),
            Column::new("supplier_id", SqlType::Integer).not_null(),
            Column::new("restock_date", SqlType::Date).not_null(),
        ],
        constraints: vec![
            surrogate_pk("inventory_id"),
            at_least("quantity", 0.0),
            fk(&["supplier_id"], "Suppliers", &["supplier_id"]),
        ],
    }
}

fn feedback() -> Table {
    Table {
        name: "Feedback".to_string(),
        columns: vec![
            Column::new("feedback_id", SqlType::Integer),
            Column::new("customer_id", SqlType::Integer).not_null(),
            Column::new("order_id", SqlType::Integer).not_null(),
            Column::new("rating", SqlType::Integer),
            Column::new("comments", SqlType::Text),
            Column::new("feedback_date", SqlType::Date).not_null(),
        ],
        constraints: vec![
            surrogate_pk("feedback_id"),
            between("rating", 1, 5),
            fk(&["customer_id"], "Customers", &["customer_id"]),
            fk(&["order_id"], "Orders", &["order_id"]),
        ],
    }
}

fn menu_supplier() -> Table {
    Table {
        name: "Menu_Supplier".to_string(),
        columns: vec![
            Column::new("menu_item_id", SqlType::Integer),
            Column::new("supplier_id", SqlType::Integer),
        ],
        constraints: vec![
            Constraint::PrimaryKey(PrimaryKey {
                columns: vec!["menu_item_id".to_string(), "supplier_id".to_string()],
                autoincrement: false,
            }),
            fk(&["menu_item_id"], "Menu_Items", &["item_id"]),
            fk(&["supplier_id"], "Suppliers", &["supplier_id"]),
        ],
    }
}

fn surrogate_pk(column: &str) -> Constraint {
    Constraint::PrimaryKey(PrimaryKey {
        columns: vec![column.to_string()],
        autoincrement: true,
    })
}

fn unique(columns: &[&str]) -> Constraint {
    Constraint::Unique(UniqueConstraint {
        columns: columns.iter().map(|column| column.to_string()).collect(),
    })
}

fn one_of(column: &str, allowed: &[&str]) -> Constraint {
    Constraint::Check(CheckConstraint {
        column: column.to_string(),
        rule: CheckRule::OneOf {
            allowed: allowed.iter().map(|value| value.to_string()).collect(),
        },
    })
}

fn greater_than(column: &str, min: f64) -> Constraint {
    Constraint::Check(CheckConstraint {
        column: column.to_string(),
        rule: CheckRule::GreaterThan { min },
    })
}

fn at_least(column: &str, min: f64) -> Constraint {
    Constraint::Check(CheckConstraint {
        column: column.to_string(),
        rule: CheckRule::AtLeast { min },
    })
}

fn between(column: &str, min: i64, max: i64) -> Constraint {
    Constraint::Check(CheckConstraint {
        column: column.to_string(),
        rule: CheckRule::Between { min, max },
    })
}

fn fk(columns: &[&str], referenced_table: &str, referenced_columns: &[&str]) -> Constraint {
    fk_with_action(columns, referenced_table, referenced_columns, FkAction::NoAction)
}

fn fk_cascade(columns: &[&str], referenced_table: &str, referenced_columns: &[&str]) -> Constraint {
    fk_with_action(columns, referenced_table, referenced_columns, FkAction::Cascade)
}

fn fk_with_action(
    columns: &[&str],
    referenced_table: &str,
    referenced_columns: &[&str],
    on_delete: FkAction,
) -> Constraint {
    Constraint::ForeignKey(ForeignKey {
        columns: columns.iter().map(|column| column.to_string()).collect(),
        referenced_table: referenced_table.to_string(),
        referenced_columns: referenced_columns
            .iter()
            .map(|column| column.to_string())
            .collect(),
        on_delete,
    })
}

fn index(name: &str, table: &str, columns: &[&str]) -> Index {
    Index {
        name: name.to_string(),
        table: table.to_string(),
        columns: columns.iter().map(|column| column.to_string()).collect(),
    }
}
