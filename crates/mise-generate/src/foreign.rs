use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use mise_schema::Table;

use crate::errors::GenerateError;
use crate::values::{Row, Value};

/// Committed parent rows available for foreign-key picks.
///
/// Tables are ingested in insertion order, so a child can only ever see
/// parents that were fully generated before it.
#[derive(Debug, Default)]
pub struct ForeignContext {
    rows: BTreeMap<String, Vec<Row>>,
    pk_index: BTreeMap<String, HashMap<String, usize>>,
}

impl ForeignContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fully generated table so later tables can reference it.
    pub fn ingest_table(&mut self, table: &Table, rows: &[Row]) {
        if let Some(pk_column) = table.surrogate_key() {
            let mut index = HashMap::with_capacity(rows.len());
            for (position, row) in rows.iter().enumerate() {
                if let Some(pk) = row.get(pk_column) {
                    index.insert(pk.key(), position);
                }
            }
            self.pk_index.insert(table.name.clone(), index);
        }

        self.rows.insert(table.name.clone(), rows.to_vec());
    }

    /// Pick one committed parent row uniformly at random.
    pub fn pick_parent(
        &self,
        table: &str,
        rng: &mut impl Rng,
    ) -> Result<&Row, GenerateError> {
        let rows = self.rows.get(table).ok_or_else(|| GenerateError::MissingParent {
            table: table.to_string(),
        })?;
        if rows.is_empty() {
            return Err(GenerateError::EmptyParent {
                table: table.to_string(),
            });
        }
        let index = rng.random_range(0..rows.len());
        Ok(&rows[index])
    }

    /// Resolve another column of the parent row identified by `pk`.
    pub fn lookup_parent(&self, table: &str, pk: &Value, column: &str) -> Option<&Value> {
        let position = *self.pk_index.get(table)?.get(&pk.key())?;
        self.rows.get(table)?.get(position)?.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use mise_schema::restaurant_catalog;

    fn supplier_rows(count: i64) -> Vec<Row> {
        (1..=count)
            .map(|id| {
                let mut row = Row::new();
                row.insert("supplier_id".to_string(), Value::Int(id));
                row.insert("name".to_string(), Value::Text(format!("Supplier {id}")));
                row
            })
            .collect()
    }

    #[test]
    fn picks_only_committed_rows() {
        let catalog = restaurant_catalog();
        let suppliers = catalog.table("Suppliers").unwrap();
        let rows = supplier_rows(5);

        let mut ctx = ForeignContext::new();
        ctx.ingest_table(suppliers, &rows);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let parent = ctx.pick_parent("Suppliers", &mut rng).unwrap();
            let id = parent.get("supplier_id").unwrap().as_i64().unwrap();
            assert!((1..=5).contains(&id));
        }
    }

    #[test]
    fn missing_and_empty_parents_are_errors() {
        let catalog = restaurant_catalog();
        let suppliers = catalog.table("Suppliers").unwrap();

        let mut ctx = ForeignContext::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(matches!(
            ctx.pick_parent("Suppliers", &mut rng),
            Err(GenerateError::MissingParent { .. })
        ));

        ctx.ingest_table(suppliers, &[]);
        assert!(matches!(
            ctx.pick_parent("Suppliers", &mut rng),
            Err(GenerateError::EmptyParent { .. })
        ));
    }

    #[test]
    fn lookup_resolves_sibling_column() {
        let catalog = restaurant_catalog();
        let suppliers = catalog.table("Suppliers").unwrap();
        let rows = supplier_rows(3);

        let mut ctx = ForeignContext::new();
        ctx.ingest_table(suppliers, &rows);

        let name = ctx
            .lookup_parent("Suppliers", &Value::Int(2), "name")
            .unwrap();
        assert_eq!(name.as_str(), Some("Supplier 2"));
        assert!(ctx.lookup_parent("Suppliers", &Value::Int(9), "name").is_none());
    }
}
