use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use mise_schema::{Catalog, Table, insertion_order, validate_catalog};

use crate::checks::{CheckOutcome, evaluate_check};
use crate::errors::GenerateError;
use crate::foreign::ForeignContext;
use crate::profile::Profile;
use crate::report::{RunReport, TableReport};
use crate::values::{Row, Value};

/// Options for a population run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Attempt budget per row before the run aborts.
    pub max_attempts_row: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts_row: 64,
        }
    }
}

/// All generated rows for one table, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRows {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Finished dataset plus the run report. Tables appear parent-before-child.
#[derive(Debug, Clone)]
pub struct Population {
    pub tables: Vec<TableRows>,
    pub report: RunReport,
}

impl Population {
    pub fn table(&self, name: &str) -> Option<&TableRows> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// Entry point for generating a dataset from catalog + profile.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, catalog: &Catalog, profile: &Profile) -> Result<Population, GenerateError> {
        let start = Instant::now();
        validate_catalog(catalog)?;
        let graph = insertion_order(catalog)?;

        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = RunReport::new(run_id.clone(), seed);
        let mut foreign = ForeignContext::new();
        let mut tables = Vec::with_capacity(graph.order.len());

        info!(
            run_id = %run_id,
            seed,
            tables = graph.order.len(),
            "population started"
        );

        for table_name in &graph.order {
            let table = catalog
                .table(table_name)
                .ok_or_else(|| mise_schema::Error::UnknownTable(table_name.clone()))?;
            let rows_requested = profile.rows_for(table_name);
            let table_seed = hash_seed(seed, table_name);
            let table_start = Instant::now();

            let generated = generate_table(
                table,
                profile,
                &foreign,
                table_seed,
                rows_requested,
                self.options.max_attempts_row,
            )?;

            info!(
                table = %table_name,
                rows = generated.rows.len(),
                retries = generated.retries,
                duration_ms = table_start.elapsed().as_millis() as u64,
                "table generated"
            );

            foreign.ingest_table(table, &generated.rows);
            report.retries_total += generated.retries;
            report.tables.push(TableReport {
                table: table_name.clone(),
                rows_requested,
                rows_generated: generated.rows.len() as u64,
                retries: generated.retries,
            });
            tables.push(TableRows {
                name: table_name.clone(),
                rows: generated.rows,
            });
        }

        apply_aggregates(&mut tables, profile);

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            retries = report.retries_total,
            duration_ms = report.duration_ms,
            "population completed"
        );

        Ok(Population { tables, report })
    }
}

struct GeneratedTable {
    rows: Vec<Row>,
    retries: u64,
}

fn generate_table(
    table: &Table,
    profile: &Profile,
    foreign: &ForeignContext,
    table_seed: u64,
    rows_requested: u64,
    max_attempts_row: u32,
) -> Result<GeneratedTable, GenerateError> {
    let unique_specs = unique_specs(table);
    let mut seen: Vec<HashSet<String>> = vec![HashSet::new(); unique_specs.len()];
    let mut rows = Vec::with_capacity(rows_requested as usize);
    let mut retries = 0_u64;

    for row_index in 0..rows_requested {
        let mut attempts = 0_u32;
        loop {
            attempts += 1;
            if attempts > max_attempts_row {
                return Err(GenerateError::RetriesExhausted {
                    table: table.name.clone(),
                    row: row_index,
                    attempts: max_attempts_row,
                });
            }

            let mut rng = ChaCha8Rng::seed_from_u64(row_seed(table_seed, row_index, attempts));
            let mut row = Row::new();

            // Surrogate identities are sequential from 1, matching SQLite
            // autoincrement for a freshly created table.
            if let Some(pk_column) = table.surrogate_key() {
                row.insert(pk_column.to_string(), Value::Int(row_index as i64 + 1));
            }

            apply_foreign_keys(table, &mut row, foreign, profile, &mut rng)?;

            for column in &table.columns {
                if row.contains_key(&column.name) {
                    continue;
                }

                let rule = profile.rule_for(&table.name, &column.name).ok_or_else(|| {
                    GenerateError::MissingRule {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    }
                })?;
                let value = rule.generate(&row, foreign, profile.base_date, &mut rng)?;

                // A null on a NOT NULL column is a profile bug, not a
                // transient collision; abort instead of retrying.
                if value.is_null() && column.not_null {
                    return Err(GenerateError::NullViolation {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }

                row.insert(column.name.clone(), value);
            }

            if table
                .check_constraints()
                .any(|check| evaluate_check(check, &row) == CheckOutcome::Failed)
            {
                retries += 1;
                continue;
            }

            if !claim_unique(&unique_specs, &mut seen, &row) {
                retries += 1;
                continue;
            }

            rows.push(row);
            break;
        }
    }

    Ok(GeneratedTable { rows, retries })
}

fn apply_foreign_keys(
    table: &Table,
    row: &mut Row,
    foreign: &ForeignContext,
    profile: &Profile,
    rng: &mut ChaCha8Rng,
) -> Result<(), GenerateError> {
    for fk in table.foreign_keys() {
        // A profile rule on every column of the key takes over the pick,
        // e.g. copying the key from a sibling parent row.
        if fk
            .columns
            .iter()
            .all(|column| profile.rule_for(&table.name, column).is_some())
        {
            continue;
        }

        let parent = foreign.pick_parent(&fk.referenced_table, rng)?;
        for (child_column, parent_column) in fk.columns.iter().zip(&fk.referenced_columns) {
            let value = parent.get(parent_column).cloned().ok_or_else(|| {
                GenerateError::InvalidProfile(format!(
                    "referenced column '{}.{}' missing from parent row",
                    fk.referenced_table, parent_column
                ))
            })?;
            row.insert(child_column.clone(), value);
        }
    }
    Ok(())
}

/// Column sets that must be pairwise distinct: declared uniques plus any
/// non-surrogate (composite) primary key.
fn unique_specs(table: &Table) -> Vec<Vec<String>> {
    let mut specs: Vec<Vec<String>> = table
        .unique_constraints()
        .map(|unique| unique.columns.clone())
        .collect();

    if table.surrogate_key().is_none()
        && let Some(pk) = table.primary_key()
    {
        specs.push(pk.columns.clone());
    }

    specs
}

/// Check all unique keys of a row, then claim them atomically. Keys with a
/// null component are exempt from uniqueness.
fn claim_unique(specs: &[Vec<String>], seen: &mut [HashSet<String>], row: &Row) -> bool {
    let mut keys: Vec<Option<String>> = Vec::with_capacity(specs.len());

    for spec in specs {
        let mut parts = Vec::with_capacity(spec.len());
        let mut has_null = false;
        for column in spec {
            match row.get(column) {
                Some(value) if !value.is_null() => parts.push(value.key()),
                _ => {
                    has_null = true;
                    break;
                }
            }
        }
        keys.push(if has_null { None } else { Some(parts.join("\u{1f}")) });
    }

    for (key, bucket) in keys.iter().zip(seen.iter()) {
        if let Some(key) = key
            && bucket.contains(key)
        {
            return false;
        }
    }

    for (key, bucket) in keys.into_iter().zip(seen.iter_mut()) {
        if let Some(key) = key {
            bucket.insert(key);
        }
    }

    true
}

fn apply_aggregates(tables: &mut [TableRows], profile: &Profile) {
    for aggregate in &profile.aggregates {
        let mut sums: HashMap<String, f64> = HashMap::new();

        if let Some(child) = tables.iter().find(|table| table.name == aggregate.child_table) {
            for row in &child.rows {
                let Some(fk) = row.get(aggregate.child_fk) else {
                    continue;
                };
                let (Some(quantity), Some(price)) = (
                    row.get(aggregate.quantity_column).and_then(Value::as_f64),
                    row.get(aggregate.price_column).and_then(Value::as_f64),
                ) else {
                    continue;
                };
                *sums.entry(fk.key()).or_insert(0.0) += quantity * price;
            }
        }

        let Some(parent) = tables.iter_mut().find(|table| table.name == aggregate.table) else {
            continue;
        };

        for row in &mut parent.rows {
            let Some(key) = row.get(aggregate.key_column).map(Value::key) else {
                continue;
            };
            // Parents with no children keep their sampled placeholder.
            if let Some(total) = sums.get(&key)
                && *total > 0.0
            {
                row.insert(
                    aggregate.target_column.to_string(),
                    Value::Real((total * 100.0).round() / 100.0),
                );
            }
        }
    }
}

fn hash_seed(seed: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

fn row_seed(table_seed: u64, row_index: u64, attempt: u32) -> u64 {
    let mut hasher = DefaultHasher::new();
    table_seed.hash(&mut hasher);
    row_index.hash(&mut hasher);
    attempt.hash(&mut hasher);
    hasher.finish()
}
