use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constraints::Constraint;
use crate::error::{Error, Result};
use crate::schema::Catalog;

/// Summary of the FK dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FkGraphReport {
    pub nodes: usize,
    pub edges: usize,
    pub order: Vec<String>,
}

/// Derive a deterministic parent-before-child insertion order for the catalog.
///
/// Self-references and cycles have no valid single-pass insertion order and
/// are reported as a fatal error naming the offending tables.
pub fn insertion_order(catalog: &Catalog) -> Result<FkGraphReport> {
    let graph = build_adjacency(catalog);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();

    let order = toposort(&graph).map_err(Error::CyclicGraph)?;

    Ok(FkGraphReport {
        nodes,
        edges,
        order,
    })
}

fn build_adjacency(catalog: &Catalog) -> BTreeMap<String, BTreeSet<String>> {
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for table in &catalog.tables {
        graph.entry(table.name.clone()).or_default();

        for constraint in &table.constraints {
            if let Constraint::ForeignKey(fk) = constraint {
                graph
                    .entry(fk.referenced_table.clone())
                    .or_default()
                    .insert(table.name.clone());
            }
        }
    }

    graph
}

fn toposort(graph: &BTreeMap<String, BTreeSet<String>>) -> std::result::Result<Vec<String>, Vec<String>> {
    let mut indegree: BTreeMap<String, usize> = BTreeMap::new();

    for node in graph.keys() {
        indegree.entry(node.clone()).or_insert(0);
    }

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(target.clone()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<String> = indegree
        .iter()
        .filter_map(|(node, count)| if *count == 0 { Some(node.clone()) } else { None })
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.iter().next().cloned() {
        ready.remove(&node);
        order.push(node.clone());

        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.clone());
                    }
                }
            }
        }
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        let cycle: Vec<String> = indegree
            .into_iter()
            .filter_map(|(node, count)| if count > 0 { Some(node) } else { None })
            .collect();
        Err(cycle)
    }
}
