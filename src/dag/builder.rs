// src/dag/builder.rs

//! Turning a validated task list into the registry and wait-set map, plus
//! the graph checks that must pass before scheduling starts.

use std::collections::BTreeSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info};

use crate::config::TaskSpec;
use crate::dag::registry::TaskRegistry;
use crate::dag::task::{Task, TaskKind, TaskName};
use crate::dag::waitset::WaitSets;
use crate::errors::{Result, WavedagError};

/// Build the task registry and the wait-set map from the task list.
///
/// Absent `dependencies` default to the empty set. Fails on the first
/// repeated name (`DuplicateTask`) or unrecognised kind (`UnsupportedKind`).
pub fn build(specs: &[TaskSpec]) -> Result<(TaskRegistry, WaitSets)> {
    let mut registry = TaskRegistry::new();
    let mut waitsets = WaitSets::new();

    for spec in specs {
        let kind = spec
            .kind
            .parse::<TaskKind>()
            .map_err(|kind| WavedagError::UnsupportedKind {
                task: spec.name.clone(),
                kind,
            })?;

        let deps: BTreeSet<TaskName> = spec.declared_dependencies().iter().cloned().collect();

        registry.insert(Task::new(
            spec.name.clone(),
            kind,
            spec.arguments.clone(),
            deps.clone(),
        ))?;
        waitsets.insert(spec.name.clone(), deps);
    }

    debug!(tasks = registry.len(), "task registry built");
    Ok((registry, waitsets))
}

/// Every task reachable from `name` by following dependency links, at any
/// depth. `name` itself is only included if it lies on a cycle.
///
/// Each call starts from an empty set.
pub fn transitive_closure(name: &str, registry: &TaskRegistry) -> Result<BTreeSet<TaskName>> {
    let root = registry
        .get(name)
        .ok_or_else(|| WavedagError::UnknownDependency {
            task: None,
            dependency: name.to_string(),
        })?;

    let mut closure: BTreeSet<TaskName> = BTreeSet::new();
    // (referrer, dependency)
    let mut stack: Vec<(&str, &str)> = root
        .dependencies
        .iter()
        .map(|dep| (name, dep.as_str()))
        .collect();

    while let Some((referrer, dep)) = stack.pop() {
        if closure.contains(dep) {
            continue;
        }

        let task = registry
            .get(dep)
            .ok_or_else(|| WavedagError::UnknownDependency {
                task: Some(referrer.to_string()),
                dependency: dep.to_string(),
            })?;

        closure.insert(dep.to_string());
        stack.extend(task.dependencies.iter().map(|next| (dep, next.as_str())));
    }

    Ok(closure)
}

/// Restrict a run to `explicit` tasks plus everything they transitively
/// depend on. An empty selection returns the input unchanged.
pub fn filter_to_explicit(
    mut registry: TaskRegistry,
    mut waitsets: WaitSets,
    explicit: &[TaskName],
) -> Result<(TaskRegistry, WaitSets)> {
    if explicit.is_empty() {
        return Ok((registry, waitsets));
    }

    let unknown: BTreeSet<TaskName> = explicit
        .iter()
        .filter(|name| !registry.contains(name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(WavedagError::UnknownTask(unknown.into_iter().collect()));
    }

    let mut selected: BTreeSet<TaskName> = BTreeSet::new();
    let mut invalid: BTreeSet<TaskName> = BTreeSet::new();
    for name in explicit {
        selected.insert(name.clone());
        match transitive_closure(name, &registry) {
            Ok(closure) => selected.extend(closure),
            Err(WavedagError::UnknownDependency { dependency, .. }) => {
                invalid.insert(dependency);
            }
            Err(err) => return Err(err),
        }
    }
    if !invalid.is_empty() {
        return Err(WavedagError::InvalidDependencies(invalid.into_iter().collect()));
    }

    registry.retain(|name| selected.contains(name));
    waitsets.retain(|name| selected.contains(name));

    info!(
        ?explicit,
        selected = selected.len(),
        "run restricted to explicit tasks and their dependencies"
    );
    Ok((registry, waitsets))
}

/// Check that the graph can run to completion: every dependency resolves
/// and a topological order exists.
pub fn ensure_schedulable(registry: &TaskRegistry) -> Result<()> {
    for task in registry.iter() {
        for dep in &task.dependencies {
            if dep == &task.name {
                return Err(WavedagError::CyclicDependency(format!(
                    "task '{}' depends on itself",
                    task.name
                )));
            }
            if !registry.contains(dep) {
                return Err(WavedagError::UnknownDependency {
                    task: Some(task.name.clone()),
                    dependency: dep.clone(),
                });
            }
        }
    }

    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for name in registry.names() {
        graph.add_node(name);
    }
    for task in registry.iter() {
        for dep in &task.dependencies {
            graph.add_edge(dep.as_str(), task.name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(WavedagError::CyclicDependency(format!(
            "cycle involving task '{}'",
            cycle.node_id()
        ))),
    }
}
