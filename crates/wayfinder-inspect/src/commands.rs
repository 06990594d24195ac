//! Command execution against a built graph.
//!
//! Every command renders to a `String` so output can be tested without
//! capturing stdout.

use wayfinder_core::LocationGraph;
use wayfinder_graph::audit;
use wayfinder_types::LocationName;

use crate::cli::Command;

/// Render the output of `command` for `graph`.
pub fn execute(command: &Command, graph: &LocationGraph) -> Result<String, serde_json::Error> {
    let query = graph.query();

    let out = match command {
        Command::Dump => serde_json::to_string_pretty(graph.store())?,
        Command::Context { name } => match query.get_context(name, true) {
            Some(ctx) => {
                let chain: Vec<&str> = query
                    .containment_chain(name)
                    .into_iter()
                    .map(LocationName::as_str)
                    .collect();
                let json = serde_json::to_string_pretty(ctx)?;
                format!("{json}\nchain: {}", chain.join(" -> "))
            }
            None => format!("{name}: unknown location"),
        },
        Command::Ancestor { name } => match query.get_building_ancestor(name) {
            Some(building) => format!("{name} is inside {building}"),
            None => format!("{name} is not inside a building"),
        },
        Command::Door { from, to } => match query.door_toward(from, to) {
            Some(tile) => format!("{to} is reached from {from} at {tile}"),
            None => format!("{to} is not reachable from inside {from}"),
        },
        Command::Audit => {
            let violations = audit(graph.store(), graph.settings());
            if violations.is_empty() {
                format!("{} locations, no violations", graph.store().len())
            } else {
                violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };
    Ok(out)
}
