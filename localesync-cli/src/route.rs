use crate::config::{CommonArgs, resolve_catalog};
use crate::validation::validate_language_code;
use localesync::TranslationGraph;

/// Print the hops the dispatcher would take for `source -> target` once indirect routing is on.
pub fn run_route_command(common: CommonArgs, source: String, target: String) -> Result<(), String> {
    validate_language_code(&source)?;
    validate_language_code(&target)?;
    let graph = TranslationGraph::new(&resolve_catalog(&common)?);

    if graph.is_directly_supported(&source, &target) {
        println!("{}-{} (direct)", source, target);
        return Ok(());
    }

    let route = graph.route(&source, &target).map_err(|e| e.to_string())?;
    if route.is_empty() {
        println!("{} (identity)", source);
        return Ok(());
    }
    let hops: Vec<String> = route.iter().map(ToString::to_string).collect();
    println!("{}", hops.join(" -> "));
    Ok(())
}
