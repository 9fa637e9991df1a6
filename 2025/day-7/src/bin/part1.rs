use miette::*;

use tachyon_manifold::{part1, RowPolicy};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/input1.txt").to_string());
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read puzzle input from {path}"))?;

    let result = match std::env::var("MANIFOLD_ROW_POLICY") {
        Ok(policy) => part1::process_with(&input, policy.parse::<RowPolicy>()?)?,
        Err(_) => part1::process(&input)?,
    };
    println!("Result: {}", result);
    Ok(())
}
