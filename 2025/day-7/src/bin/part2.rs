use miette::*;

use tachyon_manifold::{part2, RowPolicy};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/input2.txt").to_string());
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read puzzle input from {path}"))?;

    let result = match std::env::var("MANIFOLD_ROW_POLICY") {
        Ok(policy) => part2::process_with(&input, policy.parse::<RowPolicy>()?)?,
        Err(_) => part2::process(&input)?,
    };
    println!("Result: {}", result);
    Ok(())
}
