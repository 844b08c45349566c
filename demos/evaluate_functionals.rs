/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Evaluate every registered functional on a small grid
//!
//! Run with `RUST_LOG=debug cargo run --example evaluate_functionals`.

use anyhow::{Context, Result};
use dft_functionals::catalogue::{available_identifiers, functional_from_identifier};
use dft_functionals::evaluation::{kernel_terms, potential_terms, GridBatch};
use dft_functionals::functional::Functional;
use ndarray::array;

fn main() -> Result<()> {
    env_logger::init();

    let rho = array![[1e-16, 0.05, 0.5, 2.0]];
    let sigma = array![[0.0, 0.01, 0.2, 1.5]];
    let tau = array![[0.0, 0.02, 0.6, 6.0]];
    let lapl = array![[0.0, -0.1, 0.3, 1.0]];
    let batch = GridBatch::meta_gga_laplacian(rho.view(), sigma.view(), tau.view(), lapl.view());

    for name in available_identifiers() {
        let functional = functional_from_identifier::<f64>(name)?;
        let terms = potential_terms(&functional, &batch)
            .with_context(|| format!("potential terms of {}", name))?;

        println!("{} ({} {})", name, functional.family(), functional.kind());
        if let Some(e) = &terms.e {
            println!("  e   = {:?}", e.as_slice().unwrap_or_default());
        }
        for term in terms.names().iter().filter(|term| term.as_str() != "e") {
            if let Some(values) = terms.get(term) {
                println!("  {:<3} = {:?}", term, values.iter().collect::<Vec<_>>());
            }
        }
    }

    let pbe = functional_from_identifier::<f64>("gga_x_pbe")?;
    let kernel = kernel_terms(&pbe, &batch)?;
    println!("gga_x_pbe kernel terms: {:?}", kernel.names());

    let softened = pbe.change_parameters(&pbe.parameters().with_value("kappa", 0.5))?;
    let softened_terms = potential_terms(&softened, &batch)?;
    println!(
        "'{}' with kappa = 0.5: Vσ = {:?}",
        softened.identifier(),
        softened_terms.v_sigma
    );
    Ok(())
}
