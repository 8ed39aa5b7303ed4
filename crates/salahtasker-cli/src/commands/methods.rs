//! Print the calculation-method vocabulary.

use salahtasker_core::{CalculationMethod, DEFAULT_METHOD};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for method in CalculationMethod::ALL {
        let marker = if method.id() == DEFAULT_METHOD {
            " (default)"
        } else {
            ""
        };
        println!("{:>3}  {}{marker}", method.id(), method.name());
    }
    Ok(())
}
