//! Basic arithmetic

use super::{PrimitiveType, ToolDefinition, ToolProvider, ToolSignature};
use tracing::info;

pub struct CalculatorTools;

impl ToolProvider for CalculatorTools {
    fn namespace(&self) -> &str {
        "Calculator"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolSignature::new("add", "Add two integers")
                .param("a", PrimitiveType::Int, "First addend")
                .param("b", PrimitiveType::Int, "Second addend")
                .handler(|args| {
                    let (a, b) = (args.int(0)?, args.int(1)?);
                    info!("add: {} + {}", a, b);
                    Ok(a.wrapping_add(b).to_string())
                }),
            ToolSignature::new("subtract", "Subtract one integer from another")
                .param("a", PrimitiveType::Int, "Minuend")
                .param("b", PrimitiveType::Int, "Subtrahend")
                .handler(|args| {
                    let (a, b) = (args.int(0)?, args.int(1)?);
                    info!("subtract: {} - {}", a, b);
                    Ok(a.wrapping_sub(b).to_string())
                }),
            ToolSignature::new("multiply", "Multiply two integers")
                .param("a", PrimitiveType::Int, "First factor")
                .param("b", PrimitiveType::Int, "Second factor")
                .handler(|args| {
                    let (a, b) = (args.int(0)?, args.int(1)?);
                    info!("multiply: {} * {}", a, b);
                    Ok(a.wrapping_mul(b).to_string())
                }),
            ToolSignature::new("divide", "Divide two numbers, result to four decimal places")
                .param("a", PrimitiveType::Double, "Dividend")
                .param("b", PrimitiveType::Double, "Divisor, must not be zero")
                .handler(|args| {
                    let (a, b) = (args.double(0)?, args.double(1)?);
                    info!("divide: {} / {}", a, b);
                    if b == 0.0 {
                        return Ok("Error: division by zero".to_string());
                    }
                    Ok(format!("{:.4}", a / b))
                }),
            ToolSignature::new("sqrt", "Square root of a number")
                .param("number", PrimitiveType::Double, "Number to take the square root of, must not be negative")
                .handler(|args| {
                    let number = args.double(0)?;
                    info!("sqrt: {}", number);
                    if number < 0.0 {
                        return Ok("Error: cannot take the square root of a negative number".to_string());
                    }
                    Ok(format!("{:.4}", number.sqrt()))
                }),
            ToolSignature::new("power", "Raise a number to a power")
                .param("base", PrimitiveType::Double, "Base")
                .param("exponent", PrimitiveType::Double, "Exponent")
                .handler(|args| {
                    let (base, exponent) = (args.double(0)?, args.double(1)?);
                    info!("power: {} ^ {}", base, exponent);
                    Ok(format!("{:.4}", base.powf(exponent)))
                }),
        ]
    }
}
