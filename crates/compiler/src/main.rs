use compiler::{compile, decompose, ConditionSlot};
use parser::{DeclareModel, ParseError};
use std::env;
use std::fs;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ParseError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <model_file>", args[0]);
        eprintln!("Example:");
        eprintln!("  {} ./models/response.decl", args[0]);
        process::exit(1);
    }

    let source = fs::read_to_string(&args[1])?;
    let model = DeclareModel::parse(&source)?;
    info!(
        "Success parse model (constraints={})",
        model.constraints().len()
    );

    for (index, constraint) in model.constraints().iter().enumerate() {
        info!("#{} {}", index, constraint);
        let slots = [
            (ConditionSlot::Activation, constraint.activation_condition()),
            (
                ConditionSlot::Correlation,
                constraint.correlation_condition(),
            ),
        ];
        for (slot, text) in slots {
            let Some(text) = text else { continue };
            let compiled = compile(slot, text, constraint.line())?;
            info!("  {} condition: {}", slot, compiled.expr());
            for rule in decompose(&compiled, index) {
                info!("    {}", rule);
            }
        }
    }
    Ok(())
}
