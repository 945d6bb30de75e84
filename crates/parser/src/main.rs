use clap::Parser;
use common::{get_model_files, AllResultsFormatter, Config};
use parser::{DeclareModel, ParseError};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ParseError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let config = Config::parse();

    if config.should_process_all() {
        run_all_models();
        return Ok(());
    }

    let source = fs::read_to_string(config.model())?;
    let model = DeclareModel::parse(&source)?;
    info!("Success parse model\n{model}");
    Ok(())
}

fn run_all_models() {
    let model_files = get_model_files();
    let mut formatter = AllResultsFormatter::new("parser", model_files.len());

    for file_path in &model_files {
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<non-utf8 name>");

        let outcome = fs::read_to_string(file_path)
            .map_err(ParseError::from)
            .and_then(|source| DeclareModel::parse(&source));

        match outcome {
            Ok(model) => {
                let stats = format!(
                    "events: {}, attributes: {}, constraints: {}",
                    model.events().len(),
                    model.attributes().len(),
                    model.constraints().len()
                );
                formatter.report_success(file_name, Some(&stats));
            }
            Err(err) => formatter.report_failure(file_name, Some(&err.to_string())),
        }
    }

    formatter.finish();
}
