use clap::Parser;
use common::{get_model_files, AllResultsFormatter, Config};
use generator::LpProgram;
use parser::{DeclareModel, ParseError};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ParseError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let config = Config::parse();

    if config.should_process_all() {
        run_all_models(&config);
        return Ok(());
    }

    let program = generate(Path::new(config.model()))?;

    if config.output_to_stdout() {
        print!("{program}");
        return Ok(());
    }

    let target = config.program_path();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, program.to_string())?;
    info!(
        "Generated {} ({} statements)",
        target.display(),
        program.statement_count()
    );
    Ok(())
}

fn generate(path: &Path) -> Result<LpProgram, ParseError> {
    let source = fs::read_to_string(path)?;
    let model = DeclareModel::parse(&source)?;
    LpProgram::from_model(&model)
}

fn run_all_models(config: &Config) {
    let model_files = get_model_files();
    let mut formatter = AllResultsFormatter::new("generator", model_files.len());

    for file_path in &model_files {
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<non-utf8 name>");

        match generate(file_path) {
            Ok(program) => {
                if config.output_to_stdout() {
                    print!("{program}");
                }
                let stats = format!("{} statements", program.statement_count());
                formatter.report_success(file_name, Some(&stats));
            }
            Err(err) => formatter.report_failure(file_name, Some(&err.to_string())),
        }
    }

    formatter.finish();
}
