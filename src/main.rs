//! mold's main application entry point and command dispatch.
//! Wires argument parsing, data loading, placeholder discovery and the
//! template tree walk together.

use std::fs;
use std::path::{Path, PathBuf};

use mold::{
    analyzer,
    cli::{get_args, Args, Command},
    constants::SAMPLE_DATA_FILES,
    error::{default_error_handler, Error, Result},
    loader::load_data_file,
    processor::Processor,
    renderer::Renderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Apply { template, data_file, output } => {
            run_apply(&template, data_file.as_deref(), &output)
        }
        Command::Placeholders { template } => run_placeholders(&template),
        Command::List { dir } => run_list(&dir),
        Command::Init { dir } => run_init(&dir),
    }
}

/// Runs the full apply operation: load the data context, then walk the
/// template tree rendering and copying entries into the output tree.
fn run_apply(template: &Path, data_file: Option<&Path>, output: &Path) -> Result<()> {
    let data_file = data_file.ok_or_else(|| missing_data_file_error(template))?;

    if !template.exists() {
        return Err(Error::NotFound { path: template.to_path_buf() });
    }

    println!("Applying template from: {}", template.display());
    let data = load_data_file(data_file)?;

    let renderer = Renderer::new();
    let processor = Processor::new(&renderer, template, output, &data);
    processor.apply()?;

    println!("Successfully applied template to: {}", output.display());
    Ok(())
}

/// Builds the missing --data-file error, hinting at a sample data file
/// shipped inside the template directory when one exists.
fn missing_data_file_error(template: &Path) -> Error {
    for sample in SAMPLE_DATA_FILES {
        let candidate = template.join(sample);
        if candidate.exists() {
            return Error::ConfigError(format!(
                "the --data-file flag is required for rendering templates. \
                 Hint: found '{}', you can copy and edit it for your data",
                candidate.display()
            ));
        }
    }
    Error::ConfigError("the --data-file flag is required for rendering templates".to_string())
}

/// Reports the placeholders a template tree references. Discovery is
/// advisory: files that fail to parse are reported but do not abort the
/// listing of placeholders found in valid files.
fn run_placeholders(template: &Path) -> Result<()> {
    let report = analyzer::scan_tree(template)?;

    if report.placeholders.is_empty() {
        println!("No placeholders found in '{}'.", template.display());
    } else {
        println!("Placeholders referenced by '{}':", template.display());
        for name in &report.placeholders {
            println!("  - {}", name);
        }
    }

    for (path, err) in &report.failures {
        eprintln!("warning: could not analyze '{}': {}", path.display(), err);
    }
    Ok(())
}

/// Lists template sets (subdirectories) under the templates directory.
fn run_list(dir: &Path) -> Result<()> {
    if !dir.exists() {
        println!("Directory '{}' not found.", dir.display());
        println!("Run 'mold init --dir {}' to create it.", dir.display());
        return Ok(());
    }

    let mut templates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            templates.push(entry.path());
        }
    }
    templates.sort();

    if templates.is_empty() {
        println!("No templates found in the '{}' directory.", dir.display());
        return Ok(());
    }

    println!("Available templates:");
    for template in templates {
        if let Some(name) = template.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }
    Ok(())
}

/// Creates the templates directory with a .gitkeep placeholder.
fn run_init(dir: &Path) -> Result<()> {
    if dir.exists() {
        println!("Directory '{}' already exists. Nothing to do.", dir.display());
        return Ok(());
    }

    fs::create_dir_all(dir)?;
    fs::write(dir.join(".gitkeep"), "")?;

    println!("Successfully created directory: {}", dir.display());
    println!("You can now add your project templates inside this directory.");
    Ok(())
}
