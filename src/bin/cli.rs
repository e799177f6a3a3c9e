use clap::{Parser, Subcommand, ValueEnum};
use paymsg_spec::*;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "paymsg")]
#[command(about = "Browse the payment message dictionary and validate message payloads")]
#[command(version)]
struct Cli {
    /// Load the dictionary from a directory instead of the embedded one
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON payload (reads stdin when no file is given)
    Validate {
        /// Path to the payload file
        file: Option<PathBuf>,
        /// Validate against this root instead of detecting it
        #[arg(short, long)]
        root: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Validator config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a sample payload (sale, refund, preauth, void, settlement, report, login, logout)
    Generate {
        kind: SampleKind,
        #[arg(short, long, default_value_t = 25.00)]
        amount: f64,
        /// Transaction to reference when generating a void
        #[arg(long)]
        original_transaction: Option<String>,
        /// Validate the generated payload and print the report to stderr
        #[arg(long)]
        check: bool,
    },
    /// List root message schemas
    Roots,
    /// Print the field tree of a root schema
    Tree { root: String },
    /// List specification types
    Types {
        /// List base types instead
        #[arg(long)]
        base: bool,
    },
    /// Show one specification or base type
    Type { name: String },
    /// List code sets, or the codes of one set
    Codes { set: Option<String> },
    /// Report dangling references in the dictionary
    CheckDictionary,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let dictionary = match &cli.dictionary {
        Some(dir) => {
            tracing::info!("Loading dictionary from {}", dir.display());
            Arc::new(SpecDictionary::from_dir(dir)?)
        }
        None => SpecDictionary::embedded(),
    };

    match cli.command {
        Commands::Validate {
            file,
            root,
            format,
            config,
        } => validate_payload(dictionary, file, root.as_deref(), format, config),
        Commands::Generate {
            kind,
            amount,
            original_transaction,
            check,
        } => generate_sample(dictionary, kind, amount, original_transaction, check),
        Commands::Roots => {
            for root in dictionary.roots() {
                println!("{root}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tree { root } => show_tree(&dictionary, &root),
        Commands::Types { base } => {
            list_types(&dictionary, base);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Type { name } => show_type(&dictionary, &name),
        Commands::Codes { set } => show_codes(&dictionary, set.as_deref()),
        Commands::CheckDictionary => {
            let issues = dictionary.check_integrity();
            if issues.is_empty() {
                println!("✅ Dictionary is consistent");
                return Ok(ExitCode::SUCCESS);
            }
            println!("❌ {} dictionary issues:", issues.len());
            for issue in issues {
                println!("  - {issue}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn validate_payload(
    dictionary: Arc<SpecDictionary>,
    file: Option<PathBuf>,
    root: Option<&str>,
    format: OutputFormat,
    config: Option<PathBuf>,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let text = match &file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let config = match config {
        Some(path) => ValidatorConfig::from_path(path)?,
        None => ValidatorConfig::default(),
    };
    if let Some(root) = root {
        if !dictionary.is_root(root) {
            return Err(PaymsgError::UnknownRoot {
                name: root.to_string(),
            }
            .into());
        }
    }

    let reporter = Reporter::from_config(&config.report);
    let selector = RootSelector::from_config(&config, &dictionary);
    let engine = SpecValidationEngine::new(dictionary, config);

    let outcome = validate_text(&engine, &selector, &text, root);
    if let Outcome::Validated { root, .. } = &outcome {
        tracing::info!("Validated payload against {}", root);
    }

    match format {
        OutputFormat::Json => println!("{}", reporter.render_json(&outcome)?),
        OutputFormat::Text => print!("{}", reporter.render_outcome_text(&outcome)),
    }

    Ok(if outcome.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn generate_sample(
    dictionary: Arc<SpecDictionary>,
    kind: SampleKind,
    amount: f64,
    original_transaction: Option<String>,
    check: bool,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let options = SampleOptions {
        amount,
        original_transaction,
        ..Default::default()
    };
    let payload = sample::generate(kind, &options);
    println!("{}", serde_json::to_string_pretty(&payload)?);

    if !check {
        return Ok(ExitCode::SUCCESS);
    }

    let engine = SpecValidationEngine::new(dictionary, ValidatorConfig::default());
    let result = engine.validate(kind.root(), &payload);
    eprint!("{}", Reporter::default().render_text(kind.root(), &result));
    Ok(if result.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn show_tree(
    dictionary: &SpecDictionary,
    root_name: &str,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let root = dictionary.root(root_name).ok_or_else(|| PaymsgError::UnknownRoot {
        name: root_name.to_string(),
    })?;

    println!("{root}");
    println!("{}", root.element);
    print_branch(&root.body, 1);
    println!("\n{} fields", root.body.leaf_count());
    Ok(ExitCode::SUCCESS)
}

fn print_branch(branch: &Branch, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, node) in &branch.children {
        match node {
            SchemaNode::Leaf(leaf) => {
                println!("{indent}{name}: {} {}", leaf.spec_type, leaf.cardinality)
            }
            SchemaNode::Branch(child) => {
                println!("{indent}{name}");
                print_branch(child, depth + 1);
            }
        }
    }
}

fn list_types(dictionary: &SpecDictionary, base: bool) {
    if base {
        for (name, info) in dictionary.base_types() {
            println!("{name:<16} {}", info.format);
        }
        return;
    }
    for spec_type in dictionary.spec_types() {
        println!("{spec_type}");
    }
}

fn show_type(
    dictionary: &SpecDictionary,
    name: &str,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    if let Some(spec_type) = dictionary.spec_type(name) {
        println!("Specification Type: {}", spec_type.name);
        println!("==================");
        println!("Type: {}", spec_type.kind);
        println!("Base type: {}", dictionary.effective_base_type(spec_type));
        if let Some(length) = &spec_type.length {
            println!("Length: {length}");
        }
        if let Some(description) = &spec_type.description {
            println!("Description: {description}");
        }
        if let Some(code_set) = &spec_type.code_set {
            println!("Code set: {code_set}");
            if let Some(set) = dictionary.code_set(code_set) {
                println!("  {}", set.codes().collect::<Vec<_>>().join(", "));
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(info) = dictionary.base_type_info(name) {
        println!("Base Type: {name}");
        println!("==================");
        println!("Definition: {}", info.definition);
        println!("Format: {}", info.format);
        println!("Example: {}", info.example);
        if let Some(notes) = &info.notes {
            println!("Notes: {notes}");
        }
        if let Some(reference) = &info.reference {
            println!("Reference: {reference}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!("❌ Type not found: {name}");
    Ok(ExitCode::FAILURE)
}

fn show_codes(
    dictionary: &SpecDictionary,
    set: Option<&str>,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(set_name) = set else {
        for (name, set) in dictionary.code_sets() {
            println!("{name} ({} codes)", set.len());
        }
        return Ok(ExitCode::SUCCESS);
    };

    let Some(code_set) = dictionary.code_set(set_name) else {
        println!("❌ Code set not found: {set_name}");
        return Ok(ExitCode::FAILURE);
    };

    for entry in &code_set.entries {
        let label = entry.label.as_deref().unwrap_or("");
        match &entry.description {
            Some(description) => println!("{:<6} {label} - {description}", entry.code),
            None => println!("{:<6} {label}", entry.code),
        }
    }
    Ok(ExitCode::SUCCESS)
}
