//! Automaton Logic - Command Line Interface
//!
//! Minimise expressions and PLA files, and derive the equations of automata
//! described in JSON.

use automaton_logic::automaton::{
    calculate_needed_variables, check_dont_care, AutomatonNode, RenderedEquation, Transition,
};
use automaton_logic::expression::grammar_text;
use automaton_logic::minimize::minimize_truth_table;
use automaton_logic::tree::Variable;
use automaton_logic::{
    Automaton, Espresso, EspressoConfig, ExpressionParser, MinimizationLevel, MinimizationMode,
    Minimizable, MinimizerEngine, SymbolTable, TruthTable,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "automaton-logic")]
#[command(about = "Boolean equations and state machine logic", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minimise a single expression
    Minimize {
        /// The expression to minimise
        expression: String,
        /// Don't-care expression over the inputs
        #[arg(short = 'd', long = "dont-care")]
        dont_care: Option<String>,
        /// JSON symbol table with operator glyphs and names
        #[arg(short, long, value_name = "FILE")]
        symbols: Option<PathBuf>,
        /// Automaton whose state variables may be written without prefix
        #[arg(short, long)]
        automaton: Option<usize>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Derive the equations of every automaton in a JSON system description
    Equations {
        #[arg(value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_enum, default_value = "minimized")]
        level: Level,
        /// Also check every state for complete and contradiction-free guards
        #[arg(short, long)]
        check: bool,
        /// Also print the transitions the derived equations realise
        #[arg(long)]
        hardware: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Minimise a PLA file and print the resulting cubes
    Pla {
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Print one sum of products per output instead of cubes
        #[arg(short, long)]
        expressions: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the grammar accepted for the configured operators
    Grammar {
        #[arg(short, long, value_name = "FILE")]
        symbols: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Compute a minimum cover instead of running the heuristic
    #[arg(long)]
    exact: bool,
    /// Expand each cube in a single pass (fast)
    #[arg(long)]
    single_expand: bool,
    /// Keep essential primes in the iteration
    #[arg(long)]
    keep_essential: bool,
    /// Try all reduction directions before giving up
    #[arg(long)]
    super_gasp: bool,
}

impl EngineArgs {
    fn engine(&self) -> Espresso {
        let config = EspressoConfig {
            single_expand: self.single_expand,
            remove_essential: !self.keep_essential,
            use_super_gasp: self.super_gasp,
            ..EspressoConfig::default()
        };
        let mode = if self.exact {
            MinimizationMode::Exact
        } else {
            MinimizationMode::Heuristic
        };
        Espresso::new(config, mode)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    /// Equations as derived
    Unminimized,
    /// Minimised without don't-cares
    Minimized,
    /// Minimised with the system's don't-care expression
    HStar,
}

impl From<Level> for MinimizationLevel {
    fn from(val: Level) -> Self {
        match val {
            Level::Unminimized => MinimizationLevel::Unminimized,
            Level::Minimized => MinimizationLevel::Minimized,
            Level::HStar => MinimizationLevel::HStarMinimized,
        }
    }
}

/// System description read by the `equations` command
///
/// Conditions and guards are expression text in the glyphs of `symbols`.
#[derive(Debug, Deserialize)]
struct SystemFile {
    symbols: SymbolTable,
    automata: Vec<AutomatonFile>,
    #[serde(default)]
    dont_care: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutomatonFile {
    id: usize,
    name: String,
    nodes: Vec<NodeFile>,
    #[serde(default)]
    transitions: Vec<TransitionFile>,
}

#[derive(Debug, Deserialize)]
struct NodeFile {
    id: usize,
    state: usize,
    /// Output name to condition
    #[serde(default)]
    outputs: Vec<(String, String)>,
    /// Control signal number to condition
    #[serde(default)]
    control_signals: Vec<(usize, String)>,
}

#[derive(Debug, Deserialize)]
struct TransitionFile {
    from: usize,
    to: usize,
    guard: String,
}

#[derive(Debug, Serialize)]
struct AutomatonReport {
    automaton: String,
    z_equations: Vec<RenderedEquation>,
    output_equations: Vec<RenderedEquation>,
    control_signal_equations: Vec<RenderedEquation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    incomplete: Vec<(usize, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    contradictions: Vec<(usize, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hardware_transitions: Vec<HardwareTransition>,
}

/// Transition of the realised automaton that can actually fire
#[derive(Debug, Serialize)]
struct HardwareTransition {
    from: usize,
    to: usize,
    guard: String,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Minimize {
            expression,
            dont_care,
            symbols,
            automaton,
            engine,
        } => minimize_expression(&expression, dont_care.as_deref(), symbols.as_deref(), automaton, &engine),
        Command::Equations {
            input,
            level,
            check,
            hardware,
            json,
            engine,
        } => equations(&input, level.into(), check, hardware, json, &engine),
        Command::Pla {
            input,
            expressions,
            engine,
        } => minimize_pla(&input, expressions, &engine),
        Command::Grammar { symbols } => {
            println!("{}", grammar_text(&load_symbols(symbols.as_deref())?.operators));
            Ok(())
        }
    }
}

fn load_symbols(path: Option<&Path>) -> Result<SymbolTable, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Error reading symbol table '{}': {}", path.display(), e))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(SymbolTable::default()),
    }
}

fn minimize_expression(
    expression: &str,
    dont_care: Option<&str>,
    symbols: Option<&Path>,
    automaton: Option<usize>,
    engine: &EngineArgs,
) -> Result<(), Box<dyn Error>> {
    let symbols = load_symbols(symbols)?;
    let parser = ExpressionParser::for_symbols(&symbols);

    let root = parser.parse(expression, &symbols, automaton)?;
    let dont_care = dont_care
        .map(|text| parser.parse(text, &symbols, automaton))
        .transpose()?;
    if let Some(dc) = &dont_care {
        check_dont_care(dc)?;
    }

    let minimized = root.minimize_with(&engine.engine(), dont_care.as_ref())?;
    println!("{}", minimized.to_custom_string(&symbols));
    Ok(())
}

fn build_automaton(
    file: &AutomatonFile,
    symbols: &SymbolTable,
    parser: &ExpressionParser,
) -> Result<Automaton, Box<dyn Error>> {
    let scope = Some(file.id);
    let mut automaton = Automaton::new(file.id, &file.name);

    for node in &file.nodes {
        let mut built = AutomatonNode::new(node.id, node.state);
        for (output, condition) in &node.outputs {
            let number = symbols
                .resolve_output(output)
                .ok_or_else(|| format!("Unknown output '{}' in automaton '{}'", output, file.name))?;
            built = built.with_output(number, parser.parse(condition, symbols, scope)?);
        }
        for (signal, condition) in &node.control_signals {
            built = built.with_control_signal(*signal, parser.parse(condition, symbols, scope)?);
        }
        automaton = automaton.with_node(built);
    }
    for transition in &file.transitions {
        let guard = parser.parse(&transition.guard, symbols, scope)?;
        automaton = automaton.with_transition(Transition::new(transition.from, transition.to, guard));
    }

    let violations = automaton.check_scopes();
    if let Some(first) = violations.first() {
        return Err(format!("Automaton '{}': {}", file.name, first).into());
    }
    Ok(automaton)
}

fn equations(
    input: &Path,
    level: MinimizationLevel,
    check: bool,
    hardware: bool,
    json: bool,
    engine: &EngineArgs,
) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input)
        .map_err(|e| format!("Error reading system description '{}': {}", input.display(), e))?;
    let mut system: SystemFile = serde_json::from_str(&text)?;

    // state variables are derived from the state numbers, not declared
    for file in &system.automata {
        if !system.symbols.z_variables.iter().any(|z| z.automaton_id == file.id) {
            let max_state = file.nodes.iter().map(|n| n.state).max().unwrap_or(0);
            system.symbols = system
                .symbols
                .with_z_variables(file.id, calculate_needed_variables(max_state));
        }
    }

    let engine = engine.engine();
    let parser = ExpressionParser::for_symbols(&system.symbols);
    let automata = system
        .automata
        .iter()
        .map(|a| build_automaton(a, &system.symbols, &parser))
        .collect::<Result<Vec<_>, _>>()?;

    let dont_care = system
        .dont_care
        .as_deref()
        .map(|text| parser.parse(text, &system.symbols, None))
        .transpose()?;
    if let Some(dc) = &dont_care {
        check_dont_care(dc)?;
    }

    let outputs: Vec<usize> = system.symbols.outputs.iter().map(|o| o.number).collect();
    let mut reports = Vec::new();
    for automaton in &automata {
        let signals = system.symbols.control_signals_of(automaton.id);
        let set = automaton.equation_set(&outputs, &signals)?;
        let rendered = set.render(&system.symbols, &engine, level, dont_care.as_ref())?;

        let mut incomplete = Vec::new();
        let mut contradictions = Vec::new();
        if check {
            for report in automaton.completeness_reports(&engine)? {
                if !report.is_complete {
                    incomplete.push((report.state, report.witness.to_custom_string(&system.symbols)));
                }
            }
            for report in automaton.contradiction_reports(&engine)? {
                if !report.is_contradiction_free {
                    contradictions.push((report.state, report.witness.to_custom_string(&system.symbols)));
                }
            }
        }
        let mut hardware_transitions = Vec::new();
        if hardware {
            let realised = set
                .minimized(&engine, level, dont_care.as_ref())?
                .hardware_automaton(&engine, &automaton.name)?;
            hardware_transitions = realised
                .transitions
                .iter()
                .filter(|t| !t.guard.is_constant(false))
                .map(|t| HardwareTransition {
                    from: t.from,
                    to: t.to,
                    guard: t.guard.to_custom_string(&system.symbols),
                })
                .collect();
        }
        debug!(automaton = %rendered.automaton, "rendered equations");

        reports.push(AutomatonReport {
            automaton: rendered.automaton,
            z_equations: rendered.z_equations,
            output_equations: rendered.output_equations,
            control_signal_equations: rendered.control_signal_equations,
            incomplete,
            contradictions,
            hardware_transitions,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}:", report.automaton);
        for equation in report
            .z_equations
            .iter()
            .chain(&report.output_equations)
            .chain(&report.control_signal_equations)
        {
            println!("  {} = {}", equation.target, equation.expression);
        }
        for (state, witness) in &report.incomplete {
            println!("  state {} is incomplete for {}", state, witness);
        }
        for (state, witness) in &report.contradictions {
            println!("  state {} has contradicting guards for {}", state, witness);
        }
        for transition in &report.hardware_transitions {
            println!(
                "  {} -> {} on {}",
                transition.from, transition.to, transition.guard
            );
        }
    }
    Ok(())
}

fn minimize_pla(input: &Path, expressions: bool, engine: &EngineArgs) -> Result<(), Box<dyn Error>> {
    let table = TruthTable::from_pla_file(input)
        .map_err(|e| format!("Error reading PLA file '{}': {}", input.display(), e))?;
    info!(
        inputs = table.inputs(),
        outputs = table.outputs(),
        "read PLA file"
    );
    let engine = engine.engine();

    if expressions {
        let variables: Vec<Variable> = (0..table.inputs()).map(Variable::Input).collect();
        for (output, placeholder) in minimize_truth_table(&engine, &table)?.iter().enumerate() {
            let tree = placeholder.substitute(&variables)?;
            println!("y{} = {}", output, tree.to_internal_string());
        }
        return Ok(());
    }

    println!(".i {}", table.inputs());
    println!(".o {}", table.outputs());
    let cubes = engine.minimize_table(&table)?;
    println!(".p {}", cubes.len());
    for cube in cubes {
        println!("{}", cube);
    }
    println!(".e");
    Ok(())
}
