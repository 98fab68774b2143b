use clap::Parser;
use exprdiff::{lexer::Lexer, parser, Bindings, Expression};
use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, Report, WrapErr};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Evaluate or differentiate an arithmetic expression.
///
/// The expression is read from stdin unless given with --expression.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
struct Input {
    /// Variable bindings as `name value` pairs, e.g. `x 2 y -0.5`
    bindings: Vec<String>,

    /// The expression to evaluate, instead of reading it from stdin
    #[clap(short, long)]
    expression: Option<String>,

    /// Differentiate with respect to this variable before evaluating
    #[clap(short, long, value_name = "VARIABLE")]
    differentiate: Option<String>,

    /// How many times to differentiate. Only used together with --differentiate.
    #[clap(long, default_value = "1")]
    order: usize,

    /// Print the (differentiated) expression instead of evaluating it.
    #[clap(long, default_value = "false")]
    print: bool,

    /// Debug the lexer, printing out each token. Does not parse or evaluate the expression.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,

    /// Debug the parser, printing out the AST. Does not evaluate the expression.
    #[clap(long, default_value = "false")]
    debug_parser: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Input::parse()) {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(input: Input) -> miette::Result<()> {
    let Input {
        bindings,
        expression,
        differentiate,
        order,
        print,
        debug_lexer,
        debug_parser,
    } = input;

    let source = match expression {
        Some(expression) => expression,
        None => std::io::read_to_string(std::io::stdin())
            .into_diagnostic()
            .wrap_err("failed to read the expression from stdin")?,
    };

    if debug_lexer {
        return run_debug_lexer(Lexer::new(&source));
    }

    let source_code = NamedSource::new("<expression>", source.clone());

    let mut parser = parser::Parser::new(&source);
    let ast = parser
        .parse()
        .map_err(|e| Report::new(e).with_source_code(source_code.clone()))?;

    if debug_parser {
        dbg!(ast);
        return Ok(());
    }

    let ast = match differentiate {
        Some(variable) => {
            check_variable_name(&variable).wrap_err("invalid --differentiate variable")?;
            ast.nth_derivative(&variable, order)
        }
        None => ast,
    };

    if print {
        println!("{ast}");
        return Ok(());
    }

    let bindings = parse_bindings(&bindings)?;
    let used = ast.free_variables();
    for name in bindings.keys().filter(|name| !used.contains(name.as_str())) {
        warn!(name = name.as_str(), "binding is not used by the expression");
    }

    let result = ast
        .evaluate(&bindings)
        .map_err(|e| Report::new(e).with_source_code(source_code))?;
    println!("{result:.6}");

    Ok(())
}

fn run_debug_lexer(lexer: Lexer) -> miette::Result<()> {
    let source_code = NamedSource::new("<expression>", lexer.source().to_string());

    for token in lexer {
        let t = token.map_err(|e| Report::new(e).with_source_code(source_code.clone()))?;
        let diag = miette!(
            labels = vec![LabeledSpan::at(t.span.start..t.span.end, t.kind.to_string())],
            severity = miette::Severity::Advice,
            "found a token",
        )
        .with_source_code(source_code.clone());
        eprintln!("{:?}", diag);
    }

    Ok(())
}

fn parse_bindings(args: &[String]) -> miette::Result<Bindings> {
    if let [.., last] = args {
        if args.len() % 2 != 0 {
            return Err(miette!(
                help = "bindings are given as `name value` pairs",
                "missing value for variable '{last}'"
            ));
        }
    }

    let mut bindings = Bindings::new();
    for pair in args.chunks_exact(2) {
        let (name, value) = (&pair[0], &pair[1]);
        check_variable_name(name)?;

        let value: f64 = value
            .parse()
            .into_diagnostic()
            .wrap_err_with(|| format!("invalid value '{value}' for variable '{name}'"))?;

        if let Some(previous) = bindings.insert(name.clone(), value) {
            debug!(name = name.as_str(), previous, value, "binding overridden");
        }
    }

    Ok(bindings)
}

/// A valid variable name is one that parses as exactly that variable.
fn check_variable_name(name: &str) -> miette::Result<()> {
    match exprdiff::parse(name) {
        Ok(Expression::Variable(parsed)) if parsed == name => Ok(()),
        _ => Err(miette!(
            help = "variable names start with a letter or '_' and may not be a function name",
            "'{name}' is not a valid variable name"
        )),
    }
}
