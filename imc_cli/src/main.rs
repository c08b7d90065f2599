mod render;

use clap::{Parser, Subcommand};
use imc_core::history::{self, EXPORT_MIME};
use imc_core::*;
use render::Style;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imc")]
#[command(about = "Simulador de IMC: calcule e classifique seu Índice de Massa Corporal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a single BMI and print the result panel
    Calc {
        /// Unit system (metric, imperial)
        #[arg(long, short)]
        unit: Option<UnitSystem>,

        /// Weight in kg (metric) or lb (imperial)
        #[arg(long, short, allow_negative_numbers = true)]
        weight: Option<f64>,

        /// Height in m (metric) or in (imperial)
        #[arg(long = "height", short = 'H', allow_negative_numbers = true)]
        height: Option<f64>,

        /// Age in years (5-120)
        #[arg(long, short)]
        age: Option<u8>,

        /// Gender (unspecified, male, female, other)
        #[arg(long, short)]
        gender: Option<Gender>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session with history, chart and CSV export (default)
    Session,

    /// Show the history table and chart of an exported CSV file
    Show {
        /// Path to an exported history file
        file: PathBuf,
    },

    /// Explain BMI and list the categories
    About,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        imc_core::logging::init_with_level("debug");
    } else {
        imc_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let style = Style {
        color: !cli.no_color && io::stdout().is_terminal(),
    };

    match cli.command {
        Some(Commands::Calc {
            unit,
            weight,
            height,
            age,
            gender,
            json,
        }) => {
            let mut form = config.initial_form();
            if let Some(unit) = unit {
                form = MeasurementForm {
                    age: form.age,
                    gender: form.gender,
                    ..MeasurementForm::with_defaults(unit)
                };
            }
            form.weight = weight.unwrap_or(form.weight);
            form.height = height.unwrap_or(form.height);
            form.age = age.unwrap_or(form.age);
            form.gender = gender.unwrap_or(form.gender);
            cmd_calc(&form, json, style)
        }
        Some(Commands::Session) | None => cmd_session(&config, style),
        Some(Commands::Show { file }) => cmd_show(&file, &config, style),
        Some(Commands::About) => {
            cmd_about(style);
            Ok(())
        }
    }
}

fn cmd_calc(form: &MeasurementForm, json: bool, style: Style) -> Result<()> {
    // One-shot computations do not outlive the process
    let mut session = Session::new();
    let submission = session.submit(form)?;

    if json {
        let output = serde_json::json!({
            "input": submission.form,
            "result": submission.result,
            "gauge": Gauge::for_result(&submission.result),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_result(&submission.result, style);
    }
    Ok(())
}

fn cmd_show(file: &Path, config: &Config, style: Style) -> Result<()> {
    let mut records = history::read_csv(file)?;
    let series: Vec<f64> = records.iter().map(HistoryRecord::bmi).collect();
    if config.history.sort_by_bmi {
        records.sort_by(|a, b| b.bmi().total_cmp(&a.bmi()));
    }

    println!("Histórico: {}", file.display());
    println!();
    render::print_history(&records.iter().collect::<Vec<_>>(), style);
    println!();
    render::print_chart(&series);
    Ok(())
}

fn cmd_about(style: Style) {
    println!("O que é o IMC?");
    println!();
    println!("O Índice de Massa Corporal (IMC) é uma medida simples que relaciona peso e altura.");
    println!("Ele é útil como triagem, mas não substitui avaliação clínica.");
    println!();
    println!("IMC = peso (kg) / altura (m)²");
    println!();
    render::print_categories(style);
}

/// A parsed line of the interactive session
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Unit(UnitSystem),
    Calc {
        weight: Option<f64>,
        height: Option<f64>,
        age: Option<u8>,
        gender: Option<Gender>,
    },
    History,
    Chart,
    Export(Option<PathBuf>),
    Clear,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(String::new());
    };
    let args: Vec<&str> = words.collect();

    match command.to_lowercase().as_str() {
        "unit" | "unidade" => {
            let unit = args
                .first()
                .ok_or("Uso: unit <metric|imperial>")?
                .parse::<UnitSystem>()
                .map_err(|e| e.to_string())?;
            Ok(SessionCommand::Unit(unit))
        }
        "calc" | "calcular" => {
            let weight = args.first().map(|s| parse_number(s)).transpose()?;
            let height = args.get(1).map(|s| parse_number(s)).transpose()?;
            let age = args
                .get(2)
                .map(|s| s.parse::<u8>().map_err(|_| format!("Idade inválida: {}", s)))
                .transpose()?;
            let gender = args
                .get(3)
                .map(|s| s.parse::<Gender>().map_err(|e| e.to_string()))
                .transpose()?;
            Ok(SessionCommand::Calc {
                weight,
                height,
                age,
                gender,
            })
        }
        "history" | "historico" | "histórico" => Ok(SessionCommand::History),
        "chart" | "grafico" | "gráfico" => Ok(SessionCommand::Chart),
        "export" | "exportar" | "download" => {
            Ok(SessionCommand::Export(args.first().map(PathBuf::from)))
        }
        "clear" | "limpar" => Ok(SessionCommand::Clear),
        "help" | "ajuda" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "sair" => Ok(SessionCommand::Quit),
        other => Err(format!(
            "Comando desconhecido: {}. Digite 'help' para ver os comandos.",
            other
        )),
    }
}

/// Accepts both `1.75` and `1,75`
fn parse_number(s: &str) -> std::result::Result<f64, String> {
    s.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("Valor inválido: {}", s))
}

fn cmd_session(config: &Config, style: Style) -> Result<()> {
    let mut session = Session::from_config(config);
    let mut form = config.initial_form();

    render::print_header();
    println!("Digite 'help' para ver os comandos.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("imc> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            SessionCommand::Unit(unit) => {
                form = MeasurementForm {
                    age: form.age,
                    gender: form.gender,
                    ..MeasurementForm::with_defaults(unit)
                };
                println!(
                    "Unidade: {} (peso {} {}, altura {} {})",
                    unit.label(),
                    form.weight,
                    unit.weight_unit(),
                    form.height,
                    unit.height_unit()
                );
            }
            SessionCommand::Calc {
                weight,
                height,
                age,
                gender,
            } => {
                form.weight = weight.unwrap_or(form.weight);
                form.height = height.unwrap_or(form.height);
                form.age = age.unwrap_or(form.age);
                form.gender = gender.unwrap_or(form.gender);

                match session.submit(&form) {
                    Ok(submission) => {
                        form = submission.form;
                        render::print_result(&submission.result, style);
                        println!("Registro #{} adicionado ao histórico.", submission.index);
                    }
                    Err(e) => {
                        println!("{}", e);
                    }
                }
            }
            SessionCommand::History => {
                let records = session.history().ordered(config.display_order());
                render::print_history(&records, style);
            }
            SessionCommand::Chart => render::print_chart(&session.history().bmi_series()),
            SessionCommand::Export(path) => {
                let path = path.unwrap_or_else(|| config.export.path());
                match session.history().write_csv(&path, config.export_order()) {
                    Ok(count) => println!(
                        "✓ Histórico exportado: {} ({} registros, {})",
                        path.display(),
                        count,
                        EXPORT_MIME
                    ),
                    Err(e) => println!("Falha ao exportar: {}", e),
                }
            }
            SessionCommand::Clear => {
                session.clear();
                println!("✓ Histórico limpo.");
            }
            SessionCommand::Help => print_session_help(),
            SessionCommand::Quit => break,
        }
    }

    tracing::debug!("Session ended with {} records", session.history().len());
    Ok(())
}

fn print_session_help() {
    println!("Comandos:");
    println!("  unit <metric|imperial>               troca a unidade (restaura peso/altura padrão)");
    println!("  calc [peso] [altura] [idade] [genero] calcula e adiciona ao histórico");
    println!("  history                              mostra o histórico");
    println!("  chart                                gráfico do IMC por registro");
    println!("  export [arquivo]                     salva o histórico em CSV");
    println!("  clear                                limpa o histórico");
    println!("  quit                                 encerra a sessão");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calc_with_all_fields() {
        assert_eq!(
            parse_command("calc 70 1,75 42 f").unwrap(),
            SessionCommand::Calc {
                weight: Some(70.0),
                height: Some(1.75),
                age: Some(42),
                gender: Some(Gender::Female),
            }
        );
    }

    #[test]
    fn test_parse_calc_uses_form_values() {
        assert_eq!(
            parse_command("calc").unwrap(),
            SessionCommand::Calc {
                weight: None,
                height: None,
                age: None,
                gender: None,
            }
        );
    }

    #[test]
    fn test_parse_errors_are_messages() {
        assert!(parse_command("calc abc").unwrap_err().contains("Valor inválido"));
        assert!(parse_command("calc 70 1.75 999").unwrap_err().contains("Idade inválida"));
        assert!(parse_command("unit").is_err());
        assert!(parse_command("dance").unwrap_err().contains("Comando desconhecido"));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse_command("limpar").unwrap(), SessionCommand::Clear);
        assert_eq!(
            parse_command("unit imperial").unwrap(),
            SessionCommand::Unit(UnitSystem::Imperial)
        );
        assert_eq!(
            parse_command("export out.csv").unwrap(),
            SessionCommand::Export(Some(PathBuf::from("out.csv")))
        );
        assert_eq!(parse_command("export").unwrap(), SessionCommand::Export(None));
    }
}
