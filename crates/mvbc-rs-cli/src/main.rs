//! mvbc: check MVB controller project files and dump their register payloads.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;
use mvbc_rs::types::DEFAULT_PROJECT_CONFIG_FILE;
use mvbc_rs::dry_run::SubmittedCommand;
use mvbc_rs::{
    DryRunControl, InitError, InitStatus, Project, configure_project, library_version,
    pld_firmware_version,
};
use mvbc_rs_config::load_project_from_file;

#[derive(Parser)]
#[command(name = "mvbc", version, about = "MVB controller project configuration tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the library version
    Version,
    /// Parse a project file and summarise it
    Check {
        /// Project file (default: /usr/share/mvbc_example.json)
        file: Option<PathBuf>,
        /// Print the parsed descriptor tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dry-run the init sequence and print every command with its register payload
    Encode {
        /// Project file (default: /usr/share/mvbc_example.json)
        file: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Version => {
            println!("library {}", library_version());
            println!("PLD firmware {}", pld_firmware_version());
            Ok(())
        }
        Commands::Check { file, json } => {
            let project = load(file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                print_summary(&project);
            }
            Ok(())
        }
        Commands::Encode { file } => encode(load(file)?),
    }
}

fn load(file: Option<PathBuf>) -> anyhow::Result<Project> {
    let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_CONFIG_FILE));
    info!("Loading project file '{}'", path.display());
    load_project_from_file(&path).map_err(|e| {
        anyhow::anyhow!(
            "cannot load project '{}': {e} (status {})",
            path.display(),
            e.code()
        )
    })
}

fn print_summary(project: &Project) {
    println!(
        "project '{}' version '{}': {} device(s)",
        project.name,
        project.version,
        project.device_count()
    );
    for (index, device) in project.devices.iter().enumerate() {
        println!(
            "  [{}] {} '{}' {} address {} mode {} memory test {}",
            index,
            device.path,
            device.description,
            device.interface,
            device.address.0,
            device.mode,
            if device.test_traffic_memory { "on" } else { "off" }
        );
        if device.mode.uses_static_ports() {
            println!("      {} static port(s)", device.port_setup.port_count());
            for port in &device.port_setup.ports {
                println!(
                    "        port {:4} '{}' {} {} fcode {} poll {} ms irq {} num_data {}",
                    port.address.0,
                    port.name,
                    port.port_type,
                    port.direction,
                    port.function_code.0,
                    port.poll_interval.0,
                    port.interrupt.0,
                    u8::from(port.numeric_data)
                );
            }
        }
        if device.mode.uses_default_port() {
            let template = &device.port_setup.default_port;
            println!(
                "      default port {} poll {} ms irq {} num_data {}",
                template.port_type,
                template.poll_interval.0,
                template.interrupt.0,
                u8::from(template.numeric_data)
            );
        }
    }
}

/// Runs the init sequence against a recording transport.
///
/// The commands come back even if the run stopped, up to and including the failing one.
fn dry_run(project: &Project) -> (Vec<SubmittedCommand>, Result<InitStatus, InitError>) {
    let mut control = DryRunControl::new();
    let result = configure_project(project, &mut control);
    (control.into_submitted(), result)
}

fn encode(project: Project) -> anyhow::Result<()> {
    let (submitted, result) = dry_run(&project);
    println!("{}", serde_json::to_string_pretty(&submitted)?);

    let status = result.map_err(|e| anyhow::anyhow!("{e} (status {})", e.error.code()))?;
    info!("Dry run finished with status {:#x}", status.bits());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dry_run_keeps_commands_of_failed_run() {
        let device = mvbc_rs::DeviceDescriptor::new(
            "mvbc0",
            mvbc_rs::Interface::Emd,
            mvbc_rs::DeviceAddress(1),
            mvbc_rs::Mode::Dynamic,
        );
        let project = Project {
            devices: vec![device],
            ..Default::default()
        };

        let (submitted, result) = dry_run(&project);
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].command, mvbc_rs::Command::Shutdown);
        assert_eq!(result.unwrap_err().error.code(), -1);
    }

    #[test]
    fn test_check_defaults_to_example_file() {
        let cli = Cli::try_parse_from(["mvbc", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { file: None, json: false }));
    }
}
