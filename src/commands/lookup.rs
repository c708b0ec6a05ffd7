use clap::{Args, Subcommand};

use fichas::{Controller, ReferenceSource, SyncClient};

use super::OutputFormat;

/// Show the options available for a ficha's selectors
#[derive(Args)]
pub struct LookupCommand {
    #[command(subcommand)]
    pub command: LookupSubcommand,
}

#[derive(Subcommand)]
pub enum LookupSubcommand {
    /// List training programs
    Programs {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List sites
    Sites {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List valid statuses
    Statuses,
}

impl LookupCommand {
    pub fn run<C>(&self, controller: &Controller<C>) -> Result<(), Box<dyn std::error::Error>>
    where
        C: SyncClient + ReferenceSource,
    {
        let reference = controller.reference();

        match &self.command {
            LookupSubcommand::Programs { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(reference.programs())?);
                }
                OutputFormat::Text => {
                    if reference.programs().is_empty() {
                        println!("No programs available");
                    }
                    for program in reference.programs() {
                        println!("{:<8}  {}", program.id, program.name);
                    }
                }
            },
            LookupSubcommand::Sites { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(reference.sites())?);
                }
                OutputFormat::Text => {
                    if reference.sites().is_empty() {
                        println!("No sites available");
                    }
                    for site in reference.sites() {
                        println!("{:<8}  {}", site.id, site.name);
                    }
                }
            },
            LookupSubcommand::Statuses => {
                for status in reference.statuses() {
                    println!("{}", status);
                }
            }
        }
        Ok(())
    }
}
