use clap::{Args, Subcommand};
use std::io::{self, Write};

use fichas::{Controller, DraftField, ReferenceSource, SyncClient};

use super::render::{empty_list_message, print_ficha, print_table};
use super::{report, OutputFormat};

#[derive(Args)]
pub struct FichaCommand {
    #[command(subcommand)]
    pub command: FichaSubcommand,
}

/// Field values shared by create and update.
#[derive(Args, Default)]
pub struct FichaFields {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// End of classwork date (YYYY-MM-DD)
    #[arg(long)]
    end_classwork: Option<String>,

    /// End of record date (YYYY-MM-DD)
    #[arg(long)]
    end_record: Option<String>,

    /// Program id
    #[arg(long)]
    program: Option<String>,

    /// Site id
    #[arg(long)]
    site: Option<String>,

    /// Status: lectiva, electiva or finalizada
    #[arg(long)]
    status: Option<String>,
}

impl FichaFields {
    fn values(&self) -> Vec<(DraftField, &str)> {
        [
            (DraftField::StartDate, &self.start),
            (DraftField::EndClassworkDate, &self.end_classwork),
            (DraftField::EndRecordDate, &self.end_record),
            (DraftField::Program, &self.program),
            (DraftField::Site, &self.site),
            (DraftField::Status, &self.status),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Subcommand)]
pub enum FichaSubcommand {
    /// List all fichas
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a ficha's details
    Show {
        /// Ficha code
        code: i64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new ficha
    Create {
        /// Ficha code
        code: String,

        #[command(flatten)]
        fields: FichaFields,
    },

    /// Update an existing ficha
    Update {
        /// Ficha code
        code: i64,

        #[command(flatten)]
        fields: FichaFields,
    },

    /// Delete a ficha
    Delete {
        /// Ficha code
        code: i64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl FichaCommand {
    pub async fn run<C>(&self, controller: &mut Controller<C>) -> Result<(), Box<dyn std::error::Error>>
    where
        C: SyncClient + ReferenceSource,
    {
        match &self.command {
            FichaSubcommand::List { format } => {
                // a failed load leaves an error notification
                report(controller)?;

                let fichas = controller.store().records();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(fichas)?);
                    }
                    OutputFormat::Text => {
                        if fichas.is_empty() {
                            println!("{}", empty_list_message(controller.store()));
                            return Ok(());
                        }
                        print_table(fichas, controller.reference());
                    }
                }
                Ok(())
            }

            FichaSubcommand::Show { code, format } => {
                report(controller)?;

                let ficha = controller
                    .store()
                    .get(*code)
                    .ok_or_else(|| format!("Ficha not found: {}", code))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(ficha)?);
                    }
                    OutputFormat::Text => print_ficha(ficha, controller.reference()),
                }
                Ok(())
            }

            FichaSubcommand::Create { code, fields } => {
                controller.set_field(DraftField::Code, code)?;
                for (field, value) in fields.values() {
                    controller.set_field(field, value)?;
                }

                // the outcome is reported through the notification
                let _ = controller.submit().await;
                report(controller)
            }

            FichaSubcommand::Update { code, fields } => {
                report(controller)?;

                let values = fields.values();
                if values.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                controller.begin_edit(*code)?;
                for (field, value) in values {
                    controller.set_field(field, value)?;
                }

                let _ = controller.submit().await;
                report(controller)
            }

            FichaSubcommand::Delete { code, force } => {
                report(controller)?;

                if controller.store().get(*code).is_none() {
                    return Err(format!("Ficha not found: {}", code).into());
                }

                // Confirm deletion unless --force is used
                if !force {
                    print!("Delete ficha {}? [y/N] ", code);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                let _ = controller.delete(*code).await;
                report(controller)
            }
        }
    }
}
