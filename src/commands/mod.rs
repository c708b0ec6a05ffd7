mod config_cmd;
mod ficha;
mod lookup;
mod render;
mod shell;

pub use config_cmd::ConfigCommand;
pub use ficha::FichaCommand;
pub use lookup::LookupCommand;
pub use shell::ShellCommand;

use clap::ValueEnum;
use fichas::{Controller, ReferenceSource, SyncClient};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints the controller's notification and fails if it is an error.
fn report<C>(controller: &Controller<C>) -> Result<(), Box<dyn std::error::Error>>
where
    C: SyncClient + ReferenceSource,
{
    match controller.notification().current() {
        Some(notification) if notification.is_error() => Err(notification.message.clone().into()),
        Some(notification) => {
            println!("{}", notification);
            Ok(())
        }
        None => Ok(()),
    }
}
