use clap::Parser;
use graph_sdk::config::cli::{Command, ListOnlyCommand, NamedLocationsCommand, RequestsCommand};
use graph_sdk::core::Query;
use graph_sdk::utils::logger;
use graph_sdk::{
    AccessPackageAssignmentPolicyClient, AccessPackageAssignmentRequestClient,
    AccessPackageCatalogClient, AccessPackageClient, CliConfig, NamedLocationsClient, Result,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn list_query(filter: Option<String>) -> Query {
    filter.map(Query::filter).unwrap_or_default()
}

async fn run(cli: CliConfig) -> Result<()> {
    let sdk_config = cli.resolve()?;
    let authorizer = sdk_config.auth.authorizer();
    let client_config = &sdk_config.client;

    match cli.command {
        Command::NamedLocations(cmd) => {
            let client = NamedLocationsClient::new(client_config, authorizer)?;
            match cmd {
                NamedLocationsCommand::List { filter } => {
                    print_json(&client.list(filter.as_deref()).await?)?
                }
                NamedLocationsCommand::Get { id } => print_json(&client.get(&id).await?)?,
                NamedLocationsCommand::Delete { id } => {
                    client.delete(&id).await?;
                    tracing::info!("Deleted named location {}", id);
                }
            }
        }
        Command::Catalogs(ListOnlyCommand::List { filter }) => {
            let client = AccessPackageCatalogClient::new(client_config, authorizer)?;
            print_json(&client.list(&list_query(filter)).await?)?;
        }
        Command::AccessPackages(ListOnlyCommand::List { filter }) => {
            let client = AccessPackageClient::new(client_config, authorizer)?;
            print_json(&client.list(&list_query(filter)).await?)?;
        }
        Command::Policies(ListOnlyCommand::List { filter }) => {
            let client = AccessPackageAssignmentPolicyClient::new(client_config, authorizer)?;
            print_json(&client.list(&list_query(filter)).await?)?;
        }
        Command::Requests(cmd) => {
            let client = AccessPackageAssignmentRequestClient::new(client_config, authorizer)?;
            match cmd {
                RequestsCommand::List { filter } => {
                    print_json(&client.list(&list_query(filter)).await?)?
                }
                RequestsCommand::Get { id } => print_json(&client.get(&id).await?)?,
                RequestsCommand::Cancel { id } => {
                    client.cancel(&id).await?;
                    tracing::info!("Canceled assignment request {}", id);
                }
                RequestsCommand::Delete { id } => {
                    client.delete(&id).await?;
                    tracing::info!("Deleted assignment request {}", id);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}
