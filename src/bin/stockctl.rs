// src/bin/stockctl.rs

// Front-end de terminal: a mesma sessão de estado que a tela usaria.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stock_manager::client::{
    list_view::{SortColumn, SortDirection, SortState, StockStatus},
    validation::{StockDraft, ValidationResult},
    HttpStockApi, InventorySession, NoticeKind, SubmitError,
};
use stock_manager::models::stock::StockRecord;

#[derive(Debug, Parser)]
#[command(name = "stockctl", about = "Gerencia o estoque pela API")]
struct Cli {
    /// URL base da API
    #[arg(long, env = "STOCK_API_URL", default_value = "http://localhost:3000", global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lista os itens
    List {
        /// stock-number, product-name, quantity, price ou updated-at
        #[arg(long)]
        sort: Option<SortColumn>,
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Cadastra um item (o número de estoque é sugerido se omitido)
    Add {
        #[arg(long)]
        stock_number: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "0")]
        quantity: String,
        #[arg(long, default_value = "0")]
        price: String,
    },
    /// Busca um item e altera os campos informados
    Update {
        term: String,
        #[arg(long)]
        stock_number: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Busca um item e o exclui
    Delete { term: String },
    /// Mostra o primeiro item que bate com o termo
    Find { term: String },
    /// Sugere o próximo número de estoque
    NextNumber,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let mut session = InventorySession::new(HttpStockApi::new(&cli.api_url));

    if session.start().await.is_err() {
        print_notice(&session);
        return Ok(ExitCode::FAILURE);
    }

    let code = match cli.command {
        Command::List { sort, desc } => {
            if let Some(column) = sort {
                let direction = if desc { SortDirection::Descending } else { SortDirection::Ascending };
                session.set_sort(SortState::new(column, direction));
            }
            print_table(&session.view());
            ExitCode::SUCCESS
        }
        Command::Add { stock_number, name, quantity, price } => {
            let stock_number = stock_number.unwrap_or_else(|| session.next_stock_number());
            let draft = StockDraft::parse_form(&stock_number, &name, &quantity, &price);
            let result = session.add_item(&draft).await;
            report(&session, result.map(|id| println!("{id}")))
        }
        Command::Update { term, stock_number, name, quantity, price } => {
            let Some(found) = session.search(&term) else {
                eprintln!("Nenhum item encontrado para \"{term}\"");
                return Ok(ExitCode::FAILURE);
            };
            let id = found.id;
            let draft = StockDraft::parse_form(
                stock_number.as_deref().unwrap_or(&found.stock_number),
                name.as_deref().unwrap_or(&found.product_name),
                &quantity.unwrap_or_else(|| found.quantity.to_string()),
                &price.unwrap_or_else(|| found.price.to_string()),
            );
            let result = session.update_item(id, &draft).await;
            report(&session, result)
        }
        Command::Delete { term } => {
            let Some(found) = session.search(&term) else {
                eprintln!("Nenhum item encontrado para \"{term}\"");
                return Ok(ExitCode::FAILURE);
            };
            let id = found.id;
            let result = session.delete_item(id).await.map(|_| ()).map_err(SubmitError::from);
            report(&session, result)
        }
        Command::Find { term } => match session.search(&term) {
            Some(record) => {
                print_table(&[record]);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Nenhum item encontrado para \"{term}\"");
                ExitCode::FAILURE
            }
        },
        Command::NextNumber => {
            println!("{}", session.next_stock_number());
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn report<A: stock_manager::client::StockApi>(
    session: &InventorySession<A>,
    result: Result<(), SubmitError>,
) -> ExitCode {
    match result {
        Ok(()) => {
            print_notice(session);
            ExitCode::SUCCESS
        }
        Err(SubmitError::Invalid(validation)) => {
            print_validation(&validation);
            ExitCode::from(2)
        }
        Err(SubmitError::Failed(_)) => {
            print_notice(session);
            ExitCode::FAILURE
        }
    }
}

fn print_notice<A: stock_manager::client::StockApi>(session: &InventorySession<A>) {
    if let Some(notice) = session.notice() {
        match notice.kind {
            NoticeKind::Success => eprintln!("✔ {}", notice.text),
            NoticeKind::Error => eprintln!("✖ {}", notice.text),
        }
    }
}

fn print_validation(validation: &ValidationResult) {
    for (field, message) in &validation.errors {
        eprintln!("{field}: {message}");
    }
}

fn print_table(records: &[&StockRecord]) {
    if records.is_empty() {
        println!("No Stock Items Yet");
        return;
    }
    println!(
        "{:<12} {:<28} {:>8}  {:<16} {:>12}  {}",
        "Stock Number", "Product Name", "Quantity", "Status", "Price", "Last Updated"
    );
    for record in records {
        println!(
            "{:<12} {:<28} {:>8}  {:<16} {:>12}  {}",
            record.stock_number,
            record.product_name,
            record.quantity,
            StockStatus::of(record).to_string(),
            format!("{:.2}", record.price),
            record.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }
}
